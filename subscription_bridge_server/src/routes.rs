//! Request handler definitions
//!
//! Define each route and it handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! The subscription routes are all `POST`s with a form-encoded body, and are mounted under the `/subscriptions` scope,
//! behind the [`SignatureMiddlewareFactory`](crate::middleware::SignatureMiddlewareFactory). The remote backend's JSON
//! response is returned to the caller as is.
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Remote calls must always be awaited, never blocked on.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use subscription_engine::{
    subscription_types::{NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    CustomerLookup,
    SessionApi,
    SessionManagement,
    SubscriptionApi,
    SubscriptionManagement,
};

use crate::{
    data_objects::{
        AddToCartParams,
        AddedProductParams,
        CancelParams,
        CustomerParams,
        DiscountParams,
        NewOrderedProductParams,
        NewSubscriptionParams,
        QuantityParams,
        ScheduleParams,
        ShipmentDateParams,
        ShopQuery,
        SubscriptionTokenParams,
        SwapProductParams,
    },
    errors::ServerError,
    helpers::redirect,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

#[get("/test")]
pub async fn test_route() -> impl Responder {
    trace!("💻️ Received test request");
    HttpResponse::Ok().body("Test Successful")
}

// ----------------------------------------------   Landing  ----------------------------------------------------
route!(landing => Get "/" impl SessionManagement);
/// The app's landing page. Storefronts that have not completed the OAuth handshake yet are sent to `/auth` first.
pub async fn landing<B: SessionManagement>(
    query: web::Query<ShopQuery>,
    sessions: web::Data<SessionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let shop = query
        .into_inner()
        .shop
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServerError::InvalidRequestPath("The shop parameter is required".into()))?;
    if sessions.is_known_shop(&shop) {
        trace!("💻️ Landing page for {shop}");
        Ok(HttpResponse::Ok().body("Hello World"))
    } else {
        debug!("💻️ {shop} has no session yet. Redirecting to /auth");
        Ok(redirect(&format!("/auth?shop={}", urlencoding::encode(&shop))))
    }
}

// ----------------------------------------------   Subscriptions  ----------------------------------------------
route!(subscriptions => Post "" impl SubscriptionManagement, CustomerLookup);
/// All subscriptions (activated, paused and cancelled) for a storefront customer.
pub async fn subscriptions<B, C>(
    body: web::Form<CustomerParams>,
    api: web::Data<SubscriptionApi<B>>,
    customers: web::Data<C>,
) -> Result<HttpResponse, ServerError>
where
    B: SubscriptionManagement,
    C: CustomerLookup,
{
    trace!("💻️ Received subscriptions request for customer {}", body.customer_id);
    let result = api.subscriptions_for_customer(&body.customer_id, customers.get_ref()).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(get_subscription => Post "/getSubscription" impl SubscriptionManagement);
pub async fn get_subscription<B: SubscriptionManagement>(
    body: web::Form<SubscriptionTokenParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received getSubscription request");
    let result = api.fetch_subscription(&body.token).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn update_ordered_product<B: SubscriptionManagement>(
    update: OrderedProductUpdate,
    api: &SubscriptionApi<B>,
) -> Result<HttpResponse, ServerError> {
    let result = api.update_ordered_product(&update).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(set_next_shipment_date => Post "/setNextShipmentDate" impl SubscriptionManagement);
pub async fn set_next_shipment_date<B: SubscriptionManagement>(
    body: web::Form<ShipmentDateParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received setNextShipmentDate request");
    update_ordered_product(body.into_inner().into(), &api).await
}

route!(skip_shipment => Post "/skipShipment" impl SubscriptionManagement);
/// Skipping a shipment moves the next shipment date. The storefront works out the new date.
pub async fn skip_shipment<B: SubscriptionManagement>(
    body: web::Form<ShipmentDateParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received skipShipment request");
    update_ordered_product(body.into_inner().into(), &api).await
}

route!(update_order_schedule => Post "/updateOrderSchedule" impl SubscriptionManagement);
pub async fn update_order_schedule<B: SubscriptionManagement>(
    body: web::Form<ScheduleParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received updateOrderSchedule request");
    update_ordered_product(body.into_inner().into(), &api).await
}

route!(update_quantity => Post "/updateQuantity" impl SubscriptionManagement);
pub async fn update_quantity<B: SubscriptionManagement>(
    body: web::Form<QuantityParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received updateQuantity request");
    update_ordered_product(body.into_inner().into(), &api).await
}

route!(swap_ordered_product => Post "/swapOrderedProduct" impl SubscriptionManagement);
pub async fn swap_ordered_product<B: SubscriptionManagement>(
    body: web::Form<SwapProductParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received swapOrderedProduct request");
    update_ordered_product(body.into_inner().into(), &api).await
}

route!(update_added_product => Post "/updateAddedProduct" impl SubscriptionManagement);
pub async fn update_added_product<B: SubscriptionManagement>(
    body: web::Form<AddedProductParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received updateAddedProduct request");
    update_ordered_product(body.into_inner().into(), &api).await
}

async fn create_ordered_product<B: SubscriptionManagement>(
    product: NewOrderedProduct,
    api: &SubscriptionApi<B>,
) -> Result<HttpResponse, ServerError> {
    let result = api.create_ordered_product(&product).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(new_ordered_product => Post "/createOrderedProduct" impl SubscriptionManagement);
pub async fn new_ordered_product<B: SubscriptionManagement>(
    body: web::Form<NewOrderedProductParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received createOrderedProduct request");
    create_ordered_product(body.into_inner().into(), &api).await
}

route!(add_to_cart => Post "/addToCart" impl SubscriptionManagement);
pub async fn add_to_cart<B: SubscriptionManagement>(
    body: web::Form<AddToCartParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received addToCart request");
    create_ordered_product(body.into_inner().into(), &api).await
}

route!(cancel_subscription => Post "/cancelSubscription" impl SubscriptionManagement);
/// Removes an ordered product from its subscription.
pub async fn cancel_subscription<B: SubscriptionManagement>(
    body: web::Form<CancelParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received cancelSubscription request");
    let result = api.destroy_ordered_product(&body.ordered_product_id).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(apply_discount_code => Post "/applyDiscountCode" impl SubscriptionManagement);
/// Always answers 200 with a plain-text message for the customer.
pub async fn apply_discount_code<B: SubscriptionManagement>(
    body: web::Form<DiscountParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> impl Responder {
    trace!("💻️ Received applyDiscountCode request for subscription {}", body.subscription_id);
    let outcome = api.apply_discount_code(&body.discount_code, &body.subscription_id).await;
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(outcome.to_string())
}

route!(create_subscription => Post "/createSubscription" impl SubscriptionManagement);
pub async fn create_subscription<B: SubscriptionManagement>(
    body: web::Form<NewSubscriptionParams>,
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received createSubscription request");
    let subscription = NewSubscription::try_from(body.into_inner())?;
    let result = api.create_subscription(&subscription).await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(all_products => Post "/getAllProducts" impl SubscriptionManagement);
pub async fn all_products<B: SubscriptionManagement>(
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received getAllProducts request");
    let result = api.fetch_products().await?;
    Ok(HttpResponse::Ok().json(result))
}

route!(create_cart => Post "/createCart" impl SubscriptionManagement);
pub async fn create_cart<B: SubscriptionManagement>(
    api: web::Data<SubscriptionApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received createCart request");
    let result = api.create_cart().await?;
    Ok(HttpResponse::Ok().json(result))
}
