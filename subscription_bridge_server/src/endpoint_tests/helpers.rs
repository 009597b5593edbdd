use actix_web::{
    body::MessageBody,
    dev::Service,
    http::{header, StatusCode},
    test,
    test::TestRequest,
    web,
    web::ServiceConfig,
    App,
};
use log::debug;
use ssb_common::Secret;
use subscription_engine::{
    signature::{calculate_signature, canonicalize},
    SubscriptionApi,
};

use super::mocks::{MockCustomers, MockSubscriptionBackend};
use crate::{
    config::ServerOptions,
    middleware::SignatureMiddlewareFactory,
    routes::{
        AddToCartRoute,
        AllProductsRoute,
        ApplyDiscountCodeRoute,
        CancelSubscriptionRoute,
        CreateCartRoute,
        CreateSubscriptionRoute,
        GetSubscriptionRoute,
        NewOrderedProductRoute,
        SetNextShipmentDateRoute,
        SkipShipmentRoute,
        SubscriptionsRoute,
        SwapOrderedProductRoute,
        UpdateAddedProductRoute,
        UpdateOrderScheduleRoute,
        UpdateQuantityRoute,
    },
    server::{form_config, query_config},
};

// The request signing key for all endpoint tests. DO NOT re-use it anywhere.
pub const SECRET: &str = "sekrit";

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Vec<String>,
}

/// Builds an app-proxy style query string for `params`, signed with [`SECRET`].
pub fn signed_query(params: &[(&str, &str)]) -> String {
    let signature = calculate_signature(SECRET.as_bytes(), &canonicalize(params.iter().copied()));
    let mut query = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<String>>();
    query.push(format!("signature={signature}"));
    query.join("&")
}

/// The query string the storefront's app proxy adds to a request from customer #42.
pub fn proxy_query() -> String {
    signed_query(&[
        ("shop", "x.myshopify.com"),
        ("logged_in_customer_id", "42"),
        ("path_prefix", "/apps/subscriptions"),
        ("timestamp", "1700000000"),
    ])
}

/// Mounts all the subscription routes, behind the signature check, over the given mocks.
pub fn subscription_routes(
    backend: MockSubscriptionBackend,
    customers: MockCustomers,
) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        let scope = web::scope("/subscriptions")
            .wrap(SignatureMiddlewareFactory::new(Secret::from(SECRET), ServerOptions::default()))
            .service(SubscriptionsRoute::<MockSubscriptionBackend, MockCustomers>::new())
            .service(GetSubscriptionRoute::<MockSubscriptionBackend>::new())
            .service(SetNextShipmentDateRoute::<MockSubscriptionBackend>::new())
            .service(SkipShipmentRoute::<MockSubscriptionBackend>::new())
            .service(UpdateOrderScheduleRoute::<MockSubscriptionBackend>::new())
            .service(UpdateQuantityRoute::<MockSubscriptionBackend>::new())
            .service(SwapOrderedProductRoute::<MockSubscriptionBackend>::new())
            .service(UpdateAddedProductRoute::<MockSubscriptionBackend>::new())
            .service(NewOrderedProductRoute::<MockSubscriptionBackend>::new())
            .service(AddToCartRoute::<MockSubscriptionBackend>::new())
            .service(CancelSubscriptionRoute::<MockSubscriptionBackend>::new())
            .service(ApplyDiscountCodeRoute::<MockSubscriptionBackend>::new())
            .service(CreateSubscriptionRoute::<MockSubscriptionBackend>::new())
            .service(AllProductsRoute::<MockSubscriptionBackend>::new())
            .service(CreateCartRoute::<MockSubscriptionBackend>::new());
        cfg.app_data(web::Data::new(SubscriptionApi::new(backend))).app_data(web::Data::new(customers)).service(scope);
    }
}

pub async fn post_form<F>(path: &str, form: &str, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(form.to_string());
    send(req, configure).await
}

pub async fn get_request<F>(path: &str, cookie: Option<(&str, &str)>, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let mut req = TestRequest::get().uri(path);
    if let Some((name, value)) = cookie {
        req = req.cookie(actix_web::cookie::Cookie::new(name.to_string(), value.to_string()));
    }
    send(req, configure).await
}

async fn send<F>(req: TestRequest, configure: F) -> TestResponse
where F: FnOnce(&mut ServiceConfig) {
    let req = req.to_request();
    let app = App::new().app_data(form_config()).app_data(query_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request");
    match service.call(req).await {
        Ok(res) => {
            let status = res.status();
            let location = header_value(res.headers(), header::LOCATION);
            let set_cookie = res
                .headers()
                .get_all(header::SET_COOKIE)
                .filter_map(|v| v.to_str().ok().map(String::from))
                .collect();
            let body = test::read_body(res).await;
            TestResponse { status, body: String::from_utf8_lossy(&body).into_owned(), location, set_cookie }
        },
        // Errors raised by middleware surface here, rather than as a response
        Err(e) => {
            let res = e.error_response();
            let status = res.status();
            let body = res.into_body().try_into_bytes().unwrap();
            TestResponse {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
                location: None,
                set_cookie: vec![],
            }
        },
    }
}

fn header_value(headers: &header::HeaderMap, name: header::HeaderName) -> Option<String> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(String::from)
}

#[::core::prelude::v1::test]
fn signed_queries_match_the_storefront() {
    // Signature computed independently of this crate
    let query = signed_query(&[
        ("logged_in_customer_id", "42"),
        ("path_prefix", "/apps/subscriptions"),
        ("shop", "x.myshopify.com"),
        ("timestamp", "1700000000"),
    ]);
    assert_eq!(
        query,
        "logged_in_customer_id=42&path_prefix=%2Fapps%2Fsubscriptions&shop=x.myshopify.com&timestamp=1700000000&\
         signature=8509f7513da6284269b24360ef6d279bcb6f6c3b96d91bf1680651f60a8726ae"
    );
}
