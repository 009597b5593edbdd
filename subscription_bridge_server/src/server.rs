use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use firmhouse_tools::FirmhouseApi;
use log::*;
use shopify_tools::{ShopifyApi, ShopifyOAuth};
use subscription_engine::{MemorySessionStore, SessionApi, SubscriptionApi};

use crate::{
    config::{ServerConfig, ServerOptions},
    errors::ServerError,
    middleware::SignatureMiddlewareFactory,
    oauth_routes::{AuthCallbackRoute, BeginAuthRoute},
    routes::{
        health,
        test_route,
        AddToCartRoute,
        AllProductsRoute,
        ApplyDiscountCodeRoute,
        CancelSubscriptionRoute,
        CreateCartRoute,
        CreateSubscriptionRoute,
        GetSubscriptionRoute,
        LandingRoute,
        NewOrderedProductRoute,
        SetNextShipmentDateRoute,
        SkipShipmentRoute,
        SubscriptionsRoute,
        SwapOrderedProductRoute,
        UpdateAddedProductRoute,
        UpdateOrderScheduleRoute,
        UpdateQuantityRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;
    let srv = create_server_instance(config)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: ServerConfig) -> Result<Server, ServerError> {
    let firmhouse = FirmhouseApi::new(config.firmhouse_config.clone())
        .map_err(|e| ServerError::InitializeError(format!("Subscription backend client: {e}")))?;
    let shopify = ShopifyApi::new(config.shopify_config.clone())
        .map_err(|e| ServerError::InitializeError(format!("Storefront client: {e}")))?;
    let oauth = ShopifyOAuth::new(config.shopify_config.clone())
        .map_err(|e| ServerError::InitializeError(format!("OAuth client: {e}")))?;
    // One registry for the whole process. Clones share the same sessions.
    let sessions = MemorySessionStore::new();
    let options = ServerOptions::from_config(&config);
    let secret = config.shopify_config.api_secret.clone();
    info!("📦️ Forwarding subscription requests to {}", config.firmhouse_config.graphql_url);
    let srv = HttpServer::new(move || {
        let subscription_api = SubscriptionApi::new(firmhouse.clone());
        let session_api = SessionApi::new(sessions.clone());
        let subscriptions_scope = web::scope("/subscriptions")
            .wrap(SignatureMiddlewareFactory::new(secret.clone(), options))
            .service(SubscriptionsRoute::<FirmhouseApi, ShopifyApi>::new())
            .service(GetSubscriptionRoute::<FirmhouseApi>::new())
            .service(SetNextShipmentDateRoute::<FirmhouseApi>::new())
            .service(SkipShipmentRoute::<FirmhouseApi>::new())
            .service(UpdateOrderScheduleRoute::<FirmhouseApi>::new())
            .service(UpdateQuantityRoute::<FirmhouseApi>::new())
            .service(SwapOrderedProductRoute::<FirmhouseApi>::new())
            .service(UpdateAddedProductRoute::<FirmhouseApi>::new())
            .service(NewOrderedProductRoute::<FirmhouseApi>::new())
            .service(AddToCartRoute::<FirmhouseApi>::new())
            .service(CancelSubscriptionRoute::<FirmhouseApi>::new())
            .service(ApplyDiscountCodeRoute::<FirmhouseApi>::new())
            .service(CreateSubscriptionRoute::<FirmhouseApi>::new())
            .service(AllProductsRoute::<FirmhouseApi>::new())
            .service(CreateCartRoute::<FirmhouseApi>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ssb::access_log"))
            .wrap(Cors::permissive())
            .app_data(form_config())
            .app_data(query_config())
            .app_data(web::Data::new(subscription_api))
            .app_data(web::Data::new(session_api))
            .app_data(web::Data::new(shopify.clone()))
            .app_data(web::Data::new(oauth.clone()))
            .service(health)
            .service(test_route)
            .service(BeginAuthRoute::<ShopifyOAuth>::new())
            .service(AuthCallbackRoute::<MemorySessionStore, ShopifyOAuth>::new())
            .service(LandingRoute::<MemorySessionStore>::new())
            .service(subscriptions_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}

/// Malformed form bodies are answered with a 400 and a JSON error, like every other client error.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request with malformed form body. {err}");
        ServerError::InvalidRequestBody(err.to_string()).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!("💻️ Rejecting request with malformed query string. {err}");
        ServerError::InvalidRequestPath(err.to_string()).into()
    })
}
