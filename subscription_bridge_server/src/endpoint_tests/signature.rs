use actix_web::http::StatusCode;
use serde_json::{json, Value};

use super::{
    helpers::{post_form, proxy_query, signed_query, subscription_routes},
    mocks::{MockCustomers, MockSubscriptionBackend},
};

const UNAUTHENTICATED: &str = r#"{"error":"Unauthenticated request"}"#;

/// A backend that must not be reached.
fn untouched_backend() -> MockSubscriptionBackend {
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_fetch_products().never();
    backend
}

fn products_backend() -> MockSubscriptionBackend {
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_fetch_products().times(1).returning(|| Ok(json!({"data": {"products": {"nodes": []}}})));
    backend
}

async fn get_all_products(query: &str, backend: MockSubscriptionBackend) -> (StatusCode, String) {
    let path = format!("/subscriptions/getAllProducts?{query}");
    let res = post_form(&path, "", subscription_routes(backend, MockCustomers::new())).await;
    (res.status, res.body)
}

#[actix_web::test]
async fn signed_request_is_admitted() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_all_products(&proxy_query(), products_backend()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"data": {"products": {"nodes": []}}}));
}

#[actix_web::test]
async fn known_signature_is_admitted() {
    let _ = env_logger::try_init().ok();
    // Parameter order in the query string does not matter
    let query = "shop=x.myshopify.com&code=abc&signature=0efd927ea52e85b1275b7182014344f539c1cd3d2150538bf225f88975858e50";
    let (status, _) = get_all_products(query, products_backend()).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn missing_signature() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_all_products("shop=x.myshopify.com&code=abc", untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);
    let (status, body) = get_all_products("", untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn empty_signature() {
    let _ = env_logger::try_init().ok();
    let (status, body) = get_all_products("shop=x.myshopify.com&signature=", untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn signature_without_parameters() {
    let _ = env_logger::try_init().ok();
    // This is the signature of the empty string. It still must not pass.
    let query = "signature=be677180f95dc834bc70fcab998bb73b0b1cfcc34918ff0793f337479d0f685b";
    let (status, body) = get_all_products(query, untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn tampered_parameters() {
    let _ = env_logger::try_init().ok();
    let query = "shop=x.myshopify.com&code=abd&signature=0efd927ea52e85b1275b7182014344f539c1cd3d2150538bf225f88975858e50";
    let (status, body) = get_all_products(query, untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);

    // Adding a parameter invalidates the signature too
    let query = format!("{}&logged_in_customer_id=43", proxy_query());
    let (status, body) = get_all_products(&query, untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, UNAUTHENTICATED);
}

#[actix_web::test]
async fn signature_from_another_key() {
    let _ = env_logger::try_init().ok();
    // HMAC-SHA256("sekrit", "code=abdshop=x.myshopify.com") belongs to different parameters
    let query = "shop=x.myshopify.com&code=abc&signature=104832e7d11a6c2f4a1de77e260cad2626e4d54af67412329b40f4fcc9efac00";
    let (status, _) = get_all_products(query, untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn uppercase_signature_is_rejected() {
    let _ = env_logger::try_init().ok();
    let query = "shop=x.myshopify.com&code=abc&signature=0EFD927EA52E85B1275B7182014344F539C1CD3D2150538BF225F88975858E50";
    let (status, _) = get_all_products(query, untouched_backend()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn every_subscription_route_is_guarded() {
    let _ = env_logger::try_init().ok();
    let paths = [
        "",
        "/getSubscription",
        "/setNextShipmentDate",
        "/skipShipment",
        "/updateOrderSchedule",
        "/updateQuantity",
        "/swapOrderedProduct",
        "/updateAddedProduct",
        "/createOrderedProduct",
        "/addToCart",
        "/cancelSubscription",
        "/applyDiscountCode",
        "/createSubscription",
        "/getAllProducts",
        "/createCart",
    ];
    for path in paths {
        let path = format!("/subscriptions{path}?shop=x.myshopify.com&signature=nope");
        let res = post_form(&path, "customer_id=42", subscription_routes(MockSubscriptionBackend::new(), MockCustomers::new())).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{path} was not guarded");
        assert_eq!(res.body, UNAUTHENTICATED);
    }
}

#[test]
fn signed_query_helper_signs_all_parameters() {
    let query = signed_query(&[("shop", "x.myshopify.com")]);
    assert_eq!(query, "shop=x.myshopify.com&signature=21438abe26f8aa5a2a0042bf12e9b64b533a3f498d1cf74bd2f9ffad53f3b7e9");
}
