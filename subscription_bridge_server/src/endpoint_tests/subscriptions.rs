use actix_web::http::StatusCode;
use serde_json::{json, Value};
use subscription_engine::{subscription_types::DiscountCode, SubscriptionApiError};

use super::{
    helpers::{post_form, proxy_query, subscription_routes, TestResponse},
    mocks::{MockCustomers, MockSubscriptionBackend},
};

const OOPS: &str = r#"{"error":"Oops! Some error occurred"}"#;

async fn call(path: &str, form: &str, backend: MockSubscriptionBackend, customers: MockCustomers) -> TestResponse {
    let path = format!("/subscriptions{path}?{}", proxy_query());
    post_form(&path, form, subscription_routes(backend, customers)).await
}

fn json_body(res: &TestResponse) -> Value {
    serde_json::from_str(&res.body).expect("Response was not JSON")
}

fn mutation_result() -> Value {
    json!({"data": {"updateOrderedProduct": {"orderedProduct": {"id": "op-1"}, "errors": []}}})
}

#[actix_web::test]
async fn customer_subscriptions() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomers::new();
    customers.expect_customer_email().withf(|id| id == "42").returning(|_| Ok(Some("jane@example.com".into())));
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_subscriptions_for_email()
        .withf(|email| email == "jane@example.com")
        .times(1)
        .returning(|_| Ok(json!({"data": {"subscriptions": {"nodes": [{"id": "1", "token": "abc"}]}}})));
    let res = call("", "customer_id=42", backend, customers).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res), json!({"data": {"subscriptions": {"nodes": [{"id": "1", "token": "abc"}]}}}));
}

#[actix_web::test]
async fn customer_without_email() {
    let _ = env_logger::try_init().ok();
    let mut customers = MockCustomers::new();
    customers.expect_customer_email().returning(|_| Ok(None));
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_subscriptions_for_email().never();
    let res = call("", "customer_id=7", backend, customers).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, OOPS);
}

#[actix_web::test]
async fn remote_errors_are_passed_through() {
    let _ = env_logger::try_init().ok();
    // A GraphQL error is still a successful call. The caller gets the response as is.
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_fetch_subscription()
        .withf(|token| token == "sub-token")
        .returning(|_| Ok(json!({"data": {"getSubscription": null}, "errors": [{"message": "Not found"}]})));
    let res = call("/getSubscription", "token=sub-token", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res), json!({"data": {"getSubscription": null}, "errors": [{"message": "Not found"}]}));
}

#[actix_web::test]
async fn upstream_failure() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_fetch_subscription().returning(|_| {
        Err(SubscriptionApiError::RemoteStatus { status: 503, message: "upstream maintenance".into() })
    });
    let res = call("/getSubscription", "token=sub-token", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body, OOPS);
}

#[actix_web::test]
async fn set_next_shipment_date() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_update_ordered_product()
        .withf(|u| {
            u.id == "op-1" &&
                u.shipment_date.as_deref() == Some("2024-07-01") &&
                u.subscription_token.as_deref() == Some("tok") &&
                u.quantity.is_none()
        })
        .times(1)
        .returning(|_| Ok(mutation_result()));
    let form = "orderedProductId=op-1&nextShipmentDate=2024-07-01&subscriptionToken=tok";
    let res = call("/setNextShipmentDate", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res), mutation_result());
}

#[actix_web::test]
async fn update_order_schedule() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_update_ordered_product()
        .withf(|u| u.interval == Some(2) && u.interval_unit_of_measure.as_deref() == Some("months"))
        .returning(|_| Ok(mutation_result()));
    let form = "orderedProductId=op-1&interval=2&intervalUnitOfMeasure=months&subscriptionToken=tok";
    let res = call("/updateOrderSchedule", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn swap_ordered_product() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_update_ordered_product()
        .withf(|u| u.product_id.as_deref() == Some("p-9") && u.quantity == Some(3))
        .returning(|_| Ok(mutation_result()));
    let form = "orderedProductId=op-1&quantity=3&productId=p-9&subscriptionToken=tok";
    let res = call("/swapOrderedProduct", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn hostile_values_reach_the_backend_verbatim() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_update_ordered_product()
        .withf(|u| u.shipment_date.as_deref() == Some(r#"2024") { id } #"#))
        .returning(|_| Ok(mutation_result()));
    let form = "orderedProductId=op-1&nextShipmentDate=2024%22%29+%7B+id+%7D+%23&subscriptionToken=tok";
    let res = call("/skipShipment", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn malformed_form_body() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_update_ordered_product().never();
    let form = "orderedProductId=op-1&quantity=lots&subscriptionToken=tok";
    let res = call("/updateQuantity", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body.starts_with(r#"{"error":"Could not read request body"#));
}

#[actix_web::test]
async fn add_to_cart() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_create_ordered_product()
        .withf(|p| {
            p.product_id == "123" &&
                p.quantity == 2 &&
                p.subscription_id.as_deref() == Some("sub-1") &&
                p.subscription_token.is_none()
        })
        .returning(|_| Ok(json!({"data": {"createOrderedProduct": {"orderedProduct": {"id": "op-2"}}}})));
    let res = call("/addToCart", "productId=123&quantity=2&subscriptionId=sub-1", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn create_ordered_product() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_create_ordered_product()
        .withf(|p| p.subscription_id.is_none() && p.subscription_token.as_deref() == Some("tok"))
        .returning(|_| Ok(json!({"data": {"createOrderedProduct": {"orderedProduct": {"id": "op-3"}}}})));
    let res =
        call("/createOrderedProduct", "productId=123&quantity=1&subscriptionToken=tok", backend, MockCustomers::new())
            .await;
    assert_eq!(res.status, StatusCode::OK);
}

#[actix_web::test]
async fn cancel_subscription() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_destroy_ordered_product()
        .withf(|id| id == "op-1")
        .times(1)
        .returning(|_| Ok(json!({"data": {"destroyOrderedProduct": {"orderedProduct": {"id": "op-1"}}}})));
    let res = call("/cancelSubscription", "orderedProductId=op-1", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}

async fn apply_discount(backend: MockSubscriptionBackend) -> TestResponse {
    call("/applyDiscountCode", "discountCode=SUMMER&subscriptionId=sub-1", backend, MockCustomers::new()).await
}

#[actix_web::test]
async fn discount_code_applied() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_fetch_discount_code()
        .withf(|code| code == "SUMMER")
        .returning(|_| Ok(Some(DiscountCode { promotion_id: Some("promo-1".into()), expired: false })));
    backend
        .expect_apply_promotion()
        .withf(|promo, sub| promo == "promo-1" && sub == "sub-1")
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let res = apply_discount(backend).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Discount code applied successfully.");
}

#[actix_web::test]
async fn discount_code_expired() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_fetch_discount_code()
        .returning(|_| Ok(Some(DiscountCode { promotion_id: Some("promo-1".into()), expired: true })));
    backend.expect_apply_promotion().never();
    let res = apply_discount(backend).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Discount code expired");
}

#[actix_web::test]
async fn discount_code_rejected() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_fetch_discount_code()
        .returning(|_| Ok(Some(DiscountCode { promotion_id: Some("promo-1".into()), expired: false })));
    backend.expect_apply_promotion().returning(|_, _| Ok(vec!["Promotion already applied".into()]));
    let res = apply_discount(backend).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Invalid or used discount");

    // Remote failures look the same to the customer
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_fetch_discount_code().returning(|_| Err(SubscriptionApiError::Transport("timeout".into())));
    let res = apply_discount(backend).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, "Invalid or used discount");
}

#[actix_web::test]
async fn create_subscription() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_create_subscription()
        .withf(|s| {
            s.name == "Jane Doe" &&
                s.house_number == "12a" &&
                s.ordered_products.len() == 1 &&
                s.ordered_products[0].product_id == "123" &&
                s.ordered_products[0].quantity == 2 &&
                s.ordered_products[0].custom_price_cents == 1995
        })
        .times(1)
        .returning(|_| Ok(json!({"data": {"createSubscription": {"paymentUrl": "https://pay.example.com/x"}}})));
    let items = urlencoding::encode(r#"[{"firmhouseid":"123","quantity":2,"final_price":"1995"}]"#);
    let form = format!(
        "name=Jane+Doe&address=Main+St&houseNumber=12a&zipcode=1234AB&city=Utrecht&country=NL&email=jane%40example.com&\
         phoneNumber=0612345678&items={items}"
    );
    let res = call("/createSubscription", &form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res), json!({"data": {"createSubscription": {"paymentUrl": "https://pay.example.com/x"}}}));
}

#[actix_web::test]
async fn create_subscription_with_bad_items() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend.expect_create_subscription().never();
    let form = "name=Jane&address=Main+St&houseNumber=1&zipcode=1234AB&city=Utrecht&country=NL&email=jane%40example.com&\
                phoneNumber=0612345678&items=not-json";
    let res = call("/createSubscription", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn create_cart() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_create_cart()
        .times(1)
        .returning(|| Ok(json!({"data": {"createCart": {"subscription": {"token": "cart-1"}}}})));
    let res = call("/createCart", "", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res)["data"]["createCart"]["subscription"]["token"], "cart-1");
}

#[actix_web::test]
async fn all_products() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    let products = json!({"data": {"products": {"nodes": [{"id": "1", "title": "Coffee beans", "priceCents": 1295}]}}});
    let expected = products.clone();
    backend.expect_fetch_products().times(1).returning(move || Ok(products.clone()));
    let res = call("/getAllProducts", "", backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(json_body(&res), expected);
}

#[actix_web::test]
async fn update_added_product() {
    let _ = env_logger::try_init().ok();
    let mut backend = MockSubscriptionBackend::new();
    backend
        .expect_update_ordered_product()
        .withf(|u| {
            u.shipment_date.as_deref() == Some("2024-08-01") &&
                u.interval == Some(6) &&
                u.interval_unit_of_measure.as_deref() == Some("weeks")
        })
        .returning(|_| Ok(mutation_result()));
    let form = "orderedProductId=op-4&nextShipmentDate=2024-08-01&interval=6&intervalUnitOfMeasure=weeks&\
                subscriptionToken=tok";
    let res = call("/updateAddedProduct", form, backend, MockCustomers::new()).await;
    assert_eq!(res.status, StatusCode::OK);
}
