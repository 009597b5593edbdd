//! GraphQL documents for the Firmhouse API, and the variables that go with them.
//!
//! Every user-supplied value travels in the `variables` object. The documents themselves are constant.
use serde_json::{json, Value};
use subscription_engine::subscription_types::{NewOrderedProduct, NewSubscription, OrderedProductUpdate};

const PRODUCT_DEF: &str = "{ id title priceWithSymbol imageUrl interval intervalUnitOfMeasure }";

/// The ordered product as returned by every `updateOrderedProduct` mutation.
fn ordered_product_def() -> String {
    format!("{{ id shipmentDate quantity product {PRODUCT_DEF} interval intervalUnitOfMeasure }}")
}

pub fn subscriptions_for_email() -> String {
    "query SubscriptionsForEmail($email: String!) { \
        subscriptions(email: $email, statuses: [ACTIVATED, PAUSED, CANCELLED]) { nodes { id token \
            orders { id status shipmentDate amountCents invoice { detailsUrl } } } } }"
        .to_string()
}

pub fn get_subscription() -> String {
    format!(
        "query GetSubscription($token: String!) {{ getSubscription(token: $token) {{ id name email fullAddress city \
            zipcode country paymentMethod orderedProducts {} orders {{ id amountCents shippingCostsCents }} }} }}",
        ordered_product_def()
    )
}

pub fn update_ordered_product() -> String {
    format!(
        "mutation UpdateOrderedProduct($input: UpdateOrderedProductInput!) {{ \
            updateOrderedProduct(input: $input) {{ orderedProduct {} }} }}",
        ordered_product_def()
    )
}

/// Adds a product to the subscription identified by the `X-Subscription-Token` header.
pub const CREATE_ORDERED_PRODUCT: &str = "mutation CreateOrderedProduct($input: CreateOrderedProductInput!) { \
                                          createOrderedProduct(input: $input) { orderedProduct { id shipmentDate \
                                          product { id title priceWithSymbol interval intervalUnitOfMeasure } \
                                          interval intervalUnitOfMeasure } } }";

/// Adds a product to a subscription given by id.
pub const ADD_TO_SUBSCRIPTION: &str = "mutation AddToSubscription($input: CreateOrderedProductInput!) { \
                                       createOrderedProduct(input: $input) { orderedProduct { productId quantity } \
                                       subscription { id } } }";

pub const DESTROY_ORDERED_PRODUCT: &str = "mutation DestroyOrderedProduct($input: DestroyOrderedProductInput!) { \
                                           destroyOrderedProduct(input: $input) { orderedProduct { id quantity \
                                           shipmentDate product { id title priceWithSymbol interval \
                                           intervalUnitOfMeasure } interval intervalUnitOfMeasure } } }";

pub const GET_DISCOUNT_CODE: &str =
    "query GetDiscountCode($code: String!) { getDiscountCode(code: $code) { promotionId expired } }";

pub const APPLY_PROMOTION: &str = "mutation ApplyPromotion($input: ApplyPromotionToSubscriptionInput!) { \
                                   applyPromotionToSubscription(input: $input) { appliedPromotion { id active } \
                                   errors { message } } }";

pub const CREATE_SUBSCRIPTION: &str = "mutation CreateSubscription($input: CreateSubscriptionInput!) { \
                                       createSubscription(input: $input) { paymentUrl \
                                       subscription { id token paymentMethod \
                                       orderedProducts { id productId interval intervalUnitOfMeasure } } \
                                       errors { attribute message path } } }";

pub const ALL_PRODUCTS: &str = "query Products { products { nodes { id title imageUrl interval intervalUnitOfMeasure \
                                priceWithSymbol productType } } }";

// Takes no input, so there are no variables either.
pub const CREATE_CART: &str =
    "mutation CreateCart { createCart(input: {}) { cart { token } subscription { id checkoutUrl } } }";

pub fn email_variables(email: &str) -> Value {
    json!({ "email": email })
}

pub fn token_variables(token: &str) -> Value {
    json!({ "token": token })
}

pub fn code_variables(code: &str) -> Value {
    json!({ "code": code })
}

pub fn update_variables(update: &OrderedProductUpdate) -> Value {
    json!({ "input": update })
}

pub fn create_ordered_product_variables(product: &NewOrderedProduct) -> Value {
    let mut input = json!({ "orderedProduct": { "productId": product.product_id, "quantity": product.quantity } });
    if let Some(id) = &product.subscription_id {
        input["subscriptionId"] = json!(id);
    }
    json!({ "input": input })
}

pub fn destroy_variables(ordered_product_id: &str) -> Value {
    json!({ "input": { "id": ordered_product_id } })
}

pub fn apply_promotion_variables(promotion_id: &str, subscription_id: &str) -> Value {
    json!({ "input": { "promotionId": promotion_id, "subscriptionId": subscription_id } })
}

pub fn create_subscription_variables(subscription: &NewSubscription, return_url: &str, payment_page_url: &str) -> Value {
    let mut input = json!(subscription);
    input["returnUrl"] = json!(return_url);
    input["paymentPageUrl"] = json!(payment_page_url);
    json!({ "input": input })
}
