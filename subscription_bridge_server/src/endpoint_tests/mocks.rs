use std::collections::HashMap;

use mockall::mock;
use serde_json::Value;
use subscription_engine::{
    session_types::{AuthorizationRequest, ShopSession, VerifiedCallback},
    subscription_types::{DiscountCode, NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    CustomerLookup,
    OAuthError,
    StorefrontAuthorization,
    SubscriptionApiError,
    SubscriptionManagement,
};

mock! {
    pub SubscriptionBackend {}
    impl SubscriptionManagement for SubscriptionBackend {
        async fn subscriptions_for_email(&self, email: &str) -> Result<Value, SubscriptionApiError>;
        async fn fetch_subscription(&self, token: &str) -> Result<Value, SubscriptionApiError>;
        async fn update_ordered_product(&self, update: &OrderedProductUpdate) -> Result<Value, SubscriptionApiError>;
        async fn create_ordered_product(&self, product: &NewOrderedProduct) -> Result<Value, SubscriptionApiError>;
        async fn destroy_ordered_product(&self, ordered_product_id: &str) -> Result<Value, SubscriptionApiError>;
        async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, SubscriptionApiError>;
        async fn apply_promotion(&self, promotion_id: &str, subscription_id: &str) -> Result<Vec<String>, SubscriptionApiError>;
        async fn create_subscription(&self, subscription: &NewSubscription) -> Result<Value, SubscriptionApiError>;
        async fn fetch_products(&self) -> Result<Value, SubscriptionApiError>;
        async fn create_cart(&self) -> Result<Value, SubscriptionApiError>;
    }
}

mock! {
    pub Customers {}
    impl CustomerLookup for Customers {
        async fn customer_email(&self, customer_id: &str) -> Result<Option<String>, SubscriptionApiError>;
    }
}

mock! {
    pub StorefrontAuth {}
    impl StorefrontAuthorization for StorefrontAuth {
        fn begin_auth(&self, shop: &str, callback_path: &str) -> Result<AuthorizationRequest, OAuthError>;
        async fn validate_callback(&self, params: &HashMap<String, String>, expected_state: &str) -> Result<(ShopSession, VerifiedCallback), OAuthError>;
    }
}
