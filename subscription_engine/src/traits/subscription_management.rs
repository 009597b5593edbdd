use serde_json::Value;

use crate::{
    subscription_types::{DiscountCode, NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    SubscriptionApiError,
};

/// The operations the bridge forwards to the subscription backend.
///
/// Methods returning a [`Value`] hand back the backend's complete JSON response (including any `errors` array) so that
/// it can be passed to the caller unmodified. An `Err` means the call itself failed: the backend could not be reached,
/// it answered with a non-success status, or its response was not JSON.
///
/// Ordered product requests may carry the per-subscription token, which authorises changes to that one subscription.
#[allow(async_fn_in_trait)]
pub trait SubscriptionManagement {
    /// Activated, paused and cancelled subscriptions for the customer with the given e-mail address.
    async fn subscriptions_for_email(&self, email: &str) -> Result<Value, SubscriptionApiError>;

    async fn fetch_subscription(&self, token: &str) -> Result<Value, SubscriptionApiError>;

    async fn update_ordered_product(&self, update: &OrderedProductUpdate) -> Result<Value, SubscriptionApiError>;

    async fn create_ordered_product(&self, product: &NewOrderedProduct) -> Result<Value, SubscriptionApiError>;

    async fn destroy_ordered_product(&self, ordered_product_id: &str) -> Result<Value, SubscriptionApiError>;

    /// Looks up a discount code. Unknown codes give `Ok(None)`.
    async fn fetch_discount_code(&self, code: &str) -> Result<Option<DiscountCode>, SubscriptionApiError>;

    /// Applies a promotion to a subscription, returning the user errors reported by the backend. An empty list means
    /// the promotion was applied.
    async fn apply_promotion(
        &self,
        promotion_id: &str,
        subscription_id: &str,
    ) -> Result<Vec<String>, SubscriptionApiError>;

    async fn create_subscription(&self, subscription: &NewSubscription) -> Result<Value, SubscriptionApiError>;

    async fn fetch_products(&self) -> Result<Value, SubscriptionApiError>;

    async fn create_cart(&self) -> Result<Value, SubscriptionApiError>;
}
