use crate::SubscriptionApiError;

#[allow(async_fn_in_trait)]
pub trait CustomerLookup {
    /// Fetches the e-mail address of a storefront customer. `customer_id` is the numeric id (not the global id) that
    /// the storefront passes to the app. Returns `None` if the customer does not exist or has no e-mail address.
    async fn customer_email(&self, customer_id: &str) -> Result<Option<String>, SubscriptionApiError>;
}
