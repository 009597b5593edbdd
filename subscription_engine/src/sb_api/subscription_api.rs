use std::fmt::Debug;

use log::*;
use serde_json::Value;

use crate::{
    subscription_types::{DiscountOutcome, NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    traits::{CustomerLookup, SubscriptionManagement},
    SubscriptionApiError,
};

pub struct SubscriptionApi<B> {
    backend: B,
}

impl<B: Debug> Debug for SubscriptionApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SubscriptionApi ({:?})", self.backend)
    }
}

impl<B> SubscriptionApi<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B> SubscriptionApi<B>
where B: SubscriptionManagement
{
    /// Fetches the subscriptions belonging to a storefront customer. The subscription backend knows customers by
    /// e-mail address, so the address is looked up on the storefront first.
    pub async fn subscriptions_for_customer<C: CustomerLookup>(
        &self,
        customer_id: &str,
        customers: &C,
    ) -> Result<Value, SubscriptionApiError> {
        let email = customers.customer_email(customer_id).await?.ok_or_else(|| {
            debug!("📦️ Customer {customer_id} does not have an e-mail address on the storefront");
            SubscriptionApiError::CustomerNotFound(customer_id.to_string())
        })?;
        trace!("📦️ Fetching subscriptions for customer {customer_id}");
        self.backend.subscriptions_for_email(&email).await
    }

    pub async fn fetch_subscription(&self, token: &str) -> Result<Value, SubscriptionApiError> {
        trace!("📦️ Fetching subscription");
        self.backend.fetch_subscription(token).await
    }

    pub async fn update_ordered_product(&self, update: &OrderedProductUpdate) -> Result<Value, SubscriptionApiError> {
        debug!("📦️ Updating ordered product {}", update.id);
        self.backend.update_ordered_product(update).await
    }

    pub async fn create_ordered_product(&self, product: &NewOrderedProduct) -> Result<Value, SubscriptionApiError> {
        debug!("📦️ Adding {} x product {} to a subscription", product.quantity, product.product_id);
        self.backend.create_ordered_product(product).await
    }

    pub async fn destroy_ordered_product(&self, ordered_product_id: &str) -> Result<Value, SubscriptionApiError> {
        debug!("📦️ Removing ordered product {ordered_product_id}");
        self.backend.destroy_ordered_product(ordered_product_id).await
    }

    /// Applies a discount code to a subscription.
    ///
    /// The code is looked up first. Expired codes stop here. Otherwise the code's promotion is applied to the
    /// subscription. Any failure along the way, including the backend being unreachable, counts as a rejected code.
    pub async fn apply_discount_code(&self, code: &str, subscription_id: &str) -> DiscountOutcome {
        let discount = match self.backend.fetch_discount_code(code).await {
            Ok(Some(d)) => d,
            Ok(None) => {
                debug!("📦️ Discount code does not exist");
                return DiscountOutcome::Rejected;
            },
            Err(e) => {
                warn!("📦️ Could not look up discount code. {e}");
                return DiscountOutcome::Rejected;
            },
        };
        if discount.expired {
            debug!("📦️ Discount code has expired");
            return DiscountOutcome::Expired;
        }
        let Some(promotion_id) = discount.promotion_id else {
            debug!("📦️ Discount code is not linked to a promotion");
            return DiscountOutcome::Rejected;
        };
        match self.backend.apply_promotion(&promotion_id, subscription_id).await {
            Ok(errors) if errors.is_empty() => {
                info!("📦️ Promotion {promotion_id} applied to subscription {subscription_id}");
                DiscountOutcome::Applied
            },
            Ok(errors) => {
                debug!("📦️ Promotion {promotion_id} was not applied. {}", errors.join(", "));
                DiscountOutcome::Rejected
            },
            Err(e) => {
                warn!("📦️ Could not apply promotion {promotion_id} to subscription {subscription_id}. {e}");
                DiscountOutcome::Rejected
            },
        }
    }

    pub async fn create_subscription(&self, subscription: &NewSubscription) -> Result<Value, SubscriptionApiError> {
        debug!("📦️ Creating a subscription with {} products", subscription.ordered_products.len());
        self.backend.create_subscription(subscription).await
    }

    pub async fn fetch_products(&self) -> Result<Value, SubscriptionApiError> {
        trace!("📦️ Fetching all products");
        self.backend.fetch_products().await
    }

    pub async fn create_cart(&self) -> Result<Value, SubscriptionApiError> {
        debug!("📦️ Creating a cart");
        self.backend.create_cart().await
    }
}
