//! Request objects for the subscription backend.
//!
//! These carry the user-supplied fields of each remote operation. The remote collaborator serialises them into GraphQL
//! variables; they never get spliced into query documents.
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sb_api::errors::SubscriptionApiError;

/// Changes to an existing ordered product (a line in a subscription). Unset fields are left out of the update.
///
/// The subscription token is sent alongside the update, never as part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedProductUpdate {
    #[serde(skip)]
    pub subscription_token: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval_unit_of_measure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl OrderedProductUpdate {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into(), ..Default::default() }
    }

    pub fn shipment_date<S: Into<String>>(mut self, date: S) -> Self {
        self.shipment_date = Some(date.into());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn schedule<S: Into<String>>(mut self, interval: i64, unit: S) -> Self {
        self.interval = Some(interval);
        self.interval_unit_of_measure = Some(unit.into());
        self
    }

    pub fn product<S: Into<String>>(mut self, product_id: S) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    pub fn with_token(mut self, subscription_token: Option<String>) -> Self {
        self.subscription_token = subscription_token.filter(|t| !t.is_empty());
        self
    }
}

/// A product to add to a subscription. Without a `subscription_id`, the backend identifies the subscription from the
/// subscription token sent alongside the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrderedProduct {
    pub product_id: String,
    pub quantity: i64,
    pub subscription_id: Option<String>,
    pub subscription_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionItem {
    pub product_id: String,
    pub quantity: i64,
    pub custom_price_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    pub address: String,
    pub house_number: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub email: String,
    pub phone_number: String,
    pub ordered_products: Vec<SubscriptionItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub promotion_id: Option<String>,
    #[serde(default)]
    pub expired: bool,
}

/// The result of trying to apply a discount code to a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountOutcome {
    Applied,
    Expired,
    Rejected,
}

impl Display for DiscountOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Applied => f.write_str("Discount code applied successfully."),
            Self::Expired => f.write_str("Discount code expired"),
            Self::Rejected => f.write_str("Invalid or used discount"),
        }
    }
}

/// Parses the cart items that the storefront sends when creating a subscription, e.g.
/// `[{"firmhouseid": "123", "quantity": 2, "final_price": 1995}]`.
///
/// Liquid templates are loose about types, so each field may be a JSON string or a number.
pub fn parse_storefront_items(json: &str) -> Result<Vec<SubscriptionItem>, SubscriptionApiError> {
    #[derive(Deserialize)]
    struct StorefrontItem {
        firmhouseid: Value,
        quantity: Value,
        final_price: Value,
    }
    let items = serde_json::from_str::<Vec<StorefrontItem>>(json)
        .map_err(|e| SubscriptionApiError::InvalidInput(format!("Invalid cart items. {e}")))?;
    items
        .into_iter()
        .map(|item| {
            Ok(SubscriptionItem {
                product_id: scalar_to_string(&item.firmhouseid, "firmhouseid")?,
                quantity: scalar_to_i64(&item.quantity, "quantity")?,
                custom_price_cents: scalar_to_i64(&item.final_price, "final_price")?,
            })
        })
        .collect()
}

fn scalar_to_string(value: &Value, field: &str) -> Result<String, SubscriptionApiError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(SubscriptionApiError::InvalidInput(format!("'{field}' must be a string or number"))),
    }
}

fn scalar_to_i64(value: &Value, field: &str) -> Result<i64, SubscriptionApiError> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| SubscriptionApiError::InvalidInput(format!("'{field}' must be an integer, not {value}")))
}
