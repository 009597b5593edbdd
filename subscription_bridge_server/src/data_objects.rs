//! Request bodies and query strings accepted by the server.
//!
//! Storefront forms use camelCase field names, except for `customer_id`.
use serde::{Deserialize, Serialize};
use subscription_engine::{
    subscription_types::{parse_storefront_items, NewOrderedProduct, NewSubscription, OrderedProductUpdate},
    SubscriptionApiError,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopQuery {
    pub shop: Option<String>,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerParams {
    pub customer_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionTokenParams {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDateParams {
    pub ordered_product_id: String,
    pub next_shipment_date: String,
    pub subscription_token: Option<String>,
}

impl From<ShipmentDateParams> for OrderedProductUpdate {
    fn from(p: ShipmentDateParams) -> Self {
        OrderedProductUpdate::new(p.ordered_product_id)
            .shipment_date(p.next_shipment_date)
            .with_token(p.subscription_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleParams {
    pub ordered_product_id: String,
    pub interval: i64,
    pub interval_unit_of_measure: String,
    pub subscription_token: Option<String>,
}

impl From<ScheduleParams> for OrderedProductUpdate {
    fn from(p: ScheduleParams) -> Self {
        OrderedProductUpdate::new(p.ordered_product_id)
            .schedule(p.interval, p.interval_unit_of_measure)
            .with_token(p.subscription_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityParams {
    pub ordered_product_id: String,
    pub quantity: i64,
    pub subscription_token: Option<String>,
}

impl From<QuantityParams> for OrderedProductUpdate {
    fn from(p: QuantityParams) -> Self {
        OrderedProductUpdate::new(p.ordered_product_id).quantity(p.quantity).with_token(p.subscription_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapProductParams {
    pub ordered_product_id: String,
    pub quantity: i64,
    pub product_id: String,
    pub subscription_token: Option<String>,
}

impl From<SwapProductParams> for OrderedProductUpdate {
    fn from(p: SwapProductParams) -> Self {
        OrderedProductUpdate::new(p.ordered_product_id)
            .quantity(p.quantity)
            .product(p.product_id)
            .with_token(p.subscription_token)
    }
}

/// Reschedules a product that was added to a subscription after sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedProductParams {
    pub ordered_product_id: String,
    pub next_shipment_date: String,
    pub interval: i64,
    pub interval_unit_of_measure: String,
    pub subscription_token: Option<String>,
}

impl From<AddedProductParams> for OrderedProductUpdate {
    fn from(p: AddedProductParams) -> Self {
        OrderedProductUpdate::new(p.ordered_product_id)
            .shipment_date(p.next_shipment_date)
            .schedule(p.interval, p.interval_unit_of_measure)
            .with_token(p.subscription_token)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderedProductParams {
    pub product_id: String,
    pub quantity: i64,
    pub subscription_token: Option<String>,
}

impl From<NewOrderedProductParams> for NewOrderedProduct {
    fn from(p: NewOrderedProductParams) -> Self {
        NewOrderedProduct {
            product_id: p.product_id,
            quantity: p.quantity,
            subscription_id: None,
            subscription_token: p.subscription_token.filter(|t| !t.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartParams {
    pub product_id: String,
    pub quantity: i64,
    pub subscription_id: String,
}

impl From<AddToCartParams> for NewOrderedProduct {
    fn from(p: AddToCartParams) -> Self {
        NewOrderedProduct {
            product_id: p.product_id,
            quantity: p.quantity,
            subscription_id: Some(p.subscription_id),
            subscription_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelParams {
    pub ordered_product_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountParams {
    pub discount_code: String,
    pub subscription_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriptionParams {
    pub name: String,
    pub address: String,
    pub house_number: String,
    pub zipcode: String,
    pub city: String,
    pub country: String,
    pub email: String,
    pub phone_number: String,
    /// The storefront cart, as a JSON array. See [`parse_storefront_items`].
    pub items: String,
}

impl TryFrom<NewSubscriptionParams> for NewSubscription {
    type Error = SubscriptionApiError;

    fn try_from(p: NewSubscriptionParams) -> Result<Self, Self::Error> {
        let ordered_products = parse_storefront_items(&p.items)?;
        Ok(NewSubscription {
            name: p.name,
            address: p.address,
            house_number: p.house_number,
            zipcode: p.zipcode,
            city: p.city,
            country: p.country,
            email: p.email,
            phone_number: p.phone_number,
            ordered_products,
        })
    }
}
