//! Storefront (Shopify) integration: the app's OAuth handshake, and Admin API queries.
mod api;
mod config;
mod data_objects;
mod error;
pub mod helpers;
mod oauth;

pub use api::ShopifyApi;
pub use config::ShopifyConfig;
pub use data_objects::AccessTokenResponse;
pub use error::ShopifyApiError;
pub use oauth::ShopifyOAuth;
