//! A client for the Firmhouse subscription GraphQL API.
//!
//! [`FirmhouseApi`] implements [`subscription_engine::SubscriptionManagement`], so it can back a
//! [`subscription_engine::SubscriptionApi`].
mod api;
mod config;
mod error;
pub mod queries;

pub use api::FirmhouseApi;
pub use config::{FirmhouseConfig, DEFAULT_GRAPHQL_URL};
pub use error::FirmhouseApiError;
