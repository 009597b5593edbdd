//! # Subscription engine public API
//!
//! * [`session_api`] records and looks up storefront sessions.
//! * [`subscription_api`] forwards subscription operations to the remote backend. Apart from the discount code flow
//!   (two remote calls with a decision in between) and the customer e-mail lookup, it is a thin, logged pass-through.
//!
//! As with the backend traits, an API instance is created by handing it a backend:
//!
//! ```rust,ignore
//! let api = SessionApi::new(MemorySessionStore::new());
//! api.record_session(session);
//! assert!(api.is_known_shop("my-shop.myshopify.com"));
//! ```
pub mod errors;
pub mod session_api;
pub mod subscription_api;
