//! Backend traits for the subscription engine.
//!
//! * [`SessionManagement`] is the storage behind the session registry. [`crate::MemorySessionStore`] is the only
//!   implementation; sessions do not outlive the process.
//! * [`SubscriptionManagement`] is the remote subscription backend (the GraphQL API that owns subscriptions, ordered
//!   products, promotions and carts).
//! * [`CustomerLookup`] resolves storefront customer ids to e-mail addresses, which is how the subscription backend
//!   identifies its customers.
//! * [`StorefrontAuthorization`] is the storefront's OAuth handshake: the authorize redirect, and the callback checks
//!   followed by the code-for-token exchange.
mod customer_lookup;
mod session_management;
mod storefront_authorization;
mod subscription_management;

pub use customer_lookup::CustomerLookup;
pub use session_management::SessionManagement;
pub use storefront_authorization::StorefrontAuthorization;
pub use subscription_management::SubscriptionManagement;
