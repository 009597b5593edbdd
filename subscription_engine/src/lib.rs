//! Subscription Engine
//!
//! The engine holds the logic of the storefront subscription bridge that does not depend on a web framework or on a
//! particular remote backend:
//!
//! 1. Request signature verification ([`mod@signature`]). Every storefront request to a protected route carries a
//!    `signature` parameter, which is checked against an HMAC of the other parameters before the request goes any
//!    further.
//! 2. The session registry ([`SessionApi`] over a [`SessionManagement`] backend). Storefronts that have completed the
//!    OAuth handshake are recorded here for the lifetime of the process. The handshake itself is behind the
//!    [`StorefrontAuthorization`] trait.
//! 3. The subscription API ([`SubscriptionApi`]), which forwards subscription operations to a [`SubscriptionManagement`]
//!    backend. The backend implementation lives in the `firmhouse_tools` crate.
pub mod session_types;
pub mod signature;
pub mod subscription_types;
pub mod traits;

mod sb_api;
mod session_store;

pub use sb_api::{
    errors::{OAuthError, SubscriptionApiError},
    session_api::SessionApi,
    subscription_api::SubscriptionApi,
};
pub use session_store::MemorySessionStore;
pub use signature::{check_signature, verify, SignatureError, SignedRequest, SIGNATURE_FIELD};
pub use traits::{CustomerLookup, SessionManagement, StorefrontAuthorization, SubscriptionManagement};
