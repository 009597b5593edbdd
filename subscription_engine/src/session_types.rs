use std::fmt::Display;

use chrono::{DateTime, Utc};
use ssb_common::Secret;

/// The authenticated context for one storefront, as issued by the storefront's OAuth handshake.
///
/// The access token is wrapped in a [`Secret`], so a `ShopSession` can be logged safely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopSession {
    /// The storefront identifier, e.g. `my-shop.myshopify.com`. This is the registry key.
    pub shop: String,
    pub access_token: Secret<String>,
    /// Comma-separated list of the scopes that were granted.
    pub scope: String,
    pub is_online: bool,
    /// Only online (per-user) tokens expire.
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ShopSession {
    pub fn new(shop: impl Into<String>, access_token: Secret<String>, scope: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            access_token,
            scope: scope.into(),
            is_online: false,
            expires_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.is_online = true;
        self.expires_at = Some(expires_at);
        self
    }

    pub fn scopes(&self) -> Vec<&str> {
        self.scope.split(',').map(str::trim).filter(|s| !s.is_empty()).collect()
    }
}

/// Where to send the merchant to approve the app, and the nonce that must come back on the callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// The parameters of a callback that passed all the local checks, ready for the token exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedCallback {
    pub shop: String,
    pub code: String,
    pub host: Option<String>,
}

impl Display for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = if self.is_online { "online" } else { "offline" };
        write!(f, "{} ({kind}, scope: {}, created {})", self.shop, self.scope, self.created_at)
    }
}
