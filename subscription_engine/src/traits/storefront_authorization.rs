use std::collections::HashMap;

use crate::{
    session_types::{AuthorizationRequest, ShopSession, VerifiedCallback},
    OAuthError,
};

#[allow(async_fn_in_trait)]
pub trait StorefrontAuthorization {
    /// Builds the authorize URL for `shop` along with a fresh `state` nonce. The caller must hold on to the nonce
    /// until the callback arrives.
    fn begin_auth(&self, shop: &str, callback_path: &str) -> Result<AuthorizationRequest, OAuthError>;

    /// Checks an OAuth callback against `expected_state` (the nonce issued by [`Self::begin_auth`]) and exchanges the
    /// authorization code for a session. An empty `expected_state` never matches.
    async fn validate_callback(
        &self,
        params: &HashMap<String, String>,
        expected_state: &str,
    ) -> Result<(ShopSession, VerifiedCallback), OAuthError>;
}
