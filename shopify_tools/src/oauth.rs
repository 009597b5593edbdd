use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use log::*;
use rand::RngCore;
use reqwest::Client;
use subscription_engine::{
    session_types::{AuthorizationRequest, ShopSession, VerifiedCallback},
    signature::calculate_signature,
    OAuthError,
    StorefrontAuthorization,
};

use crate::{
    config::ShopifyConfig,
    data_objects::AccessTokenResponse,
    helpers::{constant_time_eq, is_valid_shop_domain, oauth_message},
};

/// Runs the storefront's authorization-code OAuth flow for this app.
///
/// [`StorefrontAuthorization::begin_auth`] produces the URL that the merchant is sent to, together with a `state` nonce
/// that the caller must remember (e.g. in a cookie). When Shopify redirects back,
/// [`StorefrontAuthorization::validate_callback`] checks the callback and exchanges the authorization code for an
/// access token.
#[derive(Clone)]
pub struct ShopifyOAuth {
    config: ShopifyConfig,
    client: Arc<Client>,
}

impl std::fmt::Debug for ShopifyOAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ShopifyOAuth (client_id: {}, redirects to {})", self.config.api_key, self.config.app_host)
    }
}

impl ShopifyOAuth {
    pub fn new(config: ShopifyConfig) -> Result<Self, OAuthError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| OAuthError::TokenExchange(format!("Could not create HTTP client. {e}")))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Performs the local checks on an OAuth callback: the HMAC over the query parameters, the shop domain, and the
    /// `state` nonce. Nothing is sent over the network.
    pub fn verify_callback(
        &self,
        params: &HashMap<String, String>,
        expected_state: &str,
    ) -> Result<VerifiedCallback, OAuthError> {
        let hmac = params.get("hmac").ok_or(OAuthError::MissingParameter("hmac"))?;
        let expected_hmac = calculate_signature(self.config.api_secret.as_bytes(), &oauth_message(params));
        if self.config.api_secret.is_empty() || !constant_time_eq(&expected_hmac, hmac) {
            return Err(OAuthError::InvalidHmac);
        }
        let shop = params.get("shop").ok_or(OAuthError::MissingParameter("shop"))?;
        if !is_valid_shop_domain(shop) {
            return Err(OAuthError::InvalidShop(shop.clone()));
        }
        let state = params.get("state").ok_or(OAuthError::MissingParameter("state"))?;
        if expected_state.is_empty() || !constant_time_eq(expected_state, state) {
            return Err(OAuthError::StateMismatch);
        }
        let code = params.get("code").ok_or(OAuthError::MissingParameter("code"))?;
        Ok(VerifiedCallback { shop: shop.clone(), code: code.clone(), host: params.get("host").cloned() })
    }

    /// Exchanges an authorization code for an access token.
    pub async fn exchange_code(&self, shop: &str, code: &str) -> Result<ShopSession, OAuthError> {
        let url = format!("https://{shop}/admin/oauth/access_token");
        let body = serde_json::json!({
            "client_id": self.config.api_key,
            "client_secret": self.config.api_secret.reveal(),
            "code": code,
        });
        trace!("🛍️️ Requesting access token for {shop}");
        let response =
            self.client.post(url).json(&body).send().await.map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(OAuthError::TokenExchange(format!("Error {status}. {message}")));
        }
        let token = response.json::<AccessTokenResponse>().await.map_err(|e| OAuthError::TokenExchange(e.to_string()))?;
        let mut session = ShopSession::new(shop, token.access_token, token.scope);
        if let Some(expires_at) = expiry_from(token.expires_in, Utc::now()) {
            session = session.with_expiry(expires_at);
        }
        info!("🛍️️ Received an access token for {shop}");
        Ok(session)
    }
}

impl StorefrontAuthorization for ShopifyOAuth {
    fn begin_auth(&self, shop: &str, callback_path: &str) -> Result<AuthorizationRequest, OAuthError> {
        if !is_valid_shop_domain(shop) {
            return Err(OAuthError::InvalidShop(shop.to_string()));
        }
        let state = new_nonce();
        let redirect_uri = format!("{}{callback_path}", self.config.app_host);
        let url = format!(
            "https://{shop}/admin/oauth/authorize?client_id={}&scope={}&redirect_uri={}&state={state}",
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&self.config.scopes),
            urlencoding::encode(&redirect_uri),
        );
        debug!("🛍️️ Starting OAuth for {shop}");
        Ok(AuthorizationRequest { url, state })
    }

    async fn validate_callback(
        &self,
        params: &HashMap<String, String>,
        expected_state: &str,
    ) -> Result<(ShopSession, VerifiedCallback), OAuthError> {
        let callback = self.verify_callback(params, expected_state)?;
        let session = self.exchange_code(&callback.shop, &callback.code).await?;
        Ok((session, callback))
    }
}

/// The expiry time of a token that lives for `expires_in` seconds from `now`. Lifetimes that are out of range for a
/// timestamp are treated as never expiring.
fn expiry_from(expires_in: Option<i64>, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let secs = expires_in?;
    let expires_at = Duration::try_seconds(secs).and_then(|d| now.checked_add_signed(d));
    if expires_at.is_none() {
        warn!("🛍️️ Ignoring out-of-range token lifetime of {secs}s");
    }
    expires_at
}

fn new_nonce() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
