use std::time::Duration;

use log::*;
use ssb_common::{env_or_default, env_secret, Secret};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    /// The storefront whose Admin API is queried for customer details.
    pub shop: String,
    pub admin_access_token: Secret<String>,
    pub api_version: String,
    /// The app's client id, used in the OAuth handshake.
    pub api_key: String,
    /// The app's client secret. It keys the OAuth callback HMAC and the app proxy request signatures.
    pub api_secret: Secret<String>,
    pub scopes: String,
    /// The public base URL of this app, e.g. `https://subscriptions.example.com`. OAuth redirects come back here.
    pub app_host: String,
    pub timeout: Duration,
}

impl Default for ShopifyConfig {
    fn default() -> Self {
        Self {
            shop: "example.myshopify.com".to_string(),
            admin_access_token: Secret::default(),
            api_version: "2024-04".to_string(),
            api_key: String::default(),
            api_secret: Secret::default(),
            scopes: "read_customers".to_string(),
            app_host: "https://localhost:9000".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ShopifyConfig {
    pub fn new_from_env_or_default() -> Self {
        let shop = env_or_default("SSB_SHOPIFY_SHOP", "example.myshopify.com");
        let api_version = env_or_default("SSB_SHOPIFY_API_VERSION", "2024-04");
        let admin_access_token = env_secret("SSB_SHOPIFY_ADMIN_ACCESS_TOKEN");
        let api_key = env_or_default("SSB_SHOPIFY_API_KEY", "");
        let api_secret = env_secret("SSB_SHOPIFY_API_SECRET");
        let scopes = env_or_default("SSB_SHOPIFY_API_SCOPES", "read_customers");
        let app_host = env_or_default("SSB_APP_HOST", "https://localhost:9000").trim_end_matches('/').to_string();
        let timeout = std::env::var("SSB_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for SSB_UPSTREAM_TIMEOUT_SECS ({s}). {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { shop, admin_access_token, api_version, api_key, api_secret, scopes, app_host, timeout }
    }
}
