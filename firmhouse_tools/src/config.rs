use std::time::Duration;

use log::*;
use ssb_common::{env_or_default, env_secret, Secret};

pub const DEFAULT_GRAPHQL_URL: &str = "https://portal.firmhouse.com/graphql";
const DEFAULT_RETURN_URL: &str = "https://example.myshopify.com/pages/order-confirmation";
const DEFAULT_PAYMENT_PAGE_URL: &str = "http://example.com/cart";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FirmhouseConfig {
    pub graphql_url: String,
    /// Sent as `X-Project-Access-Token` on every request.
    pub project_access_token: Secret<String>,
    /// Where customers land after completing payment for a new subscription.
    pub return_url: String,
    pub payment_page_url: String,
    pub timeout: Duration,
}

impl Default for FirmhouseConfig {
    fn default() -> Self {
        Self {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            project_access_token: Secret::default(),
            return_url: DEFAULT_RETURN_URL.to_string(),
            payment_page_url: DEFAULT_PAYMENT_PAGE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl FirmhouseConfig {
    pub fn new_from_env_or_default() -> Self {
        let graphql_url = env_or_default("SSB_FIRMHOUSE_GRAPHQL_URL", DEFAULT_GRAPHQL_URL);
        let project_access_token = env_secret("SSB_FIRMHOUSE_PROJECT_ACCESS_TOKEN");
        let return_url = env_or_default("SSB_FIRMHOUSE_RETURN_URL", DEFAULT_RETURN_URL);
        let payment_page_url = env_or_default("SSB_FIRMHOUSE_PAYMENT_PAGE_URL", DEFAULT_PAYMENT_PAGE_URL);
        let timeout = std::env::var("SSB_UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid value for SSB_UPSTREAM_TIMEOUT_SECS ({s}). {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Self { graphql_url, project_access_token, return_url, payment_page_url, timeout }
    }
}
