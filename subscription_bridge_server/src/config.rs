use std::env;

use firmhouse_tools::FirmhouseConfig;
use log::*;
use shopify_tools::ShopifyConfig;
use ssb_common::env_flag;

use crate::errors::ServerError;

const DEFAULT_SSB_HOST: &str = "127.0.0.1";
const DEFAULT_SSB_PORT: u16 = 9000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// If true, the X-Forwarded-For header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_x_forwarded_for: bool,
    /// If true, the Forwarded header will be used to determine the client's IP address, rather than the
    /// connection's remote address.
    pub use_forwarded: bool,
    /// Storefront configuration. The app's client secret doubles as the request signing key.
    pub shopify_config: ShopifyConfig,
    /// Subscription backend configuration
    pub firmhouse_config: FirmhouseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SSB_HOST.to_string(),
            port: DEFAULT_SSB_PORT,
            use_x_forwarded_for: false,
            use_forwarded: false,
            shopify_config: ShopifyConfig::default(),
            firmhouse_config: FirmhouseConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SSB_HOST").ok().unwrap_or_else(|| DEFAULT_SSB_HOST.into());
        let port = env::var("SSB_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SSB_PORT. {e} Using the default, {DEFAULT_SSB_PORT}, instead."
                    );
                    DEFAULT_SSB_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SSB_PORT);
        let use_x_forwarded_for = env_flag("SSB_USE_X_FORWARDED_FOR", false);
        let use_forwarded = env_flag("SSB_USE_FORWARDED", false);
        let shopify_config = ShopifyConfig::new_from_env_or_default();
        let firmhouse_config = FirmhouseConfig::new_from_env_or_default();
        Self { host, port, use_x_forwarded_for, use_forwarded, shopify_config, firmhouse_config }
    }

    /// Checks the settings that the server cannot run without.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.shopify_config.api_secret.is_empty() {
            return Err(ServerError::ConfigurationError(
                "SSB_SHOPIFY_API_SECRET is not set. Without it, no storefront request can be authenticated.".into(),
            ));
        }
        if self.firmhouse_config.project_access_token.is_empty() {
            warn!("🪛️ SSB_FIRMHOUSE_PROJECT_ACCESS_TOKEN is not set. The subscription backend will refuse our calls.");
        }
        if self.shopify_config.admin_access_token.is_empty() {
            warn!("🪛️ SSB_SHOPIFY_ADMIN_ACCESS_TOKEN is not set. Customer e-mail lookups will fail.");
        }
        Ok(())
    }
}

//-------------------------------------------------  ServerOptions  ----------------------------------------------------
/// A subset of the server configuration that is used to configure the server's behaviour. Generally we try to keep this
/// as small as possible, and exclude secrets to avoid passing sensitive information around the system.
#[derive(Clone, Copy, Debug, Default)]
pub struct ServerOptions {
    pub use_x_forwarded_for: bool,
    pub use_forwarded: bool,
}

impl ServerOptions {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self { use_x_forwarded_for: config.use_x_forwarded_for, use_forwarded: config.use_forwarded }
    }
}
