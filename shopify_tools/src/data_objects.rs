use serde::Deserialize;
use ssb_common::Secret;

#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    pub access_token: Secret<String>,
    #[serde(default)]
    pub scope: String,
    /// Only present for online (per-user) tokens.
    pub expires_in: Option<i64>,
}
