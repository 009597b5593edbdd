use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SubscriptionApiError {
    #[error("Could not initialize the remote API client. {0}")]
    Initialization(String),
    #[error("Could not reach the remote API. {0}")]
    Transport(String),
    #[error("The remote API returned status {status}. {message}")]
    RemoteStatus { status: u16, message: String },
    #[error("Invalid GraphQL document. {0}")]
    InvalidQuery(String),
    #[error("Could not deserialize the remote API response. {0}")]
    JsonError(String),
    #[error("The remote API reported errors. {0}")]
    RemoteErrors(String),
    #[error("Customer {0} could not be found")]
    CustomerNotFound(String),
    #[error("Invalid request data. {0}")]
    InvalidInput(String),
}

/// Reasons a storefront OAuth handshake can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthError {
    #[error("Invalid shop domain: {0}")]
    InvalidShop(String),
    #[error("Missing OAuth parameter: {0}")]
    MissingParameter(&'static str),
    #[error("The OAuth callback HMAC is invalid")]
    InvalidHmac,
    #[error("The OAuth state does not match the one issued for this browser")]
    StateMismatch,
    #[error("Could not exchange the authorization code for an access token. {0}")]
    TokenExchange(String),
}
