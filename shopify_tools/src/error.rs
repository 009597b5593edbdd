use subscription_engine::SubscriptionApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShopifyApiError {
    #[error("Could not initialize client: {0}")]
    Initialization(String),
    #[error("Invalid request: {0}")]
    RequestError(String),
    #[error("Invalid response: {0}")]
    ResponseError(String),
    #[error("Could not deserialize JSON: {0}")]
    JsonError(String),
    #[error("Query failed. Error {status}. {message}")]
    QueryError { status: u16, message: String },
    #[error("Invalid GraphQL query: {0}")]
    InvalidGraphQL(String),
    #[error("GraphQL query failed: {0}")]
    GraphQLError(String),
    #[error("The GraphQL response was empty")]
    EmptyResponse,
}

impl From<ShopifyApiError> for SubscriptionApiError {
    fn from(e: ShopifyApiError) -> Self {
        match e {
            ShopifyApiError::Initialization(s) => Self::Initialization(s),
            ShopifyApiError::RequestError(s) | ShopifyApiError::ResponseError(s) => Self::Transport(s),
            ShopifyApiError::JsonError(s) => Self::JsonError(s),
            ShopifyApiError::QueryError { status, message } => Self::RemoteStatus { status, message },
            ShopifyApiError::InvalidGraphQL(s) => Self::InvalidQuery(s),
            ShopifyApiError::GraphQLError(s) => Self::RemoteErrors(s),
            ShopifyApiError::EmptyResponse => Self::RemoteErrors("empty response".into()),
        }
    }
}
