use subscription_engine::SubscriptionApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FirmhouseApiError {
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
}

impl From<FirmhouseApiError> for SubscriptionApiError {
    fn from(e: FirmhouseApiError) -> Self {
        match e {
            FirmhouseApiError::Initialization(s) => Self::Initialization(s),
            FirmhouseApiError::RequestError(s) | FirmhouseApiError::ResponseError(s) => Self::Transport(s),
            FirmhouseApiError::JsonError(s) => Self::JsonError(s),
            FirmhouseApiError::QueryError { status, message } => Self::RemoteStatus { status, message },
            FirmhouseApiError::InvalidGraphQL(s) => Self::InvalidQuery(s),
            FirmhouseApiError::GraphQLError(s) => Self::RemoteErrors(s),
        }
    }
}
