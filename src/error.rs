// Client error types
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between the operator and the campaign backend
#[derive(Error, Debug)]
pub enum ClientError {
    // Import payload could not be decoded
    #[error("Invalid import payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    // Import payload decoded to zero usable contacts
    #[error("Import payload contains no valid contacts")]
    EmptyPayload,

    // 401 from any endpoint, or a guarded command with no session
    #[error("Not authenticated, run `campaign auth login` first")]
    Unauthenticated,

    // Any other non-2xx response
    #[error("Server responded with {status}")]
    Server { status: StatusCode },

    // Connection refused, DNS, TLS, body read failures
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    // 2xx response whose body did not have the expected shape
    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn server(status: StatusCode) -> Self {
        ClientError::Server { status }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        ClientError::Decode(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        ClientError::Config(message.into())
    }

    /// Get error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ClientError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            ClientError::EmptyPayload => "EMPTY_PAYLOAD",
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Server { .. } => "SERVER_ERROR",
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
            ClientError::Io(_) => "IO_ERROR",
        }
    }

    /// True for failures reported by or on the way to the backend
    pub fn is_network_or_server(&self) -> bool {
        matches!(
            self,
            ClientError::Server { .. } | ClientError::Network(_) | ClientError::Decode(_)
        )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
