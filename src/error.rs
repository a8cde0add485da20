//! Error types for the vPOS client

use thiserror::Error;

/// Result type alias for vPOS operations
pub type Result<T> = std::result::Result<T, VposError>;

/// Main error type for vPOS operations
#[derive(Error, Debug)]
pub enum VposError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The connection to the gateway could not be established
    #[error("HTTP {method} {url} failed with: {message}")]
    Connect {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The request did not complete within the configured timeout
    #[error("HTTP {method} {url} timed out")]
    Timeout { method: &'static str, url: String },

    /// The gateway answered with a status code outside the accepted range
    #[error("HTTP {method} {url} failed with status {status} - Response: {body}{}", params_suffix(.params))]
    UnexpectedStatus {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
        params: Option<String>,
    },

    /// The gateway response body could not be interpreted
    #[error("Invalid gateway response: {message}")]
    InvalidResponse { message: String },

    /// The creation response carried no usable `Location` header
    #[error("could not retrieve transaction ID from VPOS response")]
    MissingTransactionId,

    /// Unknown status reason code
    #[error("status reason not found: {code}")]
    StatusReasonNotFound { code: i64 },

    /// Transaction type outside the set accepted by an operation
    #[error("invalid transaction type: {kind}")]
    InvalidTransactionType { kind: String },

    /// Invalid header name or value
    #[error("Invalid header: {message}")]
    InvalidHeader { message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn params_suffix(params: &Option<String>) -> String {
    match params {
        Some(params) => format!(", Params: {}", params),
        None => String::new(),
    }
}

impl VposError {
    /// Create an invalid response error
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Create an invalid transaction type error
    pub fn invalid_transaction_type(kind: impl Into<String>) -> Self {
        Self::InvalidTransactionType { kind: kind.into() }
    }

    /// Create an invalid header error
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify a transport failure raised while talking to `url`
    pub(crate) fn transport(method: &'static str, url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                method,
                url: url.to_string(),
            }
        } else if err.is_connect() {
            Self::Connect {
                method,
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Http(err)
        }
    }

    /// HTTP status code reported by the gateway, if this error carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
