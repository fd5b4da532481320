//! Error handling for API key extraction and the surrounding server.
//!
//! [`AuthError`] is the closed taxonomy returned by the extractor. [`Error`]
//! covers everything else the crate can fail at (configuration, IO, startup).

use actix_web::http::{header, StatusCode};
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why an API key could not be extracted from a request
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthError {
    /// The `Authorization` header is missing or empty
    #[error("no authorization header included")]
    NoAuthHeader,

    /// The `Authorization` header does not have the `ApiKey <token>` shape
    #[error("malformed authorization header")]
    MalformedHeader,
}

impl AuthError {
    /// Stable label for logs and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::NoAuthHeader => "no_auth_header",
            AuthError::MalformedHeader => "malformed_header",
        }
    }
}

/// Both kinds answer with the same body so clients cannot tell them apart.
impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, crate::auth::API_KEY_SCHEME))
            .json(serde_json::json!({
                "error": "unauthorized"
            }))
    }
}

/// Main error type for crate operations
#[derive(Error, Debug)]
pub enum Error {
    /// Credential extraction errors
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
