//! # apikey-auth
//!
//! Extraction of API key credentials from HTTP `Authorization` headers.
//!
//! Clients send `Authorization: ApiKey <token>`. [`get_api_key`] turns a
//! request's headers into the candidate [`ApiKey`], or an [`AuthError`]
//! saying why it could not. Verifying the key is left to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use apikey_auth::{get_api_key, AuthError};
//!
//! let headers = [("Authorization", "ApiKey test-api-key")];
//! assert_eq!(get_api_key(&headers).unwrap().as_str(), "test-api-key");
//!
//! let headers = [("Authorization", "Bearer test-api-key")];
//! assert_eq!(get_api_key(&headers), Err(AuthError::MalformedHeader));
//! ```
//!
//! With actix-web, take [`ApiKey`] as a handler argument:
//!
//! ```rust,no_run
//! use actix_web::{web, App, HttpResponse};
//! use apikey_auth::ApiKey;
//!
//! async fn handler(key: ApiKey) -> HttpResponse {
//!     HttpResponse::Ok().body(format!("hello {}", key.redacted()))
//! }
//!
//! let app = App::new().route("/", web::get().to(handler));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod server;
pub mod utils;

// Re-export main types for convenience
pub use auth::{get_api_key, parse_authorization, ApiKey, HeaderSet};
pub use config::Config;
pub use error::{AuthError, Error, Result};
pub use server::AuthServer;

/// Default server information
pub const SERVER_NAME: &str = "apikey-auth";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
