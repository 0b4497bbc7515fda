//! Error handling for the icebreaker assistant

use std::fmt;
use thiserror::Error;

/// Unified error type for backend calls and component actions
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// An identity-scoped operation was attempted without a signed-in user
    #[error("Not authenticated")]
    AuthRequired,

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Database query errors
    #[error("Database error: {0}")]
    Database(String),

    /// Edge Function errors
    #[error("Function error: {0}")]
    Function(String),

    /// Non-success HTTP status returned by a backend service
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No resolved user identity; never retried
    AuthRequired,
    /// Anything the store, auth service or generation endpoint reported
    Backend,
    /// Local misconfiguration
    Config,
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new database error
    pub fn database<T: fmt::Display>(msg: T) -> Self {
        Error::Database(msg.to_string())
    }

    /// Create a new function error
    pub fn function<T: fmt::Display>(msg: T) -> Self {
        Error::Function(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AuthRequired => ErrorKind::AuthRequired,
            Error::Config(_) | Error::Url(_) => ErrorKind::Config,
            _ => ErrorKind::Backend,
        }
    }

    /// Whether this error means no user is signed in
    pub fn is_auth_required(&self) -> bool {
        self.kind() == ErrorKind::AuthRequired
    }
}
