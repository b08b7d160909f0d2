//! Client error type and failure classification
//!
//! Every remote call in [`crate::client`] returns `Result<T, ClientError>`.
//! At the user-facing boundary the error is folded into an
//! [`Outcome`](crate::core::Outcome) together with its [`ErrorKind`].

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::store::StoreError;

/// Message used when the backend rejects a call without a readable error body
pub const GENERIC_SERVER_MESSAGE: &str = "The server rejected the request. Please try again.";

/// Errors raised while talking to the OSLC backend
#[derive(Debug, Error, Diagnostic)]
pub enum ClientError {
    #[error("Username and password are both required")]
    #[diagnostic(
        code(mxf::auth::missing_credentials),
        help("pass --username and --password, or run `mxf login` without them to be prompted")
    )]
    MissingCredentials,

    #[error("Session expired or not logged in")]
    #[diagnostic(code(mxf::auth::session_expired), help("run `mxf login` to open a new session"))]
    SessionExpired,

    /// Login refused by the backend; carries its message verbatim
    #[error("{0}")]
    #[diagnostic(code(mxf::auth::rejected), help("check the username, password and base URL"))]
    LoginRejected(String),

    #[error("Request to {url} failed with HTTP {status}")]
    #[diagnostic(code(mxf::http::status))]
    Status { url: String, status: u16 },

    /// The backend answered with a structured error; `message` is its text verbatim
    #[error("{message}")]
    #[diagnostic(code(mxf::http::rejected))]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    #[diagnostic(
        code(mxf::http::network),
        help("check the base URL with `mxf config show` and your network connection")
    )]
    Network(String),

    #[error("Request timed out")]
    #[diagnostic(code(mxf::http::timeout), help("raise `timeout_secs` in config.yaml"))]
    Timeout,

    #[error("Invalid response from server: {0}")]
    #[diagnostic(code(mxf::http::invalid_response))]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    #[diagnostic(code(mxf::input))]
    InvalidInput(String),

    #[error("Invalid URL '{url}': {reason}")]
    #[diagnostic(code(mxf::config::url), help("base URLs look like http://host:port/maximo/oslc"))]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(mxf::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Classify this error into a coarse [`ErrorKind`]
    ///
    /// The variant decides first, then the HTTP status, and finally the text
    /// of a backend message is inspected.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::MissingCredentials => ErrorKind::MissingCredentials,
            ClientError::SessionExpired => ErrorKind::SessionExpired,
            ClientError::LoginRejected(_) => ErrorKind::Unauthorized,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Timeout => ErrorKind::Timeout,
            ClientError::InvalidResponse(_) => ErrorKind::InvalidResponse,
            ClientError::Status { status, .. } => {
                ErrorKind::from_status(*status).unwrap_or(ErrorKind::Server)
            }
            ClientError::Rejected { status, message } => ErrorKind::from_status(*status)
                .or_else(|| ErrorKind::classify_message(message))
                .unwrap_or(ErrorKind::Server),
            ClientError::InvalidInput(_)
            | ClientError::InvalidUrl { .. }
            | ClientError::Io { .. }
            | ClientError::Store(_)
            | ClientError::Config(_) => ErrorKind::Local,
        }
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } | ClientError::Rejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// True when the error means the stored session can no longer be used
    pub fn is_auth(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::SessionExpired | ErrorKind::Unauthorized | ErrorKind::MissingCredentials
        )
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ClientError::InvalidInput(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

/// Coarse failure categories surfaced to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingCredentials,
    SessionExpired,
    Unauthorized,
    Network,
    Timeout,
    NotFound,
    Server,
    InvalidResponse,
    Local,
}

impl ErrorKind {
    /// Map an HTTP status to a category when the status alone is conclusive
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            401 => Some(ErrorKind::SessionExpired),
            403 => Some(ErrorKind::Unauthorized),
            404 => Some(ErrorKind::NotFound),
            408 | 504 => Some(ErrorKind::Timeout),
            _ => None,
        }
    }

    /// Categorize a free-form backend or transport message
    pub fn classify_message(message: &str) -> Option<Self> {
        let msg = message.to_lowercase();

        if msg.contains("missing") && (msg.contains("credentials") || msg.contains("username")) {
            Some(ErrorKind::MissingCredentials)
        } else if (msg.contains("session") && (msg.contains("expired") || msg.contains("invalid")))
            || msg.contains("bmxaa0021e")
        {
            Some(ErrorKind::SessionExpired)
        } else if msg.contains("unauthorized")
            || msg.contains("credentials")
            || msg.contains("not authorized")
            || msg.contains("access denied")
        {
            Some(ErrorKind::Unauthorized)
        } else if msg.contains("timeout") || msg.contains("timed out") {
            Some(ErrorKind::Timeout)
        } else if msg.contains("network") || msg.contains("connection refused") {
            Some(ErrorKind::Network)
        } else if msg.contains("not found") || msg.contains("does not exist") {
            Some(ErrorKind::NotFound)
        } else {
            None
        }
    }

    /// Short user-facing explanation for the category
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::MissingCredentials => "Please enter both a username and a password.",
            ErrorKind::SessionExpired => "Your session has expired. Please log in again.",
            ErrorKind::Unauthorized => "You are not authorized to perform this action.",
            ErrorKind::Network => "Unable to reach the server. Check your connection.",
            ErrorKind::Timeout => "The server took too long to respond.",
            ErrorKind::NotFound => "The requested record was not found.",
            ErrorKind::Server => GENERIC_SERVER_MESSAGE,
            ErrorKind::InvalidResponse => "The server returned an unexpected response.",
            ErrorKind::Local => "The request could not be prepared.",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::MissingCredentials => write!(f, "missing_credentials"),
            ErrorKind::SessionExpired => write!(f, "session_expired"),
            ErrorKind::Unauthorized => write!(f, "unauthorized"),
            ErrorKind::Network => write!(f, "network"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Server => write!(f, "server"),
            ErrorKind::InvalidResponse => write!(f, "invalid_response"),
            ErrorKind::Local => write!(f, "local"),
        }
    }
}
