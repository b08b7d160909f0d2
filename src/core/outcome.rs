//! Uniform `{success, data}` / `{success, error}` result shape
//!
//! Library calls return `Result`; `Outcome` is what crosses the boundary to
//! users and scripts (e.g. `mxf --format json`).

use serde::{Deserialize, Serialize};

use crate::core::error::{ClientError, ErrorKind};

/// Tagged success/failure wrapper around a remote call's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl<T> Outcome<T> {
    /// Successful call carrying a payload
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            kind: None,
        }
    }

    /// Successful call without a payload (e.g. HTTP 204)
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            kind: None,
        }
    }

    /// Failed call
    pub fn failed(err: &ClientError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
        }
    }

    /// Build from a mutation-style result whose payload may be absent
    pub fn from_optional(result: Result<Option<T>, ClientError>) -> Self {
        match result {
            Ok(Some(data)) => Self::ok(data),
            Ok(None) => Self::done(),
            Err(err) => Self::failed(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Error message, if this outcome is a failure
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            kind: self.kind,
        }
    }
}

impl<T> From<Result<T, ClientError>> for Outcome<T> {
    fn from(result: Result<T, ClientError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::failed(&err),
        }
    }
}
