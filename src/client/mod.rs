//! Async client for the OSLC REST backend
//!
//! Every call takes the session token explicitly and returns
//! `Result<_, ClientError>`; nothing is cached between calls.

pub mod attachments;
pub mod auth;
pub mod endpoints;
pub mod fetch;
pub mod mutate;
pub mod predict;
pub mod records;
pub mod workorders;

pub use endpoints::Endpoints;
pub use fetch::{DetailFailure, Expanded};

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::RequestBuilder;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::core::config::Config;
use crate::core::error::ClientError;
use crate::core::resource::FetchPolicy;
use crate::core::session::cookie_header;

/// Client bound to one backend
#[derive(Debug, Clone)]
pub struct MaximoClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    policy: FetchPolicy,
    page_size: u32,
    predict_url: Option<String>,
}

impl MaximoClient {
    /// Create a client with default settings
    pub fn new(base_url: &str, object_structure: &str) -> Result<Self, ClientError> {
        let defaults = Config::default();
        Self::build(
            Endpoints::new(base_url, object_structure)?,
            Duration::from_secs(defaults.timeout_secs),
        )
    }

    /// Create a client from loaded configuration and a resolved base URL
    pub fn from_config(config: &Config, base_url: &str) -> Result<Self, ClientError> {
        let client = Self::build(
            Endpoints::new(base_url, &config.object_structure)?,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(client
            .with_policy(config.fetch_policy)
            .with_page_size(config.page_size)
            .with_predict_url(config.predict_url.clone()))
    }

    fn build(endpoints: Endpoints, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mxfield/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoints,
            policy: FetchPolicy::default(),
            page_size: Config::default().page_size,
            predict_url: None,
        })
    }

    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_predict_url(mut self, url: Option<String>) -> Self {
        self.predict_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    /// GET carrying the JSON accept header and session cookie
    fn get(&self, url: &str, token: &str) -> RequestBuilder {
        self.http
            .get(url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookie_header(token))
    }

    /// POST carrying the JSON accept header and session cookie
    fn post(&self, url: &str, token: &str) -> RequestBuilder {
        self.http
            .post(url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookie_header(token))
    }

    /// GET a JSON document, failing on any non-success status
    pub(crate) async fn get_json(&self, url: &str, token: &str) -> Result<Value, ClientError> {
        debug!(method = "GET", %url, "sending request");
        let response = self.get(url, token).send().await?;
        let status = response.status();
        debug!(method = "GET", %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

/// The `member` array of a collection document
///
/// A document without `member` is treated as an empty collection.
pub(crate) fn members(document: &Value) -> Result<&[Value], ClientError> {
    match document.get("member") {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ClientError::InvalidResponse(format!(
            "expected 'member' to be an array, found {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Deserialize one JSON record
pub(crate) fn decode_one<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Deserialize a list of JSON records into typed values
pub(crate) fn decode_all<T: serde::de::DeserializeOwned>(
    values: Vec<Value>,
) -> Result<Vec<T>, ClientError> {
    values.into_iter().map(decode_one).collect()
}
