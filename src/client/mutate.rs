//! Patch-style mutations and backend error extraction
//!
//! The backend only accepts GET and POST from many proxies, so updates are
//! sent as POST with `x-method-override: PATCH`. Any 2xx answer is success;
//! an empty body (typically 204) means success without data.

use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::MaximoClient;
use crate::core::error::{ClientError, GENERIC_SERVER_MESSAGE};
use crate::core::session::cookie_header;

/// Header carrying the emulated HTTP method
pub const METHOD_OVERRIDE: &str = "x-method-override";

/// Header selecting merge semantics for child arrays
pub const PATCH_TYPE: &str = "patchtype";

/// How child arrays in a patch body are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchMode {
    /// Replace the listed attributes
    Replace,
    /// Add child records instead of replacing the collection
    Merge,
}

impl MaximoClient {
    /// POST `body` as a PATCH to `url`
    pub async fn patch(
        &self,
        url: &str,
        token: &str,
        body: &Value,
        mode: PatchMode,
    ) -> Result<Option<Value>, ClientError> {
        let mut request = self
            .post(url, token)
            .header(METHOD_OVERRIDE, "PATCH")
            .json(body);
        if mode == PatchMode::Merge {
            request = request.header(PATCH_TYPE, "MERGE");
        }
        self.send_mutation("PATCH", url, request).await
    }

    /// Plain JSON POST, used to create top-level records
    pub async fn post_json(
        &self,
        url: &str,
        token: &str,
        body: &Value,
    ) -> Result<Option<Value>, ClientError> {
        let request = self.post(url, token).json(body);
        self.send_mutation("POST", url, request).await
    }

    /// POST a text body with extra headers
    pub(crate) async fn post_text(
        &self,
        url: &str,
        token: &str,
        body: String,
        headers: &[(&'static str, String)],
    ) -> Result<Option<Value>, ClientError> {
        let mut request = self
            .post(url, token)
            .header(CONTENT_TYPE, "text/plain")
            .body(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        self.send_mutation("POST", url, request).await
    }

    /// DELETE a resource
    pub async fn delete(&self, url: &str, token: &str) -> Result<Option<Value>, ClientError> {
        let request = self
            .http
            .delete(url)
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookie_header(token));
        self.send_mutation("DELETE", url, request).await
    }

    async fn send_mutation(
        &self,
        method: &str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Option<Value>, ClientError> {
        debug!(%method, %url, "sending request");
        let response = request.send().await?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            return parse_success_body(status, &text);
        }

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message: error_message(&text).unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string()),
        })
    }
}

fn parse_success_body(status: StatusCode, text: &str) -> Result<Option<Value>, ClientError> {
    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(text)
        .map(Some)
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Pull the human readable message out of a backend error body
///
/// Recognized shapes, in order:
/// - `{"Error": {"message": "..."}}`
/// - `{"oslc:Error": {"oslc:message": "..."}}`
/// - `{"errorText": "..."}`
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let candidates = [
        value.pointer("/Error/message"),
        value.get("oslc:Error").and_then(|e| e.get("oslc:message")),
        value.get("errorText"),
    ];

    let found = candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|m| !m.is_empty())
        .map(str::to_string);
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"Error":{"message":"BMXAA4195E - Labor is required","statusCode":"400"}}"#)
                .as_deref(),
            Some("BMXAA4195E - Labor is required")
        );
        assert_eq!(
            error_message(r#"{"oslc:Error":{"oslc:message":"BMXAA0021E - bad session"}}"#)
                .as_deref(),
            Some("BMXAA0021E - bad session")
        );
        assert_eq!(
            error_message(r#"{"errorText":"something broke"}"#).as_deref(),
            Some("something broke")
        );
    }

    #[test]
    fn test_error_message_unreadable() {
        assert_eq!(error_message("<html>Proxy Error</html>"), None);
        assert_eq!(error_message(r#"{"Error":{"message":""}}"#), None);
        assert_eq!(error_message(r#"{"unrelated":true}"#), None);
    }

    #[test]
    fn test_success_body() {
        assert_eq!(parse_success_body(StatusCode::NO_CONTENT, "").unwrap(), None);
        assert_eq!(parse_success_body(StatusCode::OK, "  ").unwrap(), None);
        assert_eq!(
            parse_success_body(StatusCode::OK, r#"{"wonum":"1001"}"#).unwrap(),
            Some(serde_json::json!({"wonum": "1001"}))
        );
        assert!(parse_success_body(StatusCode::OK, "not json").is_err());
    }
}
