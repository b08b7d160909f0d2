//! Session credential issued by the backend at login

use serde::{Deserialize, Serialize};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// A logged-in session
///
/// Serialized as `{"username", "password", "sessionCookie"}` in the store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub password: String,
    #[serde(rename = "sessionCookie")]
    pub token: String,
}

impl Session {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            token: token.into(),
        }
    }

    /// Value for the `Cookie` request header
    pub fn cookie_header(&self) -> String {
        cookie_header(&self.token)
    }
}

/// Format a session token as a `Cookie` header value
pub fn cookie_header(token: &str) -> String {
    format!("{}={}", SESSION_COOKIE, token)
}

/// Extract the session token from one `Set-Cookie` header value
pub fn token_from_set_cookie(header: &str) -> Option<String> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() == SESSION_COOKIE && !value.trim().is_empty() {
        Some(value.trim().to_string())
    } else {
        None
    }
}

// Never print secrets
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let session = Session::new("wilson", "pw", "abc123");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["sessionCookie"], "abc123");
        assert_eq!(json["username"], "wilson");
    }

    #[test]
    fn test_cookie_header() {
        let session = Session::new("wilson", "pw", "abc123");
        assert_eq!(session.cookie_header(), "JSESSIONID=abc123");
    }

    #[test]
    fn test_token_from_set_cookie() {
        assert_eq!(
            token_from_set_cookie("JSESSIONID=0000xyz:-1; Path=/; HttpOnly").as_deref(),
            Some("0000xyz:-1")
        );
        assert_eq!(token_from_set_cookie("LtpaToken2=abc; Path=/"), None);
        assert_eq!(token_from_set_cookie("JSESSIONID=; Path=/"), None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let session = Session::new("wilson", "hunter2", "tok");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok\""));
        assert!(debug.contains("wilson"));
    }
}
