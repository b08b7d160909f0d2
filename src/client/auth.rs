//! Session login and logout

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{ACCEPT, SET_COOKIE};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::mutate::error_message;
use super::MaximoClient;
use crate::core::error::{ClientError, GENERIC_SERVER_MESSAGE};
use crate::core::session::{token_from_set_cookie, Session};
use crate::core::store::{clear_session, load_session, save_session, KeyValueStore};

/// Header carrying base64 `username:password` on login
pub const MAXAUTH: &str = "maxauth";

const BAD_CREDENTIALS: &str = "Invalid username or password.";

/// Encode credentials for the `maxauth` header
pub fn maxauth_value(username: &str, password: &str) -> String {
    STANDARD.encode(format!("{}:{}", username, password))
}

impl MaximoClient {
    /// Exchange credentials for a session token and persist it
    ///
    /// Any previously stored session is discarded first, so a failed login
    /// leaves the user logged out.
    pub async fn login(
        &self,
        store: &mut dyn KeyValueStore,
        username: &str,
        password: &str,
    ) -> Result<Session, ClientError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::MissingCredentials);
        }

        clear_session(store)?;

        let url = self.endpoints.login();
        debug!(method = "POST", %url, %username, "logging in");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(MAXAUTH, maxauth_value(username, password))
            .send()
            .await?;
        let status = response.status();
        debug!(method = "POST", %url, status = status.as_u16(), "received response");

        if status == StatusCode::OK {
            let token = response
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .find_map(token_from_set_cookie)
                .ok_or(ClientError::SessionExpired)?;

            let session = Session::new(username, password, token);
            save_session(store, &session)?;
            info!(%username, "logged in");
            return Ok(session);
        }

        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::LoginRejected(
                message.unwrap_or_else(|| BAD_CREDENTIALS.to_string()),
            )),
            _ => Err(ClientError::Rejected {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string()),
            }),
        }
    }

    /// End the session
    ///
    /// The backend is told on a best-effort basis; the stored session is
    /// cleared whether or not that succeeds.
    pub async fn logout(&self, store: &mut dyn KeyValueStore) -> Result<(), ClientError> {
        let session = match load_session(store) {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "discarding unreadable session");
                None
            }
        };

        if let Some(session) = &session {
            let url = self.endpoints.logout();
            debug!(method = "POST", %url, "logging out");
            match self.post(&url, &session.token).send().await {
                Ok(response) if response.status().is_success() => {}
                Ok(response) => {
                    warn!(status = response.status().as_u16(), "server rejected logout")
                }
                Err(e) => warn!(error = %e, "could not reach server to log out"),
            }
        }

        clear_session(store)?;
        if let Some(session) = session {
            info!(username = %session.username, "logged out");
        }
        Ok(())
    }
}
