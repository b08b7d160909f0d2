//! Collection-then-detail fetching
//!
//! A work order's child collection only lists references. Each reference is
//! followed with its own GET; all detail requests run concurrently and are
//! awaited together.

use futures::future::join_all;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{decode_one, members, MaximoClient};
use crate::core::error::ClientError;
use crate::core::resource::{FetchPolicy, ResourceKind};

/// Details gathered from one collection
#[derive(Debug)]
pub struct Expanded<T> {
    /// Successfully fetched details, in collection order
    pub items: Vec<T>,
    /// Detail requests that failed; always empty under all-or-nothing
    pub failures: Vec<DetailFailure>,
}

impl<T> Expanded<T> {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

}

/// A detail link that could not be fetched or decoded
#[derive(Debug)]
pub struct DetailFailure {
    pub url: String,
    pub error: ClientError,
}

/// Links to follow from a collection document
///
/// `localref` is preferred, `href` is accepted. Members carrying neither are
/// skipped.
pub fn detail_links(collection: &Value) -> Result<Vec<String>, ClientError> {
    let links = members(collection)?
        .iter()
        .filter_map(|member| {
            let link = member
                .get("localref")
                .or_else(|| member.get("href"))
                .and_then(Value::as_str);
            if link.is_none() {
                warn!("collection member without a link, skipping");
            }
            link.map(str::to_string)
        })
        .collect();
    Ok(links)
}

impl MaximoClient {
    /// Fetch every detail record of a work order's child collection
    ///
    /// A failed collection request fails immediately with its status and no
    /// detail requests are made. Details that fail to load or to decode as
    /// `T` are handled per the client's [`FetchPolicy`].
    pub async fn fetch_expanded<T: DeserializeOwned>(
        &self,
        workorderid: &str,
        kind: ResourceKind,
        token: &str,
    ) -> Result<Expanded<T>, ClientError> {
        let collection_url = self.endpoints.collection(workorderid, kind);
        let collection = self.get_json(&collection_url, token).await?;

        let links: Vec<String> = detail_links(&collection)?
            .iter()
            .map(|link| self.endpoints.rebase(link))
            .collect();
        debug!(kind = %kind, count = links.len(), "following detail links");

        let results = join_all(links.iter().map(|url| self.get_json(url, token))).await;

        let mut items = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (url, result) in links.into_iter().zip(results) {
            match result.and_then(decode_one) {
                Ok(detail) => items.push(detail),
                Err(error) => match self.policy {
                    FetchPolicy::AllOrNothing => return Err(error),
                    FetchPolicy::BestEffort => {
                        warn!(%url, %error, "skipping {} that failed to load", kind.name());
                        failures.push(DetailFailure { url, error });
                    }
                },
            }
        }

        Ok(Expanded { items, failures })
    }

    /// Fetch a child collection in a single call with all attributes selected
    pub async fn fetch_direct(
        &self,
        workorderid: &str,
        kind: ResourceKind,
        token: &str,
    ) -> Result<Vec<Value>, ClientError> {
        let url = self.endpoints.with_query(
            &self.endpoints.child(workorderid, kind),
            &[("lean", "1"), ("oslc.select", "*")],
        )?;
        let collection = self.get_json(&url, token).await?;
        Ok(members(&collection)?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_links_prefers_localref() {
        let doc = json!({
            "member": [
                {"localref": "http://localhost/a", "href": "http://x/a"},
                {"href": "http://x/b"},
                {"other": 1}
            ]
        });
        assert_eq!(
            detail_links(&doc).unwrap(),
            vec!["http://localhost/a".to_string(), "http://x/b".to_string()]
        );
    }

    #[test]
    fn test_detail_links_empty_collection() {
        assert!(detail_links(&json!({"member": []})).unwrap().is_empty());
        assert!(detail_links(&json!({})).unwrap().is_empty());
    }
}
