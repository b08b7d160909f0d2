//! URL construction for the OSLC backend

use url::Url;

use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

/// Hosts whose links are rewritten onto the configured base URL
const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Endpoint layout under one base URL and object structure
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    root: String,
    object_structure: String,
}

impl Endpoints {
    /// Validate `base_url` and build the endpoint set
    pub fn new(base_url: &str, object_structure: &str) -> Result<Self, ClientError> {
        let root = base_url.trim().trim_end_matches('/').to_string();
        let base = Url::parse(&root).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", base.scheme()),
            });
        }
        if base.host_str().is_none() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(Self {
            base,
            root,
            object_structure: object_structure.to_string(),
        })
    }

    /// The base URL without a trailing slash
    pub fn base(&self) -> &str {
        &self.root
    }

    pub fn object_structure(&self) -> &str {
        &self.object_structure
    }

    pub fn login(&self) -> String {
        format!("{}/login", self.root)
    }

    pub fn logout(&self) -> String {
        format!("{}/logout", self.root)
    }

    /// Work order API root (`{base}/os/{object_structure}`)
    pub fn api(&self) -> String {
        format!("{}/os/{}", self.root, self.object_structure)
    }

    /// A single work order resource
    pub fn work_order(&self, workorderid: &str) -> String {
        format!("{}/{}", self.api(), workorderid)
    }

    /// Child collection of a work order
    pub fn collection(&self, workorderid: &str, kind: ResourceKind) -> String {
        format!("{}?lean=1", self.child(workorderid, kind))
    }

    /// Child collection path without a query string
    pub fn child(&self, workorderid: &str, kind: ResourceKind) -> String {
        format!("{}/{}", self.work_order(workorderid), kind.path())
    }

    /// A URL with query parameters appended and encoded
    pub fn with_query(&self, url: &str, params: &[(&str, &str)]) -> Result<String, ClientError> {
        Url::parse_with_params(url, params)
            .map(String::from)
            .map_err(|e| ClientError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Point a backend-issued link at the configured server
    ///
    /// The backend reports detail links against its own loopback name when
    /// it sits behind a proxy. Such links, and relative paths, are moved onto
    /// the base URL's scheme, host and port. Other links are left alone.
    pub fn rebase(&self, link: &str) -> String {
        let parsed = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => match self.base.join(link) {
                Ok(url) => return url.to_string(),
                Err(_) => return link.to_string(),
            },
            Err(_) => return link.to_string(),
        };

        let loopback = parsed
            .host_str()
            .is_some_and(|h| LOOPBACK_HOSTS.contains(&h));
        if !loopback {
            return link.to_string();
        }

        let mut rebased = self.base.clone();
        rebased.set_path(parsed.path());
        rebased.set_query(parsed.query());
        rebased.set_fragment(None);
        rebased.to_string()
    }
}
