//! Configuration loading
//!
//! Settings come from `config.yaml` in the user config directory, with
//! environment variables layered on top:
//!
//! - `MXF_HOME` relocates both the config and data directories
//! - `MXF_BASE_URL` overrides the backend base URL

use directories::ProjectDirs;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::resource::FetchPolicy;
use crate::core::store::{base_url_override, KeyValueStore, StoreError};
use crate::yaml::{read_yaml_file, YamlError};

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:9080/maximo/oslc";

/// Environment variable relocating config and data directories
pub const HOME_ENV: &str = "MXF_HOME";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "MXF_BASE_URL";

/// Errors that can occur while loading configuration
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("Could not determine a home directory for mxfield")]
    #[diagnostic(code(mxf::config::home), help("set MXF_HOME to a writable directory"))]
    NoHome,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] YamlError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

/// Where mxfield keeps its files
#[derive(Debug, Clone)]
pub struct Paths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve directories from `MXF_HOME` or the platform defaults
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|h| !h.is_empty()) {
            return Ok(Self::under(Path::new(&home)));
        }

        let dirs = ProjectDirs::from("", "", "mxfield").ok_or(ConfigError::NoHome)?;
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        })
    }

    /// Keep everything under a single root
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.to_path_buf(),
            data_dir: root.join("data"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }

    pub fn store_file(&self) -> PathBuf {
        self.data_dir.join("store.yaml")
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OSLC root, e.g. `http://host:9080/maximo/oslc`
    pub base_url: Option<String>,

    /// Object structure exposing work orders (`/os/<name>`)
    pub object_structure: String,

    /// Work orders per page in list queries
    pub page_size: u32,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// How partial failures in collection expansion are handled
    pub fetch_policy: FetchPolicy,

    /// Root of the failure-prediction service (`<predict_url>/predict`)
    pub predict_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            object_structure: "MXWO".to_string(),
            page_size: 20,
            timeout_secs: 30,
            fetch_policy: FetchPolicy::AllOrNothing,
            predict_url: None,
        }
    }
}

impl Config {
    /// Load `config.yaml` from the discovered config directory
    pub fn load() -> Result<Self, ConfigError> {
        let paths = Paths::discover()?;
        Self::load_from(&paths.config_file())
    }

    /// Load from an explicit file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Ok(read_yaml_file::<Config>(path)?.unwrap_or_default())
    }

    /// Decide which base URL to use
    ///
    /// Precedence: explicit flag, `MXF_BASE_URL`, stored override, config
    /// file, built-in default.
    pub fn resolve_base_url(
        &self,
        flag: Option<&str>,
        store: &dyn KeyValueStore,
    ) -> Result<String, ConfigError> {
        if let Some(url) = flag.map(str::trim).filter(|u| !u.is_empty()) {
            return Ok(url.to_string());
        }
        if let Some(url) = std::env::var(BASE_URL_ENV)
            .ok()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
        {
            return Ok(url);
        }
        if let Some(url) = base_url_override(store)? {
            return Ok(url);
        }
        Ok(self
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
    }
}
