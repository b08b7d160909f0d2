//! Per-invocation state shared by commands

use crate::cli::GlobalOpts;
use crate::client::MaximoClient;
use crate::core::config::{Config, Paths};
use crate::core::error::ClientError;
use crate::core::session::Session;
use crate::core::store::{load_session, FileStore};

/// Loaded configuration, local store and resolved backend
pub struct Context {
    pub paths: Paths,
    pub config: Config,
    pub store: FileStore,
    pub base_url: String,
}

impl Context {
    pub fn load(global: &GlobalOpts) -> Result<Self, ClientError> {
        let paths = Paths::discover()?;
        let config = Config::load_from(&paths.config_file())?;
        let store = FileStore::open(paths.store_file())?;
        let base_url = config.resolve_base_url(global.base_url.as_deref(), &store)?;

        Ok(Self {
            paths,
            config,
            store,
            base_url,
        })
    }

    /// Client for the resolved base URL
    pub fn client(&self) -> Result<MaximoClient, ClientError> {
        MaximoClient::from_config(&self.config, &self.base_url)
    }

    /// The stored session, or `SessionExpired` if nobody is logged in
    pub fn session(&self) -> Result<Session, ClientError> {
        load_session(&self.store)?.ok_or(ClientError::SessionExpired)
    }

    /// Client plus session token, for commands that talk to the backend
    pub fn connect(&self) -> Result<(MaximoClient, String), ClientError> {
        let session = self.session()?;
        Ok((self.client()?, session.token))
    }
}
