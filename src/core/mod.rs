//! Core module - fundamental types and utilities

pub mod config;
pub mod entity;
pub mod error;
pub mod outcome;
pub mod resource;
pub mod session;
pub mod store;

pub use config::{Config, ConfigError, Paths};
pub use entity::{SubRecord, WorkOrderStatus};
pub use error::{ClientError, ErrorKind};
pub use outcome::Outcome;
pub use resource::{FetchPolicy, ResourceKind};
pub use session::Session;
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
