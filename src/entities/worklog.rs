//! Work log entries

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::entity::{require, SubRecord};
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

/// A work log entry attached to a work order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkLogEntry {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub worklogid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_longdescription: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logtype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub createby: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub createdate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clientviewable: Option<bool>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// New work log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkLog {
    pub description: String,

    /// e.g. CLIENTNOTE, WORK, UPDATE
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logtype: Option<String>,

    #[serde(default)]
    pub clientviewable: bool,
}

impl SubRecord for NewWorkLog {
    const KIND: ResourceKind = ResourceKind::WorkLog;

    fn validate(&self) -> Result<(), ClientError> {
        require("description", &self.description)
    }
}
