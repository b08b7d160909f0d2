//! Work order activities (child tasks)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::entity::{require, SubRecord, WorkOrderStatus};
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub workorderid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taskid: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assetnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assetnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
}

impl SubRecord for NewActivity {
    const KIND: ResourceKind = ResourceKind::Activity;

    fn validate(&self) -> Result<(), ClientError> {
        require("description", &self.description)
    }
}
