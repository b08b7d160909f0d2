//! Work order entity type

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::entity::{require, WorkOrderStatus};
use crate::core::error::ClientError;

/// Attributes selected by every work order query
pub const WORK_ORDER_FIELDS: &[&str] = &[
    "workorderid",
    "wonum",
    "description",
    "status",
    "status_description",
    "location",
    "siteid",
    "wopriority",
    "calcpriority",
    "worktype",
    "failurecode",
    "problemcode",
    "reportedby",
    "assetnum",
    "schedstart",
    "schedfinish",
    "actstart",
    "actfinish",
    "supervisor",
    "owner",
];

/// A work order as returned by the backend
///
/// The status is only ever changed through the status update call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Internal numeric key, used in resource paths
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub workorderid: Option<String>,

    /// User-facing work order number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub siteid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wopriority: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcpriority: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failurecode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problemcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reportedby: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assetnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedstart: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedfinish: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actstart: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actfinish: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Attributes this crate does not model, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl WorkOrder {
    /// Identifier for resource paths, or an input error if absent
    pub fn id(&self) -> Result<&str, ClientError> {
        self.workorderid
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| ClientError::InvalidInput("work order has no workorderid".to_string()))
    }

    /// Priority shown to users: the explicit priority, else the calculated one
    pub fn priority(&self) -> Option<f64> {
        self.wopriority.map(|p| p as f64).or(self.calcpriority)
    }

    /// Status label, preferring the backend's own description
    pub fn status_label(&self) -> String {
        match (&self.status_description, &self.status) {
            (Some(desc), _) if !desc.is_empty() => desc.clone(),
            (_, Some(status)) => status.label().to_string(),
            _ => String::new(),
        }
    }
}

/// One page of the work order list
#[derive(Debug, Clone, Serialize)]
pub struct WorkOrderPage {
    pub page: u32,
    pub items: Vec<WorkOrder>,
    /// True when this page was non-empty, so another may follow
    pub has_more: bool,
}

/// Payload for creating a work order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewWorkOrder {
    /// Left empty to let the backend number it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wonum: Option<String>,

    pub description: String,

    pub siteid: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assetnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worktype: Option<String>,
}

impl NewWorkOrder {
    pub fn validate(&self) -> Result<(), ClientError> {
        require("description", &self.description)?;
        require("siteid", &self.siteid)
    }

    /// JSON body with blank optional fields dropped
    pub fn to_body(&self) -> Result<Value, ClientError> {
        let value =
            serde_json::to_value(self).map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        let Value::Object(map) = value else {
            return Ok(value);
        };
        let cleaned: Map<String, Value> = map
            .into_iter()
            .filter(|(_, v)| !matches!(v, Value::String(s) if s.trim().is_empty()))
            .collect();
        Ok(Value::Object(cleaned))
    }
}
