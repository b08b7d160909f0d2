//! Materials: issued material transactions and planned materials

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::core::entity::{require, SubRecord};
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

/// Material issued or returned against a work order (MATUSETRANS)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialTransaction {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub matusetransid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itemnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unitcost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storeloc: Option<String>,

    /// ISSUE or RETURN
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuetype: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transdate: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Material planned on a work order (WPMATERIAL)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannedMaterial {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub wpitemid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itemnum: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itemqty: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unitcost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restype: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// New planned material line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlannedMaterial {
    /// Sent at the work order level next to the `wpmaterial` array
    #[serde(skip)]
    pub description: Option<String>,

    pub itemnum: String,
    pub unitcost: f64,
    pub linecost: f64,
    pub location: String,

    /// Reservation type, e.g. AUTOMATIC or MANUAL
    pub restype: String,

    #[serde(default)]
    pub directreq: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storelocsite: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requestby: Option<String>,
}

impl SubRecord for NewPlannedMaterial {
    const KIND: ResourceKind = ResourceKind::PlannedMaterial;

    fn validate(&self) -> Result<(), ClientError> {
        require("itemnum", &self.itemnum)?;
        require("location", &self.location)?;
        require("restype", &self.restype)
    }

    fn parent_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        if let Some(desc) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            fields.insert("description".to_string(), Value::String(desc.to_string()));
        }
        fields
    }
}
