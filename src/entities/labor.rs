//! Labor: actual labor transactions and planned labor

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::entity::{require, SubRecord};
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

// =========================================================================
// Labor transactions (LABTRANS)
// =========================================================================

/// Hours actually reported against a work order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaborTransaction {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub labtransid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laborcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regularhrs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub startdate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transdate: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payrate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecost: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// New labor transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLaborTransaction {
    pub laborcode: String,
    pub orgid: String,
    pub regularhrs: f64,
    pub quantity: f64,
    pub rate: f64,
    #[serde(default)]
    pub ratehaschanged: bool,
    #[serde(default)]
    pub apptrequired: bool,
}

impl SubRecord for NewLaborTransaction {
    const KIND: ResourceKind = ResourceKind::LaborTransaction;

    fn validate(&self) -> Result<(), ClientError> {
        require("laborcode", &self.laborcode)?;
        require("orgid", &self.orgid)?;
        if self.regularhrs < 0.0 {
            return Err(ClientError::InvalidInput(
                "regularhrs cannot be negative".to_string(),
            ));
        }
        Ok(())
    }
}

// =========================================================================
// Planned labor (WPLABOR)
// =========================================================================

/// Labor planned on a work order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannedLabor {
    #[serde(
        default,
        deserialize_with = "super::opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub wplaborid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laborcode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub craft: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laborhrs: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linecost: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// New planned labor line
///
/// The backend expects the client to supply `wplaborid`; [`NewPlannedLabor::new`]
/// uses the current unix time in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlannedLabor {
    pub wplaborid: String,
    pub laborcode: String,
    pub orgid: String,
    pub laborhrs: f64,
    pub quantity: f64,
    pub rate: f64,
    #[serde(default)]
    pub ratehaschanged: bool,
    #[serde(default)]
    pub apptrequired: bool,
}

impl NewPlannedLabor {
    pub fn new(
        laborcode: impl Into<String>,
        orgid: impl Into<String>,
        laborhrs: f64,
        quantity: f64,
        rate: f64,
    ) -> Self {
        Self {
            wplaborid: Utc::now().timestamp().to_string(),
            laborcode: laborcode.into(),
            orgid: orgid.into(),
            laborhrs,
            quantity,
            rate,
            ratehaschanged: false,
            apptrequired: false,
        }
    }
}

impl SubRecord for NewPlannedLabor {
    const KIND: ResourceKind = ResourceKind::PlannedLabor;

    fn validate(&self) -> Result<(), ClientError> {
        require("wplaborid", &self.wplaborid)?;
        require("laborcode", &self.laborcode)?;
        require("orgid", &self.orgid)
    }
}
