//! Failure-prediction model input
//!
//! The model is fed a few work order codes together with the age of the
//! asset the work order is raised against.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::error::ClientError;

/// Failure frequency sent with every prediction request
pub const DEFAULT_FAILURE_FREQUENCY: u32 = 2;

/// Attributes selected when loading a work order for prediction
pub const PREDICTION_SELECT: &str =
    "failurecode,problemcode,wopriority,asset{installdate,assetnum,status,assettype}";

/// Asset fields relevant to prediction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetInfo {
    #[serde(default)]
    pub assetnum: Option<String>,
    #[serde(default)]
    pub assettype: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub installdate: Option<String>,
}

/// Work order data the prediction input is built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionSource {
    #[serde(default)]
    pub failurecode: Option<String>,
    #[serde(default)]
    pub problemcode: Option<String>,
    #[serde(default)]
    pub wopriority: Option<i64>,

    /// The backend returns related objects as a one-element array
    #[serde(default, deserialize_with = "first_of_many")]
    pub asset: Option<AssetInfo>,
}

fn first_of_many<'de, D>(deserializer: D) -> Result<Option<AssetInfo>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<AssetInfo>),
        One(AssetInfo),
    }

    Ok(
        match Option::<OneOrMany>::deserialize(deserializer)? {
            Some(OneOrMany::Many(assets)) => assets.into_iter().next(),
            Some(OneOrMany::One(asset)) => Some(asset),
            None => None,
        },
    )
}

/// Payload expected by the prediction model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct PredictionInput {
    #[serde(rename = "ASSETTYPE")]
    pub asset_type: Option<String>,
    #[serde(rename = "FAILURECODE")]
    pub failure_code: Option<String>,
    #[serde(rename = "PROBLEMCODE")]
    pub problem_code: Option<String>,
    #[serde(rename = "FREQUENCE_PANNE")]
    pub failure_frequency: u32,
    pub age_equipment: i32,
    pub priority: String,
}

impl PredictionInput {
    /// Build the model input as of `today`
    pub fn build(source: &PredictionSource, today: NaiveDate) -> Result<Self, ClientError> {
        let asset = source.asset.as_ref().ok_or_else(|| {
            ClientError::InvalidResponse("work order has no related asset".to_string())
        })?;
        let installed = asset
            .installdate
            .as_deref()
            .and_then(parse_install_date)
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!(
                    "asset {} has no usable install date",
                    asset.assetnum.as_deref().unwrap_or("?")
                ))
            })?;

        Ok(Self {
            asset_type: asset.assettype.clone(),
            failure_code: source.failurecode.clone(),
            problem_code: source.problemcode.clone(),
            failure_frequency: DEFAULT_FAILURE_FREQUENCY,
            age_equipment: equipment_age(installed, today),
            priority: source
                .wopriority
                .map(|p| p.to_string())
                .unwrap_or_default(),
        })
    }
}

/// Whole years between install and `today`
///
/// One less than the calendar-year difference until the anniversary passes.
pub fn equipment_age(installed: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - installed.year();
    if (today.month(), today.day()) < (installed.month(), installed.day()) {
        age -= 1;
    }
    age
}

/// Parse an install date given as an RFC 3339 timestamp or a plain date
pub fn parse_install_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Model answer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendation {
    /// Recommended corrective action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
