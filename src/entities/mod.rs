//! Entity type definitions
//!
//! Read types mirror the backend's lean JSON and keep unknown attributes in
//! `extra`. `New*` types are the payloads sent when creating records.

pub mod activity;
pub mod attachment;
pub mod labor;
pub mod material;
pub mod prediction;
pub mod workorder;
pub mod worklog;

pub use activity::{Activity, NewActivity};
pub use attachment::{Attachment, AttachmentUpload};
pub use labor::{LaborTransaction, NewLaborTransaction, NewPlannedLabor, PlannedLabor};
pub use material::{MaterialTransaction, NewPlannedMaterial, PlannedMaterial};
pub use prediction::{PredictionInput, PredictionSource, Recommendation};
pub use workorder::{NewWorkOrder, WorkOrder, WorkOrderPage, WORK_ORDER_FIELDS};
pub use worklog::{NewWorkLog, WorkLogEntry};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept identifiers sent either as JSON strings or numbers
pub(crate) fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number identifier, found {}",
            other
        ))),
    }
}

/// Render an optional number without a trailing `.0`
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{:.2}", v),
        None => String::new(),
    }
}
