//! Shared vocabulary for backend records: sub-record payloads and work order statuses

use serde::{Deserialize, Serialize};

use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;

/// Common trait for sub-record payloads that can be merged into a work order
pub trait SubRecord: Serialize {
    /// The child collection this record belongs to
    const KIND: ResourceKind;

    /// Check required fields before anything is sent
    fn validate(&self) -> Result<(), ClientError>;

    /// Top-level attributes sent alongside the child array, if any
    fn parent_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        serde_json::Map::new()
    }
}

/// Fail with `InvalidInput` if `value` is empty or whitespace
pub fn require(field: &str, value: &str) -> Result<(), ClientError> {
    if value.trim().is_empty() {
        Err(ClientError::InvalidInput(format!("{} is required", field)))
    } else {
        Ok(())
    }
}

/// Work order status codes known to the default Maximo workflow
///
/// Statuses are owned by the backend; codes outside this list are carried
/// through as [`WorkOrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WorkOrderStatus {
    WaitingApproval,
    Approved,
    WaitingSchedule,
    WaitingMaterial,
    WaitingPlantCondition,
    InProgress,
    Completed,
    Closed,
    Canceled,
    Other(String),
}

impl WorkOrderStatus {
    /// All known statuses in workflow order
    pub fn known() -> &'static [WorkOrderStatus] {
        &[
            WorkOrderStatus::WaitingApproval,
            WorkOrderStatus::Approved,
            WorkOrderStatus::WaitingSchedule,
            WorkOrderStatus::WaitingMaterial,
            WorkOrderStatus::WaitingPlantCondition,
            WorkOrderStatus::InProgress,
            WorkOrderStatus::Completed,
            WorkOrderStatus::Closed,
            WorkOrderStatus::Canceled,
        ]
    }

    /// The backend status code (e.g. "INPRG")
    pub fn code(&self) -> &str {
        match self {
            WorkOrderStatus::WaitingApproval => "WAPPR",
            WorkOrderStatus::Approved => "APPR",
            WorkOrderStatus::WaitingSchedule => "WSCH",
            WorkOrderStatus::WaitingMaterial => "WMATL",
            WorkOrderStatus::WaitingPlantCondition => "WPCOND",
            WorkOrderStatus::InProgress => "INPRG",
            WorkOrderStatus::Completed => "COMP",
            WorkOrderStatus::Closed => "CLOSE",
            WorkOrderStatus::Canceled => "CAN",
            WorkOrderStatus::Other(code) => code,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &str {
        match self {
            WorkOrderStatus::WaitingApproval => "Pending Approval",
            WorkOrderStatus::Approved => "Approved",
            WorkOrderStatus::WaitingSchedule => "Pending Scheduling",
            WorkOrderStatus::WaitingMaterial => "Waiting for Materials",
            WorkOrderStatus::WaitingPlantCondition => "Waiting Plant Condition",
            WorkOrderStatus::InProgress => "In Progress",
            WorkOrderStatus::Completed => "Completed",
            WorkOrderStatus::Closed => "Closed",
            WorkOrderStatus::Canceled => "Canceled",
            WorkOrderStatus::Other(code) => code,
        }
    }

    /// Completed, closed and canceled work orders are no longer actionable
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkOrderStatus::Completed | WorkOrderStatus::Closed | WorkOrderStatus::Canceled
        )
    }
}

impl From<String> for WorkOrderStatus {
    fn from(code: String) -> Self {
        code.as_str().into()
    }
}

impl From<&str> for WorkOrderStatus {
    fn from(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "WAPPR" => WorkOrderStatus::WaitingApproval,
            "APPR" => WorkOrderStatus::Approved,
            "WSCH" => WorkOrderStatus::WaitingSchedule,
            "WMATL" => WorkOrderStatus::WaitingMaterial,
            "WPCOND" => WorkOrderStatus::WaitingPlantCondition,
            "INPRG" => WorkOrderStatus::InProgress,
            "COMP" => WorkOrderStatus::Completed,
            "CLOSE" => WorkOrderStatus::Closed,
            "CAN" => WorkOrderStatus::Canceled,
            _ => WorkOrderStatus::Other(code.trim().to_string()),
        }
    }
}

impl From<WorkOrderStatus> for String {
    fn from(status: WorkOrderStatus) -> Self {
        status.code().to_string()
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
