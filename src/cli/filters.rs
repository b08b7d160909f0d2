//! Filter enums for list commands

use clap::ValueEnum;

use crate::core::entity::WorkOrderStatus;

/// Work order status filter
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Waiting on approval
    Wappr,
    /// Approved
    Appr,
    /// Waiting to be scheduled
    Wsch,
    /// Waiting on material
    Wmatl,
    /// Waiting on plant condition
    Wpcond,
    /// In progress
    Inprg,
    /// Completed
    Comp,
    /// Closed
    Close,
    /// Canceled
    Can,
    /// Anything not completed, closed or canceled
    Open,
    /// All statuses - default
    #[default]
    All,
}

impl StatusFilter {
    /// Check if a status matches this filter
    ///
    /// Work orders without a status only match `all`.
    pub fn matches(&self, status: Option<&WorkOrderStatus>) -> bool {
        match (self, status) {
            (StatusFilter::All, _) => true,
            (_, None) => false,
            (StatusFilter::Open, Some(s)) => !s.is_terminal(),
            (filter, Some(s)) => filter.status().as_ref() == Some(s),
        }
    }

    /// The single status this filter selects, if any
    pub fn status(&self) -> Option<WorkOrderStatus> {
        match self {
            StatusFilter::Wappr => Some(WorkOrderStatus::WaitingApproval),
            StatusFilter::Appr => Some(WorkOrderStatus::Approved),
            StatusFilter::Wsch => Some(WorkOrderStatus::WaitingSchedule),
            StatusFilter::Wmatl => Some(WorkOrderStatus::WaitingMaterial),
            StatusFilter::Wpcond => Some(WorkOrderStatus::WaitingPlantCondition),
            StatusFilter::Inprg => Some(WorkOrderStatus::InProgress),
            StatusFilter::Comp => Some(WorkOrderStatus::Completed),
            StatusFilter::Close => Some(WorkOrderStatus::Closed),
            StatusFilter::Can => Some(WorkOrderStatus::Canceled),
            StatusFilter::Open | StatusFilter::All => None,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::Open => write!(f, "open"),
            StatusFilter::All => write!(f, "all"),
            other => match other.status() {
                Some(status) => write!(f, "{}", status.code().to_lowercase()),
                None => Ok(()),
            },
        }
    }
}
