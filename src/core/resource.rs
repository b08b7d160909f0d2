//! Work order child collections and how they are fetched

use serde::{Deserialize, Serialize};

/// A child collection hanging off a work order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "worklog")]
    WorkLog,
    #[serde(rename = "labtrans")]
    LaborTransaction,
    #[serde(rename = "matusetrans")]
    MaterialTransaction,
    #[serde(rename = "wpmaterial")]
    PlannedMaterial,
    #[serde(rename = "wplabor")]
    PlannedLabor,
    #[serde(rename = "woactivity")]
    Activity,
    #[serde(rename = "doclinks")]
    Attachment,
}

impl ResourceKind {
    pub fn all() -> &'static [ResourceKind] {
        &[
            ResourceKind::WorkLog,
            ResourceKind::LaborTransaction,
            ResourceKind::MaterialTransaction,
            ResourceKind::PlannedMaterial,
            ResourceKind::PlannedLabor,
            ResourceKind::Activity,
            ResourceKind::Attachment,
        ]
    }

    /// Relationship name used in the OSLC path and in merge payloads
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::WorkLog => "worklog",
            ResourceKind::LaborTransaction => "labtrans",
            ResourceKind::MaterialTransaction => "matusetrans",
            ResourceKind::PlannedMaterial => "wpmaterial",
            ResourceKind::PlannedLabor => "wplabor",
            ResourceKind::Activity => "woactivity",
            ResourceKind::Attachment => "doclinks",
        }
    }

    /// Singular name for messages
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::WorkLog => "work log",
            ResourceKind::LaborTransaction => "labor transaction",
            ResourceKind::MaterialTransaction => "material transaction",
            ResourceKind::PlannedMaterial => "planned material",
            ResourceKind::PlannedLabor => "planned labor",
            ResourceKind::Activity => "activity",
            ResourceKind::Attachment => "attachment",
        }
    }

    /// Plural name for messages
    pub fn name_plural(&self) -> &'static str {
        match self {
            ResourceKind::WorkLog => "work logs",
            ResourceKind::LaborTransaction => "labor transactions",
            ResourceKind::MaterialTransaction => "material transactions",
            ResourceKind::PlannedMaterial => "planned materials",
            ResourceKind::PlannedLabor => "planned labor",
            ResourceKind::Activity => "activities",
            ResourceKind::Attachment => "attachments",
        }
    }

    /// Whether the collection returns references that must be followed
    ///
    /// Planned labor is read in one call with `oslc.select=*`; attachments
    /// embed their metadata in `describedBy`.
    pub fn is_expanded(&self) -> bool {
        !matches!(self, ResourceKind::PlannedLabor | ResourceKind::Attachment)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::all()
            .iter()
            .copied()
            .find(|k| k.path().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown resource kind: {}", s))
    }
}

/// What to do when some detail fetches fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Any failed detail fetch fails the whole call
    #[default]
    AllOrNothing,
    /// Return the details that succeeded and report the rest
    BestEffort,
}

impl std::fmt::Display for FetchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchPolicy::AllOrNothing => write!(f, "all-or-nothing"),
            FetchPolicy::BestEffort => write!(f, "best-effort"),
        }
    }
}

impl std::str::FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all-or-nothing" | "strict" => Ok(FetchPolicy::AllOrNothing),
            "best-effort" | "partial" => Ok(FetchPolicy::BestEffort),
            other => Err(format!(
                "unknown fetch policy '{}'. Use all-or-nothing or best-effort",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_path() {
        assert_eq!(
            "labtrans".parse::<ResourceKind>().unwrap(),
            ResourceKind::LaborTransaction
        );
        assert_eq!(
            "WOACTIVITY".parse::<ResourceKind>().unwrap(),
            ResourceKind::Activity
        );
        assert!("bogus".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn test_kind_serializes_as_path() {
        for kind in ResourceKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.path()));
            let back: ResourceKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *kind);
        }
    }

    #[test]
    fn test_expanded_kinds() {
        assert!(ResourceKind::WorkLog.is_expanded());
        assert!(ResourceKind::MaterialTransaction.is_expanded());
        assert!(!ResourceKind::PlannedLabor.is_expanded());
        assert!(!ResourceKind::Attachment.is_expanded());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(
            "best-effort".parse::<FetchPolicy>().unwrap(),
            FetchPolicy::BestEffort
        );
        assert_eq!(FetchPolicy::default(), FetchPolicy::AllOrNothing);
        assert!("sometimes".parse::<FetchPolicy>().is_err());
    }
}
