//! Typed access to work order child records

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::info;

use super::fetch::Expanded;
use super::mutate::PatchMode;
use super::{decode_all, MaximoClient};
use crate::core::entity::{require, SubRecord};
use crate::core::error::ClientError;
use crate::core::resource::ResourceKind;
use crate::entities::{
    Activity, LaborTransaction, MaterialTransaction, PlannedLabor, PlannedMaterial, WorkLogEntry,
};

/// Merge body adding `record` to its child collection
pub fn merge_body<R: SubRecord>(record: &R) -> Result<Value, ClientError> {
    let mut body: Map<String, Value> = record.parent_fields();
    let child = serde_json::to_value(record).map_err(|e| ClientError::InvalidInput(e.to_string()))?;
    body.insert(R::KIND.path().to_string(), Value::Array(vec![child]));
    Ok(Value::Object(body))
}

impl MaximoClient {
    /// Add one child record to a work order
    pub async fn add_record<R: SubRecord>(
        &self,
        token: &str,
        workorderid: &str,
        record: &R,
    ) -> Result<Option<Value>, ClientError> {
        require("workorderid", workorderid)?;
        record.validate()?;

        let url = format!("{}?lean=1", self.endpoints.work_order(workorderid));
        let body = merge_body(record)?;
        let result = self.patch(&url, token, &body, PatchMode::Merge).await?;
        info!(workorderid, kind = %R::KIND, "added {}", R::KIND.name());
        Ok(result)
    }

    /// Expand a child collection and decode each detail
    ///
    /// Under best-effort, a detail that does not decode as `T` is reported
    /// as a failure alongside the ones that could not be fetched.
    pub async fn list_records<T: DeserializeOwned>(
        &self,
        token: &str,
        workorderid: &str,
        kind: ResourceKind,
    ) -> Result<Expanded<T>, ClientError> {
        require("workorderid", workorderid)?;
        if !kind.is_expanded() {
            return Err(ClientError::InvalidInput(format!(
                "{} are not listed through detail links",
                kind.name_plural()
            )));
        }
        self.fetch_expanded(workorderid, kind, token).await
    }

    pub async fn work_logs(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Expanded<WorkLogEntry>, ClientError> {
        self.list_records(token, workorderid, ResourceKind::WorkLog)
            .await
    }

    pub async fn labor_transactions(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Expanded<LaborTransaction>, ClientError> {
        self.list_records(token, workorderid, ResourceKind::LaborTransaction)
            .await
    }

    pub async fn material_transactions(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Expanded<MaterialTransaction>, ClientError> {
        self.list_records(token, workorderid, ResourceKind::MaterialTransaction)
            .await
    }

    pub async fn planned_materials(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Expanded<PlannedMaterial>, ClientError> {
        self.list_records(token, workorderid, ResourceKind::PlannedMaterial)
            .await
    }

    pub async fn activities(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Expanded<Activity>, ClientError> {
        self.list_records(token, workorderid, ResourceKind::Activity)
            .await
    }

    /// Planned labor comes back whole from one request
    pub async fn planned_labor(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<Vec<PlannedLabor>, ClientError> {
        require("workorderid", workorderid)?;
        let values = self
            .fetch_direct(workorderid, ResourceKind::PlannedLabor, token)
            .await?;
        decode_all(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{NewPlannedMaterial, NewWorkLog};
    use serde_json::json;

    #[test]
    fn test_merge_body_wraps_record() {
        let log = NewWorkLog {
            description: "Replaced gasket".to_string(),
            logtype: Some("WORK".to_string()),
            clientviewable: false,
        };
        assert_eq!(
            merge_body(&log).unwrap(),
            json!({"worklog": [{"description": "Replaced gasket", "logtype": "WORK", "clientviewable": false}]})
        );
    }

    #[test]
    fn test_merge_body_carries_parent_fields() {
        let material = NewPlannedMaterial {
            description: Some("Tubing".to_string()),
            itemnum: "0-0514".to_string(),
            unitcost: 2.0,
            linecost: 4.0,
            location: "CENTRAL".to_string(),
            restype: "AUTOMATIC".to_string(),
            directreq: false,
            storelocsite: None,
            requestby: None,
        };
        let body = merge_body(&material).unwrap();
        assert_eq!(body["description"], json!("Tubing"));
        assert_eq!(body["wpmaterial"][0]["itemnum"], json!("0-0514"));
    }
}
