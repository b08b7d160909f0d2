//! Work order queries, creation and status updates

use serde_json::{json, Value};
use tracing::info;

use super::mutate::PatchMode;
use super::{decode_all, members, MaximoClient};
use crate::core::entity::{require, WorkOrderStatus};
use crate::core::error::ClientError;
use crate::entities::workorder::{NewWorkOrder, WorkOrder, WorkOrderPage, WORK_ORDER_FIELDS};

/// Restricts queries to real work orders (not activities or changes)
const WORKORDER_CLASS: &str = "woclass=\"WORKORDER\"";

impl MaximoClient {
    /// Fetch one page of work orders, starting at page 1
    pub async fn list_work_orders(
        &self,
        token: &str,
        page: u32,
    ) -> Result<WorkOrderPage, ClientError> {
        let page = page.max(1);
        let select = WORK_ORDER_FIELDS.join(",");
        let page_size = self.page_size.to_string();
        let page_no = page.to_string();
        let url = self.endpoints.with_query(
            &self.endpoints.api(),
            &[
                ("oslc.where", WORKORDER_CLASS),
                ("oslc.select", select.as_str()),
                ("oslc.pageSize", page_size.as_str()),
                ("pageno", page_no.as_str()),
                ("lean", "1"),
            ],
        )?;

        let document = self.get_json(&url, token).await?;
        let items: Vec<WorkOrder> = decode_all(members(&document)?.to_vec())?;
        Ok(WorkOrderPage {
            page,
            has_more: !items.is_empty(),
            items,
        })
    }

    /// Find work orders by number
    pub async fn search_work_orders(
        &self,
        token: &str,
        wonum: &str,
    ) -> Result<Vec<WorkOrder>, ClientError> {
        let wonum = wonum.trim();
        require("wonum", wonum)?;
        if wonum.contains('"') {
            return Err(ClientError::InvalidInput(
                "wonum cannot contain quotes".to_string(),
            ));
        }

        let filter = format!("{} and wonum=\"{}\"", WORKORDER_CLASS, wonum);
        let select = WORK_ORDER_FIELDS.join(",");
        let url = self.endpoints.with_query(
            &self.endpoints.api(),
            &[("oslc.where", filter.as_str()), ("oslc.select", select.as_str()), ("lean", "1")],
        )?;

        let document = self.get_json(&url, token).await?;
        decode_all(members(&document)?.to_vec())
    }

    /// Fetch a single work order by its workorderid
    pub async fn get_work_order(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<WorkOrder, ClientError> {
        require("workorderid", workorderid)?;
        let select = WORK_ORDER_FIELDS.join(",");
        let url = self.endpoints.with_query(
            &self.endpoints.work_order(workorderid),
            &[("oslc.select", select.as_str()), ("lean", "1")],
        )?;

        let document = self.get_json(&url, token).await?;
        serde_json::from_value(document).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Create a work order
    ///
    /// Returns the created record when the backend echoes it back.
    pub async fn create_work_order(
        &self,
        token: &str,
        work_order: &NewWorkOrder,
    ) -> Result<Option<Value>, ClientError> {
        work_order.validate()?;
        let url = format!("{}?lean=1", self.endpoints.api());
        let created = self.post_json(&url, token, &work_order.to_body()?).await?;
        info!(description = %work_order.description, "created work order");
        Ok(created)
    }

    /// Move a work order to a new status
    ///
    /// The work order must carry its id and current status; the transition
    /// itself is validated by the backend.
    pub async fn update_status(
        &self,
        token: &str,
        work_order: &WorkOrder,
        new_status: &WorkOrderStatus,
    ) -> Result<Option<Value>, ClientError> {
        let id = work_order.id()?;
        if work_order.status.is_none() {
            return Err(ClientError::InvalidInput(
                "current status of the work order is unknown".to_string(),
            ));
        }
        require("new status", new_status.code())?;

        let url = format!("{}?properties=status&lean=1", self.endpoints.work_order(id));
        let body = json!({ "status": new_status.code() });
        let updated = self.patch(&url, token, &body, PatchMode::Replace).await?;
        info!(workorderid = %id, status = %new_status, "updated work order status");
        Ok(updated)
    }
}
