//! Failure-prediction input and model call

use chrono::{Local, NaiveDate};
use reqwest::header::ACCEPT;
use tracing::debug;

use super::mutate::error_message;
use super::{members, MaximoClient};
use crate::core::entity::require;
use crate::core::error::{ClientError, GENERIC_SERVER_MESSAGE};
use crate::entities::prediction::{
    PredictionInput, PredictionSource, Recommendation, PREDICTION_SELECT,
};

impl MaximoClient {
    /// Load the work order fields the prediction model needs
    pub async fn prediction_source(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<PredictionSource, ClientError> {
        require("workorderid", workorderid)?;
        if !workorderid.chars().all(|c| c.is_ascii_digit()) {
            return Err(ClientError::InvalidInput(format!(
                "workorderid must be numeric, got '{}'",
                workorderid
            )));
        }

        let filter = format!("workorderid={}", workorderid);
        let url = self.endpoints.with_query(
            &self.endpoints.api(),
            &[
                ("oslc.select", PREDICTION_SELECT),
                ("oslc.where", filter.as_str()),
                ("lean", "1"),
            ],
        )?;

        let document = self.get_json(&url, token).await?;
        let first = members(&document)?.first().cloned().ok_or_else(|| {
            ClientError::InvalidResponse(format!("work order {} not found", workorderid))
        })?;
        serde_json::from_value(first).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Build the model input for a work order as of `today`
    pub async fn prediction_input_on(
        &self,
        token: &str,
        workorderid: &str,
        today: NaiveDate,
    ) -> Result<PredictionInput, ClientError> {
        let source = self.prediction_source(token, workorderid).await?;
        PredictionInput::build(&source, today)
    }

    /// Build the model input for a work order as of the local date
    pub async fn prediction_input(
        &self,
        token: &str,
        workorderid: &str,
    ) -> Result<PredictionInput, ClientError> {
        self.prediction_input_on(token, workorderid, Local::now().date_naive())
            .await
    }

    /// Send the input to the configured prediction service, if any
    pub async fn predict(
        &self,
        input: &PredictionInput,
    ) -> Result<Option<Recommendation>, ClientError> {
        let Some(root) = self.predict_url.as_deref() else {
            return Ok(None);
        };
        let url = format!("{}/predict", root.trim_end_matches('/'));

        debug!(method = "POST", %url, "requesting prediction");
        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(input)
            .send()
            .await?;
        let status = response.status();
        debug!(method = "POST", %url, status = status.as_u16(), "received response");

        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
                .or_else(|| error_message(&text))
                .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
