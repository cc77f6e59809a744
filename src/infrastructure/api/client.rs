//! Nutrition API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{ChatRequest, ErrorResponse, MaintenanceCaloriesBody};
use crate::domain::entities::{
    ChatReply, FoodLogEntry, LogId, MaintenanceCalories, NewFoodLog, WeeklyStat,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::NutritionApiPort;

const USER_AGENT: &str = concat!("macrotrack/", env!("CARGO_PKG_VERSION"));

const LOGS_PATH: &str = "/api/logs";
const MAINTENANCE_PATH: &str = "/api/settings/maintenance-calories";
const WEEKLY_STATS_PATH: &str = "/api/stats/weekly";
const CHAT_PATH: &str = "/api/chat";

/// HTTP adapter for the nutrition backend.
pub struct NutritionApiClient {
    client: Client,
    base_url: String,
}

impl NutritionApiClient {
    /// Creates a client for `base_url`.
    ///
    /// Without a `timeout` the transport defaults apply.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Builds `/api/logs/{id}` with the id encoded as a single path segment.
    fn log_url(&self, id: &LogId) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(LOGS_PATH))
            .map_err(|e| ApiError::unexpected(format!("invalid API URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::unexpected("API URL cannot carry a path"))?
            .push(&id.to_string());
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach nutrition API");
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::network("failed to connect to nutrition API")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(status, response).await)
        }
    }

    async fn error_from_response(status: StatusCode, response: Response) -> ApiError {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        debug!(status = status.as_u16(), message = %message, "Nutrition API returned error");
        ApiError::status(status.as_u16(), message)
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse nutrition API response");
            ApiError::decode(e.to_string())
        })
    }
}

#[async_trait]
impl NutritionApiPort for NutritionApiClient {
    async fn fetch_logs(&self) -> Result<Vec<FoodLogEntry>, ApiError> {
        debug!("Fetching food logs");
        let response = self.send(self.client.get(self.url(LOGS_PATH))).await?;
        Self::read_json(response).await
    }

    async fn create_log(&self, log: &NewFoodLog) -> Result<FoodLogEntry, ApiError> {
        debug!(fields = log.fields().len(), "Creating food log");
        let response = self
            .send(self.client.post(self.url(LOGS_PATH)).json(log))
            .await?;
        Self::read_json(response).await
    }

    async fn delete_log(&self, id: &LogId) -> Result<(), ApiError> {
        debug!(log_id = %id, "Deleting food log");
        let url = self.log_url(id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn clear_logs(&self) -> Result<(), ApiError> {
        debug!("Clearing all food logs");
        self.send(self.client.delete(self.url(LOGS_PATH))).await?;
        Ok(())
    }

    async fn fetch_maintenance_calories(&self) -> Result<MaintenanceCalories, ApiError> {
        debug!("Fetching maintenance calories");
        let response = self.send(self.client.get(self.url(MAINTENANCE_PATH))).await?;
        let body: MaintenanceCaloriesBody = Self::read_json(response).await?;
        MaintenanceCalories::new(body.maintenance_calories).ok_or_else(|| {
            ApiError::decode(format!(
                "invalid maintenance_calories value: {}",
                body.maintenance_calories
            ))
        })
    }

    async fn update_maintenance_calories(
        &self,
        calories: MaintenanceCalories,
    ) -> Result<(), ApiError> {
        debug!(maintenance_calories = %calories, "Updating maintenance calories");
        let body = MaintenanceCaloriesBody {
            maintenance_calories: calories.value(),
        };
        self.send(self.client.post(self.url(MAINTENANCE_PATH)).json(&body))
            .await?;
        Ok(())
    }

    async fn fetch_weekly_stats(&self) -> Result<Vec<WeeklyStat>, ApiError> {
        debug!("Fetching weekly stats");
        let response = self.send(self.client.get(self.url(WEEKLY_STATS_PATH))).await?;
        Self::read_json(response).await
    }

    async fn send_chat_message(&self, message: &str) -> Result<ChatReply, ApiError> {
        debug!(length = message.len(), "Sending chat message");
        let response = self
            .send(self.client.post(self.url(CHAT_PATH)).json(&ChatRequest { message }))
            .await?;
        Self::read_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NutritionApiClient::new("http://localhost:8000", None);
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client =
            NutritionApiClient::new("http://localhost:8000/", Some(Duration::from_secs(5)))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(LOGS_PATH), "http://localhost:8000/api/logs");
    }
}
