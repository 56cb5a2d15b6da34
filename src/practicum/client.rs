use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use super::error::ApiError;

pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Source of raw homework-status payloads, one request per call.
pub trait StatusFetcher {
    async fn fetch(&self, since: i64) -> Result<Value, ApiError>;
}

pub struct PracticumClient {
    token: String,
    client: Client,
    endpoint: String,
}

impl PracticumClient {
    /// Create a client for `endpoint`; production uses [`ENDPOINT`].
    pub fn with_base_url(
        token: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl StatusFetcher for PracticumClient {
    async fn fetch(&self, since: i64) -> Result<Value, ApiError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", since)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::BadStatus {
                status: status.as_u16(),
                endpoint: self.endpoint.clone(),
                from_date: since,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::MalformedBody(e.to_string()))
    }
}
