use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Notifier, NotifyError};

pub const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Telegram Bot API `sendMessage` client.
pub struct TelegramNotifier {
    token: String,
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TgResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramNotifier {
    pub fn with_base_url(
        token: String,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            token,
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Notifier for TelegramNotifier {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await?;

        let status = response.status();
        // Telegram reports failures in the body as well; prefer its description.
        let body = response.json::<TgResponse>().await.ok();
        match body {
            Some(TgResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(TgResponse { description, .. }) => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "sendMessage failed".to_string()),
            }),
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: "unreadable sendMessage response".to_string(),
            }),
        }
    }
}
