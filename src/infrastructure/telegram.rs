use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::DomainError;
use crate::domain::ports::Notifier;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API client for `sendMessage`. One request per call, no retry.
pub struct TelegramNotifier {
    client: reqwest::Client,
    api_url: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn send_message_url(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_url, token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_message(&self, token: &str, chat_id: &str, text: &str) -> Result<(), DomainError> {
        let resp = self
            .client
            .post(self.send_message_url(token))
            .json(&SendMessage { chat_id, text })
            .send()
            .await
            // The request URL embeds the bot token; keep it out of the logs.
            .map_err(|e| DomainError::Internal(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DomainError::Internal(format!(
                "Telegram sendMessage returned {}: {}",
                status, body
            )));
        }

        log::debug!("Delivered notification to chat {}", chat_id);
        Ok(())
    }
}
