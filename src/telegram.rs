use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PollError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Minimal Telegram Bot API client: the bot only ever sends plain text
/// messages to one fixed chat.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    token: String,
    chat_id: String,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    ok: bool,
    description: Option<String>,
}

impl TelegramClient {
    pub fn new(client: Client, token: String, chat_id: String) -> Self {
        Self {
            client,
            token,
            chat_id,
        }
    }

    /// Deliver one text message to the configured chat.
    ///
    /// Every failure comes back as [`PollError::Delivery`]; callers decide
    /// whether to log and continue (the status loop) or to swallow it
    /// entirely (the error notifier).
    pub async fn send_message(&self, text: &str) -> Result<(), PollError> {
        debug!("Sending telegram message: {}", text);

        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| PollError::Delivery {
                reason: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PollError::Delivery {
                reason: format!("telegram API answered {}: {}", status, body),
            });
        }

        let reply: SendMessageResponse =
            response.json().await.map_err(|err| PollError::Delivery {
                reason: err.to_string(),
            })?;
        if !reply.ok {
            return Err(PollError::Delivery {
                reason: reply
                    .description
                    .unwrap_or_else(|| "telegram API reported failure".to_string()),
            });
        }

        debug!("Telegram message delivered: {}", text);
        Ok(())
    }
}
