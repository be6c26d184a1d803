//! Telegram Bot API transport — message sending via `sendMessage`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tipcast_core::error::{Result, TipcastError};
use tipcast_core::transport::Transport;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram transport configuration.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// API origin; overridable for tests.
    pub api_base: String,
    /// Attempts per recipient before giving up.
    pub max_attempts: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
    /// Per-attempt request timeout.
    pub request_timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_base: TELEGRAM_API_BASE.to_string(),
            max_attempts: 3,
            retry_delay: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Telegram Bot API channel.
pub struct TelegramTransport {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramTransport {
    pub fn new(config: TelegramConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base, self.config.bot_token, method
        )
    }

    /// One `sendMessage` attempt. Errors cover both network faults and
    /// non-2xx API responses so the retry loop treats them uniformly.
    async fn try_send(&self, chat_id: &str, text: &str) -> Result<()> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
        });

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|e| TipcastError::Transport(format!("sendMessage failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TipcastError::Transport(format!(
                "Telegram API error {status}: {body}"
            )));
        }

        let result: TelegramApiResponse = response
            .json()
            .await
            .map_err(|e| TipcastError::Transport(format!("Invalid send response: {e}")))?;
        if !result.ok {
            return Err(TipcastError::Transport(format!(
                "Send rejected: {}",
                result.description.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send(&self, recipient: &str, message: &str) -> Result<bool> {
        for attempt in 1..=self.config.max_attempts {
            match self.try_send(recipient, message).await {
                Ok(()) => {
                    tracing::info!("✅ Telegram message sent to {recipient}");
                    return Ok(true);
                }
                Err(e) => {
                    tracing::warn!(
                        "Send to {recipient} failed (attempt {attempt}/{}): {e}",
                        self.config.max_attempts
                    );
                    if attempt < self.config.max_attempts {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }
        tracing::error!("❌ Giving up on {recipient} after {} attempts", self.config.max_attempts);
        Ok(false)
    }
}

#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    description: Option<String>,
}
