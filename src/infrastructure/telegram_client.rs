use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::message::RawChannelMessage;
use crate::domain::repositories::channel_client::{ChannelClient, ChannelError, ChannelResult};

/// Telegram Bot API endpoint
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Telegram channel configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub bot_token: String,
    /// Restrict to a single chat when set; updates from other chats are
    /// dropped.
    pub chat_id: Option<i64>,
    pub request_timeout: Duration,
}

impl TelegramConfig {
    pub fn new(bot_token: &str, chat_id: Option<i64>, request_timeout: Duration) -> Self {
        Self {
            api_base: TELEGRAM_API_BASE.to_string(),
            bot_token: bot_token.to_string(),
            chat_id,
            request_timeout,
        }
    }
}

/// Telegram getUpdates response envelope
#[derive(Debug, Deserialize)]
struct GetUpdatesResponse {
    ok: bool,
    #[serde(default)]
    result: Vec<TelegramUpdate>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramUpdate {
    #[allow(dead_code)]
    update_id: i64,
    message: Option<TelegramMessage>,
    channel_post: Option<TelegramMessage>,
}

#[derive(Debug, Deserialize)]
struct TelegramMessage {
    message_id: i64,
    date: i64,
    text: Option<String>,
    chat: TelegramChat,
    from: Option<TelegramUser>,
    author_signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TelegramChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TelegramUser {
    first_name: String,
    username: Option<String>,
}

/// Telegram Bot API client pulling channel messages via getUpdates.
pub struct TelegramChannelClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramChannelClient {
    pub fn new(config: TelegramConfig) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ChannelError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn updates_url(&self) -> String {
        format!(
            "{}/bot{}/getUpdates",
            self.config.api_base, self.config.bot_token
        )
    }

    fn me_url(&self) -> String {
        format!("{}/bot{}/getMe", self.config.api_base, self.config.bot_token)
    }

    /// Convert one Telegram update to a raw channel message. Updates without
    /// text, and updates from other chats when a chat filter is configured,
    /// are dropped.
    fn raw_from_update(update: TelegramUpdate, chat_filter: Option<i64>) -> Option<RawChannelMessage> {
        let message = update.message.or(update.channel_post)?;

        if let Some(wanted) = chat_filter {
            if message.chat.id != wanted {
                return None;
            }
        }

        let text = message.text?;
        let author = message
            .author_signature
            .or_else(|| message.from.map(|u| u.username.unwrap_or(u.first_name)));
        let timestamp = DateTime::<Utc>::from_timestamp(message.date, 0)?;

        Some(RawChannelMessage {
            id: message.message_id,
            text,
            author,
            timestamp,
        })
    }
}

#[async_trait]
impl ChannelClient for TelegramChannelClient {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn is_healthy(&self) -> bool {
        match self.client.get(self.me_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "Telegram health check failed");
                false
            }
        }
    }

    async fn fetch_updates(&self, limit: usize) -> ChannelResult<Vec<RawChannelMessage>> {
        let response = self
            .client
            .get(self.updates_url())
            .query(&[("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChannelError::Timeout
                } else {
                    ChannelError::Network(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ChannelError::BadStatus { status, body });
        }

        let body: GetUpdatesResponse = response
            .json()
            .await
            .map_err(|e| ChannelError::Parse(e.to_string()))?;

        if !body.ok {
            return Err(ChannelError::Rejected(
                body.description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }

        let chat_filter = self.config.chat_id;
        let update_count = body.result.len();
        let messages: Vec<RawChannelMessage> = body
            .result
            .into_iter()
            .filter_map(|u| Self::raw_from_update(u, chat_filter))
            .collect();

        debug!(
            updates = update_count,
            messages = messages.len(),
            "Fetched Telegram updates"
        );

        Ok(messages)
    }
}
