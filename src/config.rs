use std::time::Duration;

/// Runtime configuration for the service
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bind_address: String,
    pub cache_ttl_seconds: u64,       // Feed cache TTL (seconds)
    pub fetch_timeout_seconds: u64,   // Upstream request timeout (seconds)
    pub fetch_limit: usize,           // Updates requested per upstream fetch
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<i64>,
}

impl AppConfig {
    /// Default configuration
    pub fn default() -> AppConfig {
        AppConfig {
            bind_address: "127.0.0.1:3000".to_string(),
            cache_ttl_seconds: 300, // 5 minute cache TTL
            fetch_timeout_seconds: 10,
            fetch_limit: 100,
            telegram_bot_token: None,
            telegram_chat_id: None,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> AppConfig {
        let mut config = AppConfig::default();

        if let Ok(addr) = std::env::var("MTM_BIND_ADDRESS") {
            if !addr.is_empty() {
                config.bind_address = addr;
            }
        }

        if let Ok(ttl) = std::env::var("FEED_CACHE_TTL_SECONDS") {
            match ttl.parse::<u64>() {
                Ok(value) if (10..=3600).contains(&value) => {
                    config.cache_ttl_seconds = value;
                }
                Ok(value) => {
                    tracing::warn!(
                        "Invalid FEED_CACHE_TTL_SECONDS value: {} (must be between 10 and 3600), using default: {}",
                        value, config.cache_ttl_seconds
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse FEED_CACHE_TTL_SECONDS '{}': {}, using default: {}",
                        ttl,
                        e,
                        config.cache_ttl_seconds
                    );
                }
            }
        }

        if let Ok(timeout) = std::env::var("FEED_FETCH_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse::<u64>() {
                if (1..=60).contains(&value) {
                    config.fetch_timeout_seconds = value;
                }
            }
        }

        if let Ok(limit) = std::env::var("FEED_FETCH_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                if (1..=100).contains(&value) {
                    config.fetch_limit = value;
                }
            }
        }

        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            if !token.is_empty() {
                config.telegram_bot_token = Some(token);
            }
        }

        if let Ok(chat_id) = std::env::var("TELEGRAM_CHAT_ID") {
            match chat_id.parse::<i64>() {
                Ok(value) => config.telegram_chat_id = Some(value),
                Err(e) => {
                    tracing::warn!("Failed to parse TELEGRAM_CHAT_ID '{}': {}", chat_id, e);
                }
            }
        }

        config
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}
