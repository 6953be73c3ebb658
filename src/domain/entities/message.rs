use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of content a channel message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Signal,
    Analysis,
    MarketUpdate,
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::Signal => write!(f, "signal"),
            MessageType::Analysis => write!(f, "analysis"),
            MessageType::MarketUpdate => write!(f, "market_update"),
        }
    }
}

impl std::str::FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signal" => Ok(MessageType::Signal),
            "analysis" => Ok(MessageType::Analysis),
            "market_update" => Ok(MessageType::MarketUpdate),
            other => Err(format!("Unknown message type: {}", other)),
        }
    }
}

/// Trade direction extracted from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "buy"),
            TradeDirection::Sell => write!(f, "sell"),
        }
    }
}

/// Market category of the instrument a message talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Forex,
    Crypto,
    Commodities,
}

impl std::fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageCategory::Forex => write!(f, "forex"),
            MessageCategory::Crypto => write!(f, "crypto"),
            MessageCategory::Commodities => write!(f, "commodities"),
        }
    }
}

impl std::str::FromStr for MessageCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forex" => Ok(MessageCategory::Forex),
            "crypto" => Ok(MessageCategory::Crypto),
            "commodities" => Ok(MessageCategory::Commodities),
            other => Err(format!("Unknown message category: {}", other)),
        }
    }
}

/// A raw message as pulled from the upstream channel, before classification.
#[derive(Debug, Clone)]
pub struct RawChannelMessage {
    pub id: i64,
    pub text: String,
    pub author: Option<String>,
    /// Original send time reported by the channel.
    pub timestamp: DateTime<Utc>,
}

/// A channel message after classification. Immutable once produced;
/// `message_type` and `category` are always assigned, `symbol` and
/// `direction` only when a pattern matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMessage {
    pub id: String,
    pub content: String,
    pub author: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    pub symbol: Option<String>,
    pub direction: Option<TradeDirection>,
    pub category: MessageCategory,
}
