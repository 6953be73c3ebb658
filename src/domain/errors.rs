use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the commission engine and ledger for genuinely invalid
/// input. "Not found" cases keep their sentinel returns (`0.0` / `false`) on
/// the default API; these errors only surface on the strict variants.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", content = "message")]
pub enum CommissionError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("No commission rule for product: {0}")]
    RuleNotFound(String),

    #[error("Invalid commission status: {0}")]
    InvalidStatus(String),

    #[error("Invalid record id: {0}")]
    InvalidRecordId(String),
}
