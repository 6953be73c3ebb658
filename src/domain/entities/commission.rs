use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::CommissionError;

/// Lifecycle status of a commission ledger entry.
///
/// Records are created `Pending` and move to `Paid` or `Cancelled` via an
/// explicit status update. Transitions are not constrained beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommissionStatus {
    Pending,
    Paid,
    Cancelled,
}

impl std::fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommissionStatus::Pending => write!(f, "pending"),
            CommissionStatus::Paid => write!(f, "paid"),
            CommissionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for CommissionStatus {
    type Err = CommissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(CommissionStatus::Pending),
            "paid" => Ok(CommissionStatus::Paid),
            "cancelled" => Ok(CommissionStatus::Cancelled),
            other => Err(CommissionError::InvalidStatus(other.to_string())),
        }
    }
}

/// Static configuration mapping a product to its commission rate and
/// role-eligibility constraints. Loaded at construction, immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRule {
    pub product_id: String,
    pub product_name: String,
    /// Commission rate as a percentage (0-100).
    pub rate: f64,
    /// Informational reference price for the product.
    pub base_price: f64,
    pub minimum_role_required: String,
    /// Roles that are never eligible regardless of minimum role.
    pub excluded_roles: Vec<String>,
}

/// One ledger entry representing an earned payout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRecord {
    pub id: String,
    pub affiliate_username: String,
    pub customer_username: String,
    pub product_id: String,
    pub product_name: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: CommissionStatus,
}

/// Input for recording a new commission. The ledger assigns id, date and the
/// `Pending` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCommission {
    pub affiliate_username: String,
    pub customer_username: String,
    pub product_id: String,
    pub product_name: String,
    pub amount: f64,
}
