use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::commission::{CommissionRecord, CommissionStatus, NewCommission};

/// Append-only in-memory history of commission records.
///
/// Records are never deleted; only their status changes. The store is shared
/// process-wide state behind a lock so concurrent request handlers serialize
/// their writes. Construct one per composition root (or per test) rather
/// than holding a global.
pub struct CommissionLedger {
    records: Arc<RwLock<Vec<CommissionRecord>>>,
    sequence: AtomicU64,
}

impl CommissionLedger {
    pub fn new() -> Self {
        CommissionLedger {
            records: Arc::new(RwLock::new(Vec::new())),
            sequence: AtomicU64::new(0),
        }
    }

    /// Append a new record with status `Pending`. No duplicate detection.
    ///
    /// Ids are timestamp-derived with a sequence suffix so records created
    /// within the same millisecond stay distinguishable.
    pub async fn record(&self, entry: NewCommission) -> CommissionRecord {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        let record = CommissionRecord {
            id: format!("com_{}_{}", Utc::now().timestamp_millis(), seq),
            affiliate_username: entry.affiliate_username,
            customer_username: entry.customer_username,
            product_id: entry.product_id,
            product_name: entry.product_name,
            amount: entry.amount,
            date: Utc::now(),
            status: CommissionStatus::Pending,
        };

        let mut records = self.records.write().await;
        records.push(record.clone());

        debug!(
            id = %record.id,
            affiliate = %record.affiliate_username,
            product_id = %record.product_id,
            amount = record.amount,
            "Commission recorded"
        );

        record
    }

    /// Replace the status of the record with `id` in place. Returns false
    /// and leaves the store untouched when the id is unknown.
    pub async fn update_status(&self, id: &str, status: CommissionStatus) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                debug!(
                    id = %id,
                    from = %record.status,
                    to = %status,
                    "Commission status updated"
                );
                record.status = status;
                true
            }
            None => {
                debug!(id = %id, "Commission status update for unknown id");
                false
            }
        }
    }

    /// Apply the same status to every id in the list. Ids not found are
    /// skipped; the returned count is the number of records actually
    /// updated, not the number of ids requested.
    pub async fn bulk_update_status(&self, ids: &[String], status: CommissionStatus) -> usize {
        let mut records = self.records.write().await;
        let mut updated = 0;
        for record in records.iter_mut() {
            if ids.iter().any(|id| *id == record.id) {
                record.status = status;
                updated += 1;
            }
        }
        debug!(
            requested = ids.len(),
            updated = updated,
            to = %status,
            "Bulk commission status update"
        );
        updated
    }

    /// All records earned by `username`, in insertion order.
    pub async fn commissions_for(&self, username: &str) -> Vec<CommissionRecord> {
        let records = self.records.read().await;
        records
            .iter()
            .filter(|r| r.affiliate_username == username)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for CommissionLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(affiliate: &str) -> NewCommission {
        NewCommission {
            affiliate_username: affiliate.to_string(),
            customer_username: "cliente1".to_string(),
            product_id: "mtm-scanner".to_string(),
            product_name: "MTM Scanner".to_string(),
            amount: 50.0,
        }
    }

    #[tokio::test]
    async fn test_record_starts_pending() {
        let ledger = CommissionLedger::new();
        let record = ledger.record(entry("joao")).await;
        assert_eq!(record.status, CommissionStatus::Pending);
        assert_eq!(record.affiliate_username, "joao");
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_record_then_query_roundtrip() {
        let ledger = CommissionLedger::new();
        let record = ledger.record(entry("joao")).await;

        let found = ledger.commissions_for("joao").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, record.id);
        assert_eq!(found[0].amount, 50.0);
        assert_eq!(found[0].status, CommissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_record_ids_are_distinct() {
        let ledger = CommissionLedger::new();
        let a = ledger.record(entry("joao")).await;
        let b = ledger.record(entry("joao")).await;
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_query_preserves_insertion_order() {
        let ledger = CommissionLedger::new();
        let a = ledger.record(entry("joao")).await;
        ledger.record(entry("maria")).await;
        let c = ledger.record(entry("joao")).await;

        let found = ledger.commissions_for("joao").await;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, a.id);
        assert_eq!(found[1].id, c.id);
    }

    #[tokio::test]
    async fn test_update_status() {
        let ledger = CommissionLedger::new();
        let record = ledger.record(entry("joao")).await;

        assert!(ledger.update_status(&record.id, CommissionStatus::Paid).await);
        let found = ledger.commissions_for("joao").await;
        assert_eq!(found[0].status, CommissionStatus::Paid);
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_leaves_store_unchanged() {
        let ledger = CommissionLedger::new();
        let record = ledger.record(entry("joao")).await;

        assert!(!ledger.update_status("com_0_999", CommissionStatus::Paid).await);
        let found = ledger.commissions_for("joao").await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, record.id);
        assert_eq!(found[0].status, CommissionStatus::Pending);
    }

    #[tokio::test]
    async fn test_bulk_update_reports_actual_count() {
        let ledger = CommissionLedger::new();
        let a = ledger.record(entry("joao")).await;
        let b = ledger.record(entry("joao")).await;

        let ids = vec![a.id.clone(), "com_0_999".to_string(), b.id.clone()];
        let updated = ledger.bulk_update_status(&ids, CommissionStatus::Cancelled).await;
        // One id did not exist, so only two records change.
        assert_eq!(updated, 2);

        let found = ledger.commissions_for("joao").await;
        assert!(found.iter().all(|r| r.status == CommissionStatus::Cancelled));
    }

    #[tokio::test]
    async fn test_commissions_for_unknown_affiliate_is_empty() {
        let ledger = CommissionLedger::new();
        ledger.record(entry("joao")).await;
        assert!(ledger.commissions_for("maria").await.is_empty());
    }
}
