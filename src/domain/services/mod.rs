pub mod classifier;
pub mod commission;
pub mod feed;
pub mod ledger;
