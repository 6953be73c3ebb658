pub mod commission;
pub mod message;
