//! Channel Client Trait
//!
//! This module defines the `ChannelClient` trait, the common interface for
//! upstream message channels the feed service pulls from. The abstraction
//! keeps the feed logic independent of any concrete messaging API and makes
//! the upstream trivially mockable in tests.

use crate::domain::entities::message::RawChannelMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Common result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Errors that can occur while pulling from an upstream channel.
///
/// Callers of the feed service never see these; the feed swallows them into
/// an empty batch per its fail-soft policy. They exist so the infrastructure
/// layer can log precisely what went wrong.
#[derive(Debug, Error, Clone)]
pub enum ChannelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned status {status}: {body}")]
    BadStatus { status: u16, body: String },

    #[error("Upstream rejected the request: {0}")]
    Rejected(String),

    #[error("Failed to parse upstream response: {0}")]
    Parse(String),

    #[error("Request timed out")]
    Timeout,
}

/// Pull-based upstream message source.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Name of this channel, for logging.
    fn name(&self) -> &str;

    /// Fetch the most recent raw messages from the channel.
    ///
    /// # Arguments
    /// * `limit` - Maximum number of updates to request upstream
    ///
    /// # Returns
    /// The batch of raw messages, in the order the channel reports them.
    async fn fetch_updates(&self, limit: usize) -> ChannelResult<Vec<RawChannelMessage>>;

    /// Check if the channel client is healthy and reachable
    async fn is_healthy(&self) -> bool {
        // Default implementation - can be overridden
        true
    }
}
