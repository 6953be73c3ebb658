use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::entities::message::{MessageCategory, MessageType, ProcessedMessage};
use crate::domain::repositories::channel_client::ChannelClient;
use crate::domain::services::classifier::MessageClassifier;

/// Cache performance statistics
#[derive(Clone, Debug, Default)]
pub struct FeedCacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl FeedCacheStats {
    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// The most recently fetched batch plus its fetch time.
#[derive(Default)]
struct CachedBatch {
    messages: Vec<ProcessedMessage>,
    fetched_at: Option<Instant>,
}

impl CachedBatch {
    fn is_fresh(&self, ttl: Duration) -> bool {
        match self.fetched_at {
            Some(at) => !self.messages.is_empty() && at.elapsed() < ttl,
            None => false,
        }
    }
}

/// Serves classified channel messages from a single process-wide TTL cache.
///
/// A request is answered from cache while the last batch is non-empty and
/// younger than the TTL; otherwise the service refetches upstream,
/// reclassifies, sorts newest-first and overwrites the cache. Upstream
/// failures never reach callers: they are logged and collapsed into an empty
/// batch so a dashboard renders "no messages" instead of crashing.
///
/// Two concurrent misses may both fetch and race to overwrite the cache.
/// Last write wins with equivalent data, which is acceptable here.
pub struct MessageFeedService {
    channel: Arc<dyn ChannelClient>,
    classifier: MessageClassifier,
    cache: Arc<RwLock<CachedBatch>>,
    cache_ttl: Duration,
    stats: Arc<RwLock<FeedCacheStats>>,
    fetch_limit: usize,
}

impl MessageFeedService {
    pub fn new(channel: Arc<dyn ChannelClient>, cache_ttl: Duration, fetch_limit: usize) -> Self {
        MessageFeedService {
            channel,
            classifier: MessageClassifier::new(),
            cache: Arc::new(RwLock::new(CachedBatch::default())),
            cache_ttl,
            stats: Arc::new(RwLock::new(FeedCacheStats::default())),
            fetch_limit,
        }
    }

    pub fn with_default_cache_ttl(channel: Arc<dyn ChannelClient>) -> Self {
        Self::new(channel, Duration::from_secs(300), 100) // 5 minutes default
    }

    /// The full current batch: from cache when fresh, refetched otherwise.
    async fn cached_or_refetch(&self) -> Vec<ProcessedMessage> {
        {
            let cache = self.cache.read().await;
            if cache.is_fresh(self.cache_ttl) {
                let mut stats = self.stats.write().await;
                stats.hits += 1;
                debug!(
                    channel = %self.channel.name(),
                    cached_count = cache.messages.len(),
                    cache_hit_rate = format!("{:.2}%", stats.hit_rate()),
                    "Cache hit - serving cached messages"
                );
                return cache.messages.clone();
            }
        }

        let mut stats = self.stats.write().await;
        stats.misses += 1;
        drop(stats);

        debug!(
            channel = %self.channel.name(),
            "Cache miss - fetching fresh messages"
        );

        let raw = match self.channel.fetch_updates(self.fetch_limit).await {
            Ok(batch) => batch,
            Err(e) => {
                // Fail soft: callers get an empty list, the cause goes to
                // the log for operators.
                warn!(
                    channel = %self.channel.name(),
                    error = %e,
                    "Upstream fetch failed, returning empty batch"
                );
                return Vec::new();
            }
        };

        let mut messages: Vec<ProcessedMessage> =
            raw.iter().map(|m| self.classifier.classify(m)).collect();
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        {
            let mut cache = self.cache.write().await;
            cache.messages = messages.clone();
            cache.fetched_at = Some(Instant::now());
        }

        info!(
            channel = %self.channel.name(),
            count = messages.len(),
            "Fetched and classified channel messages"
        );

        messages
    }

    /// Most recent messages, newest first, truncated to `limit`.
    pub async fn recent_messages(&self, limit: usize) -> Vec<ProcessedMessage> {
        let mut messages = self.cached_or_refetch().await;
        messages.truncate(limit);
        messages
    }

    /// Messages of one type. The full batch is filtered before truncation so
    /// a rare type is not under-returned.
    pub async fn messages_by_type(
        &self,
        message_type: MessageType,
        limit: usize,
    ) -> Vec<ProcessedMessage> {
        let mut messages: Vec<ProcessedMessage> = self
            .cached_or_refetch()
            .await
            .into_iter()
            .filter(|m| m.message_type == message_type)
            .collect();
        messages.truncate(limit);
        messages
    }

    /// Messages of one category, filtered before truncation.
    pub async fn messages_by_category(
        &self,
        category: MessageCategory,
        limit: usize,
    ) -> Vec<ProcessedMessage> {
        let mut messages: Vec<ProcessedMessage> = self
            .cached_or_refetch()
            .await
            .into_iter()
            .filter(|m| m.category == category)
            .collect();
        messages.truncate(limit);
        messages
    }

    /// Empty the cache and reset its timestamp so the next call always goes
    /// upstream.
    pub async fn clear_cache(&self) {
        let mut cache = self.cache.write().await;
        let cleared = cache.messages.len();
        cache.messages.clear();
        cache.fetched_at = None;
        debug!(cleared_messages = cleared, "Feed cache cleared");
    }

    pub async fn cache_size(&self) -> usize {
        self.cache.read().await.messages.len()
    }

    /// Whether the upstream channel reports itself reachable.
    pub async fn channel_healthy(&self) -> bool {
        self.channel.is_healthy().await
    }

    /// Get cache performance statistics
    pub async fn cache_stats(&self) -> FeedCacheStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::message::RawChannelMessage;
    use crate::domain::repositories::channel_client::{ChannelError, ChannelResult};
    use async_trait::async_trait;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockChannel {
        calls: AtomicUsize,
        fail: bool,
    }

    impl MockChannel {
        fn new() -> Self {
            MockChannel {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            MockChannel {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChannelClient for MockChannel {
        fn name(&self) -> &str {
            "mock"
        }

        async fn is_healthy(&self) -> bool {
            !self.fail
        }

        async fn fetch_updates(&self, _limit: usize) -> ChannelResult<Vec<RawChannelMessage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ChannelError::Network("connection refused".to_string()));
            }
            let base = Utc::now();
            Ok(vec![
                RawChannelMessage {
                    id: 1,
                    text: "EUR/USD - Análise Técnica da semana".to_string(),
                    author: None,
                    timestamp: base - ChronoDuration::minutes(30),
                },
                RawChannelMessage {
                    id: 2,
                    text: "🚀 XAUUSD - Sinal de Compra, TP: 2410".to_string(),
                    author: Some("MTM Sinais".to_string()),
                    timestamp: base,
                },
                RawChannelMessage {
                    id: 3,
                    text: "Venda em btc 📉".to_string(),
                    author: None,
                    timestamp: base - ChronoDuration::minutes(10),
                },
            ])
        }
    }

    #[tokio::test]
    async fn test_messages_sorted_newest_first() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel);

        let messages = service.recent_messages(10).await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].id, "2");
        assert_eq!(messages[1].id, "3");
        assert_eq!(messages[2].id, "1");
    }

    #[tokio::test]
    async fn test_repeated_calls_within_ttl_fetch_once() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel.clone());

        let first = service.recent_messages(10).await;
        let second = service.recent_messages(10).await;
        let third = service.recent_messages(5).await;

        assert_eq!(channel.call_count(), 1);
        assert_eq!(first, second);
        assert_eq!(third.len(), 3);

        let stats = service.cache_stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel.clone());

        service.recent_messages(10).await;
        service.clear_cache().await;
        assert_eq!(service.cache_size().await, 0);

        service.recent_messages(10).await;
        assert_eq!(channel.call_count(), 2);
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::new(channel.clone(), Duration::from_millis(50), 100);

        service.recent_messages(10).await;
        tokio::time::sleep(Duration::from_millis(80)).await;
        service.recent_messages(10).await;

        assert_eq!(channel.call_count(), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_returns_empty() {
        let channel = Arc::new(MockChannel::failing());
        let service = MessageFeedService::with_default_cache_ttl(channel.clone());

        let messages = service.recent_messages(10).await;
        assert!(messages.is_empty());
        assert_eq!(channel.call_count(), 1);

        // An empty cache is never served, so the next call tries again.
        let messages = service.recent_messages(10).await;
        assert!(messages.is_empty());
        assert_eq!(channel.call_count(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_type_before_truncation() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel);

        // With truncate-then-filter a limit of 1 could miss the analysis
        // message entirely; filtering the full batch first must find it.
        let messages = service
            .messages_by_type(MessageType::Analysis, 1)
            .await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, "1");
    }

    #[tokio::test]
    async fn test_filter_by_category_respects_limit_and_matches() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel);

        let messages = service
            .messages_by_category(MessageCategory::Crypto, 10)
            .await;
        assert_eq!(messages.len(), 1);
        assert!(messages
            .iter()
            .all(|m| m.category == MessageCategory::Crypto));

        let none = service
            .messages_by_category(MessageCategory::Crypto, 0)
            .await;
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_recent_messages_truncates_to_limit() {
        let channel = Arc::new(MockChannel::new());
        let service = MessageFeedService::with_default_cache_ttl(channel);

        let messages = service.recent_messages(2).await;
        assert_eq!(messages.len(), 2);
        // Truncation keeps the newest messages.
        assert_eq!(messages[0].id, "2");
    }

    #[tokio::test]
    async fn test_channel_health_reflects_upstream() {
        let healthy = MessageFeedService::with_default_cache_ttl(Arc::new(MockChannel::new()));
        assert!(healthy.channel_healthy().await);

        let failing = MessageFeedService::with_default_cache_ttl(Arc::new(MockChannel::failing()));
        assert!(!failing.channel_healthy().await);
    }
}
