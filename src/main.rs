mod application;
mod config;
mod domain;
mod infrastructure;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::handlers::{commission_handler, feed_handler};
use crate::application::state::AppState;
use crate::domain::services::commission::CommissionEngine;
use crate::domain::services::feed::MessageFeedService;
use crate::domain::services::ledger::CommissionLedger;
use crate::infrastructure::telegram_client::{TelegramChannelClient, TelegramConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mtm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("MTM core service starting...");

    let config = config::AppConfig::from_env();

    let bot_token = match &config.telegram_bot_token {
        Some(token) => token.clone(),
        None => {
            warn!("TELEGRAM_BOT_TOKEN not set; upstream fetches will fail soft to empty batches");
            String::new()
        }
    };

    let channel = Arc::new(TelegramChannelClient::new(TelegramConfig::new(
        &bot_token,
        config.telegram_chat_id,
        config.fetch_timeout(),
    ))?);

    let feed = MessageFeedService::new(channel, config.cache_ttl(), config.fetch_limit);
    let engine = CommissionEngine::with_default_rules();
    let ledger = CommissionLedger::new();

    info!(
        cache_ttl_seconds = config.cache_ttl_seconds,
        fetch_limit = config.fetch_limit,
        "Services initialized"
    );

    let state = Arc::new(AppState::new(feed, engine, ledger));

    let app = Router::new()
        .route("/", get(|| async { "MTM core service is running!" }))
        .route("/health", get(health_check))
        .route("/messages", get(feed_handler::get_recent_messages))
        .route(
            "/messages/type/:type",
            get(feed_handler::get_messages_by_type),
        )
        .route(
            "/messages/category/:category",
            get(feed_handler::get_messages_by_category),
        )
        .route("/cache/clear", post(feed_handler::clear_cache))
        .route(
            "/commissions",
            post(commission_handler::record_commission),
        )
        .route(
            "/commissions/status",
            put(commission_handler::bulk_update_commission_status),
        )
        .route(
            "/commissions/:id/status",
            put(commission_handler::update_commission_status),
        )
        .route(
            "/affiliates/:username/commissions",
            get(commission_handler::get_affiliate_commissions),
        )
        .route(
            "/affiliates/:username/code",
            post(commission_handler::generate_affiliate_code),
        )
        .route(
            "/affiliates/eligibility/:role",
            get(commission_handler::check_affiliate_eligibility),
        )
        .with_state(state);

    let addr: SocketAddr = config.bind_address.parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server = axum::serve(listener, app);

    let shutdown_signal = async move {
        let ctrl_c = async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C signal"),
                Err(e) => error!("Failed to install Ctrl+C handler: {}", e),
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sig) => {
                    sig.recv().await;
                    info!("Received SIGTERM signal");
                }
                Err(e) => error!("Failed to install SIGTERM handler: {}", e),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    };

    info!("Server started successfully. Press Ctrl+C to stop.");
    server.with_graceful_shutdown(shutdown_signal).await?;

    info!("Shutdown complete");
    Ok(())
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let stats = state.feed.cache_stats().await;
    let channel_healthy = state.feed.channel_healthy().await;

    Json(serde_json::json!({
        "status": "running",
        "channel_healthy": channel_healthy,
        "cache": {
            "size": state.feed.cache_size().await,
            "hits": stats.hits,
            "misses": stats.misses,
            "hit_rate": format!("{:.2}%", stats.hit_rate()),
        },
        "ledger_records": state.ledger.len().await,
    }))
}
