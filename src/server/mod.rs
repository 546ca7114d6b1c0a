//! HTTP surface
//!
//! A small axum router: the webhook entry point plus the peripheral
//! session-creation, access-gate, and health endpoints.

pub mod access;
pub mod health;
pub mod sessions;
pub mod webhook;

use crate::config::AppConfig;
use crate::pipeline::Pipeline;
use crate::ports::video::VideoAgentPort;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<Pipeline>,
    /// Platform handle for session creation; shared with the pipeline
    pub video: Option<Arc<dyn VideoAgentPort>>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: Arc<AppConfig>,
        pipeline: Arc<Pipeline>,
        video: Option<Arc<dyn VideoAgentPort>>,
    ) -> Self {
        Self {
            config,
            pipeline,
            video,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook::handle_webhook))
        .route("/sessions", post(sessions::create_session))
        .route("/access", post(access::check_access))
        .route("/health", get(health::health_check))
        .with_state(state)
}
