//! Webhook entry point
//!
//! Routes inbound platform events: shutdown notices are acknowledged
//! immediately, transcription-ready events run the full pipeline, and
//! everything else gets a generic acknowledgement. A malformed body is the
//! only caller-visible failure; nothing from the pipeline ever escapes to
//! the response, so the sender never retry-storms on partial failures.

use crate::domain::models::{RawEvent, EVENT_SHUTDOWN, EVENT_TRANSCRIPTION_READY};
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// POST /webhook
pub async fn handle_webhook(State(state): State<AppState>, body: String) -> Response {
    let event: RawEvent = match serde_json::from_str(&body) {
        Ok(event) => event,
        Err(e) => {
            log::error!("Failed to parse webhook body: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Internal Server Error"})),
            )
                .into_response();
        }
    };

    let event_type = event.event_type.as_deref().unwrap_or("unknown");
    log::info!(
        "Received event {} for conversation {}",
        event_type,
        event.conversation_id.as_deref().unwrap_or("unknown")
    );

    match event_type {
        EVENT_SHUTDOWN => {
            log::info!("Shutdown acknowledged; no transcript in this event");
            Json(json!({"message": "Shutdown acknowledged"})).into_response()
        }
        EVENT_TRANSCRIPTION_READY => {
            let report = state.pipeline.run(&event).await;
            log::info!(
                "Pipeline complete for {} ({} transcript chars, analyzed: {}): {}",
                report.conversation_id,
                report.transcript_chars,
                report.analyzed,
                report.sinks.summary()
            );
            Json(json!({"message": "Event processed"})).into_response()
        }
        other => {
            log::info!("Ignoring unhandled event type: {}", other);
            Json(json!({
                "message": format!("Event {} acknowledged but not processed", other)
            }))
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::pipeline::Pipeline;
    use crate::ports::mocks::{MockAnalyzer, MockMailer, MockSpreadsheet, MockVideoAgent};
    use crate::server::build_router;
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn router_with(pipeline: Pipeline) -> Router {
        let state = AppState::new(Arc::new(AppConfig::default()), Arc::new(pipeline), None);
        build_router(state)
    }

    async fn post_webhook(app: Router, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_shutdown_event_acknowledged_without_collaborator_calls() {
        let analyzer = Arc::new(MockAnalyzer::failing());
        let video = Arc::new(MockVideoAgent::always_failing());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()))
            .with_analyzer(analyzer.clone())
            .with_video(video.clone());

        let (status, body) = post_webhook(
            router_with(pipeline),
            r#"{"event_type": "system.shutdown", "conversation_id": "c1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Shutdown acknowledged");
        assert_eq!(analyzer.calls(), 0);
        assert_eq!(video.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_event_acknowledged_but_not_processed() {
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()));
        let (status, body) = post_webhook(
            router_with(pipeline),
            r#"{"event_type": "system.replica_joined", "conversation_id": "c1"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            "Event system.replica_joined acknowledged but not processed"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_returns_generic_500() {
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()));
        let (status, body) = post_webhook(router_with(pipeline), "{not valid json").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
    }

    #[tokio::test]
    async fn test_transcription_ready_runs_pipeline_and_returns_200() {
        let mailer = Arc::new(MockMailer::new());
        let sheet = Arc::new(MockSpreadsheet::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()))
            .with_mailer(mailer.clone())
            .with_spreadsheet(sheet.clone());

        let (status, body) = post_webhook(
            router_with(pipeline),
            r#"{
                "event_type": "application.transcription_ready",
                "conversation_id": "c1",
                "properties": {
                    "transcript": [
                        {"role": "user", "content": "Hi, I run a plumbing company with twelve trucks"},
                        {"role": "assistant", "content": "Great to meet you! Tell me about your dispatch process"},
                        {"role": "user", "content": "It's all on paper today and we keep missing calls"}
                    ]
                }
            }"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event processed");
        assert_eq!(mailer.sent_count(), 2);
        assert_eq!(sheet.row_count(), 1);
    }

    #[tokio::test]
    async fn test_mail_outage_still_returns_200() {
        let mailer = Arc::new(MockMailer::failing());
        let sheet = Arc::new(MockSpreadsheet::new());
        let pipeline = Pipeline::new(Arc::new(AppConfig::default()))
            .with_mailer(mailer.clone())
            .with_spreadsheet(sheet.clone());

        let (status, body) = post_webhook(
            router_with(pipeline),
            r#"{"event_type": "application.transcription_ready", "conversation_id": "c1", "transcript": "user: hello"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Event processed");
        assert_eq!(sheet.row_count(), 1);
    }
}
