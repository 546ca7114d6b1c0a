//! Session creation endpoint
//!
//! Creates a new agent conversation on the video platform. The persona id is
//! held server-side; clients only influence the greeting, tags, and session
//! properties. The greeting is scrubbed of text-to-speech hazards before it
//! is sent upstream.

use crate::ports::video::CreateConversationRequest;
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

const DEFAULT_GREETING: &str = "Hey! I'm your guide here. I'm happy to answer questions, share ideas, or just talk through what you're working on. What brings you here today?";
const DEFAULT_CONVERSATION_NAME: &str = "Lead Relay Session";
const MAX_CALL_DURATION_SECS: u32 = 2700;
const PARTICIPANT_TIMEOUT_SECS: u32 = 60;

/// POST /sessions request body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    pub conversation_name: Option<String>,
    pub custom_greeting: Option<String>,
    pub audio_only: Option<bool>,
    pub memory_id: Option<String>,
    pub document_tags: Option<Vec<String>>,
    /// Extra session properties (verified identity fields among them),
    /// merged over the server defaults
    pub properties: Option<Value>,
}

/// POST /sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Response {
    let Some(video) = &state.video else {
        log::error!("Session creation requested but no platform credential configured");
        return server_config_error();
    };
    let Some(persona_id) = state.config.video_persona_id.clone() else {
        log::error!("Session creation requested but no persona id configured");
        return server_config_error();
    };

    let greeting = clean_greeting_for_tts(
        request.custom_greeting.as_deref().unwrap_or(DEFAULT_GREETING),
    );

    let mut properties = json!({
        "max_call_duration": MAX_CALL_DURATION_SECS,
        "enable_recording": true,
        "participant_absent_timeout": PARTICIPANT_TIMEOUT_SECS,
        "participant_left_timeout": PARTICIPANT_TIMEOUT_SECS,
    });
    if let (Value::Object(base), Some(Value::Object(extra))) =
        (&mut properties, request.properties)
    {
        for (key, value) in extra {
            base.insert(key, value);
        }
    }

    let callback_url = state.config.webhook_callback_url();
    log::info!("Webhook callback URL for new session: {:?}", callback_url);

    let create = CreateConversationRequest {
        persona_id,
        conversation_name: Some(
            request
                .conversation_name
                .unwrap_or_else(|| DEFAULT_CONVERSATION_NAME.to_string()),
        ),
        conversational_context: state.config.agent_context.clone(),
        custom_greeting: Some(greeting),
        document_tags: request.document_tags.unwrap_or_default(),
        properties,
        audio_only: request.audio_only,
        memory_id: request.memory_id,
        callback_url,
    };

    match video.create_conversation(&create).await {
        Ok(created) => Json(created).into_response(),
        Err(e) => {
            log::error!("Session creation failed: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    }
}

fn server_config_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Server configuration error"})),
    )
        .into_response()
}

/// Scrub a greeting so speech synthesis reads it naturally: collapse
/// whitespace, and turn ellipses and em-dashes into plain pauses.
fn clean_greeting_for_tts(greeting: &str) -> String {
    let collapsed = greeting.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .replace("...", ",")
        .replace('\u{2014}', ",")
        .trim()
        .to_string()
}
