/// Video-agent platform port trait
///
/// Defines the interface for the upstream conversational-video platform:
/// fetching authoritative conversation metadata after the fact, and creating
/// new agent sessions.
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Authoritative metadata for one conversation, fetched fresh per invocation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConversationMetadata {
    #[serde(default)]
    pub recording_url: Option<String>,
    /// Raw transcript value; shape varies, so normalization happens downstream
    #[serde(default)]
    pub transcript: Option<Value>,
}

/// Request to create a new agent session on the platform
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateConversationRequest {
    pub persona_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversational_context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_greeting: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub document_tags: Vec<String>,
    pub properties: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}

/// Port trait for the video-agent platform
#[async_trait]
pub trait VideoAgentPort: Send + Sync {
    /// Fetch conversation metadata (recording URL, canonical transcript)
    async fn fetch_conversation(&self, conversation_id: &str) -> Result<ConversationMetadata>;

    /// Create a new agent session, returning the platform's response verbatim
    async fn create_conversation(&self, request: &CreateConversationRequest) -> Result<Value>;
}
