//! Tavus video-agent platform adapter
//!
//! Implements the VideoAgentPort: verbose conversation lookups for metadata
//! enrichment, and session creation for the /sessions endpoint.

use crate::error::{AppError, Result};
use crate::ports::video::{ConversationMetadata, CreateConversationRequest, VideoAgentPort};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "https://tavusapi.com/v2";

/// Tavus API client
pub struct TavusClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TavusClient {
    /// Create a new client with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the API base URL (self-hosted gateways, tests)
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Pull the upstream's own message out of whichever of its known error
/// shapes is present
pub(crate) fn extract_error_message(body: &Value) -> String {
    for key in ["message", "error", "detail"] {
        if let Some(message) = body.get(key).and_then(Value::as_str) {
            return message.to_string();
        }
    }
    body.to_string()
}

#[async_trait]
impl VideoAgentPort for TavusClient {
    async fn fetch_conversation(&self, conversation_id: &str) -> Result<ConversationMetadata> {
        let url = format!(
            "{}/conversations/{}?verbose=true",
            self.base_url, conversation_id
        );

        log::debug!("Fetching conversation metadata from {}", url);

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::VideoAgent(format!("Conversation fetch failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(AppError::VideoAgent(format!(
                "Conversation fetch rejected ({}): {}",
                status,
                extract_error_message(&body)
            )));
        }

        let metadata: ConversationMetadata = response
            .json()
            .await
            .map_err(|e| AppError::VideoAgent(format!("Failed to parse conversation: {}", e)))?;

        Ok(metadata)
    }

    async fn create_conversation(&self, request: &CreateConversationRequest) -> Result<Value> {
        let response = self
            .client
            .post(format!("{}/conversations", self.base_url))
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::VideoAgent(format!("Conversation create failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(AppError::VideoAgent(format!(
                "Conversation create rejected ({}): {}",
                status,
                extract_error_message(&body)
            )));
        }

        let created: Value = response
            .json()
            .await
            .map_err(|e| AppError::VideoAgent(format!("Failed to parse create response: {}", e)))?;

        log::info!(
            "Created conversation {}",
            created
                .get("conversation_id")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
        );

        Ok(created)
    }
}
