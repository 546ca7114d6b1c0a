//! OpenAI lead-analysis adapter
//!
//! Implements the LeadAnalyzerPort against OpenAI's chat completion API,
//! asking for a JSON object and deserializing it into a LeadRecord.

use crate::domain::models::LeadRecord;
use crate::domain::PromptTemplates;
use crate::error::{AppError, Result};
use crate::ports::analyzer::LeadAnalyzerPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const ANALYSIS_TEMPERATURE: f32 = 0.2;
const ANALYSIS_MAX_TOKENS: u32 = 1500;

/// OpenAI analyzer implementation
pub struct OpenAiAnalyzer {
    client: Client,
    api_key: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl OpenAiAnalyzer {
    /// Create a new analyzer with the given API key and model
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
        }
    }

    async fn complete(&self, prompt: String) -> Result<String> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: ANALYSIS_TEMPERATURE,
            max_tokens: ANALYSIS_MAX_TOKENS,
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
        };

        log::info!("Calling OpenAI chat completion with model: {}", self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", OPENAI_API_BASE))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Analysis(format!("Chat completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Analysis(format!(
                "Chat completion failed: {}",
                error_text
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Analysis(format!("Failed to parse completion response: {}", e)))?;

        let content = completion_response
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| AppError::Analysis("No completion choices returned".to_string()))?;

        log::info!(
            "OpenAI completion successful, generated {} characters",
            content.len()
        );

        Ok(content)
    }
}

/// Strip a surrounding markdown code fence, if the model added one
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches('\n')
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[async_trait]
impl LeadAnalyzerPort for OpenAiAnalyzer {
    async fn analyze(&self, transcript: &str) -> Result<LeadRecord> {
        let prompt = PromptTemplates::lead_analysis().replace("{transcript}", transcript);
        let content = self.complete(prompt).await?;

        let record: LeadRecord = serde_json::from_str(strip_code_fence(&content))
            .map_err(|e| AppError::Analysis(format!("Failed to parse lead record: {}", e)))?;

        Ok(record)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
