//! Resend mail adapter
//!
//! Implements the MailerPort against the Resend transactional email API.

use crate::error::{AppError, Result};
use crate::ports::mail::{MailerPort, OutboundEmail};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const RESEND_API_BASE: &str = "https://api.resend.com";

/// Resend mailer implementation
pub struct ResendMailer {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<AttachmentPayload>,
}

#[derive(Debug, Serialize)]
struct AttachmentPayload {
    filename: String,
    /// Base64-encoded file content, per the Resend API
    content: String,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

impl ResendMailer {
    /// Create a new mailer with the given API key
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, api_key }
    }
}

#[async_trait]
impl MailerPort for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let request_body = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            attachments: email
                .attachments
                .iter()
                .map(|a| AttachmentPayload {
                    filename: a.filename.clone(),
                    content: general_purpose::STANDARD.encode(&a.content),
                })
                .collect(),
        };

        let response = self
            .client
            .post(format!("{}/emails", RESEND_API_BASE))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Send request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Mail(format!(
                "Send rejected ({}): {}",
                status, error_text
            )));
        }

        let send_response: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| AppError::Mail(format!("Failed to parse send response: {}", e)))?;

        log::info!(
            "Sent email \"{}\" to {} recipient(s) (id: {})",
            email.subject,
            email.to.len(),
            send_response.id.as_deref().unwrap_or("unknown")
        );

        Ok(())
    }
}
