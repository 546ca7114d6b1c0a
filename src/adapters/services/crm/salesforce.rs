//! Salesforce CRM adapter
//!
//! Implements the CrmPort by authenticating with the client-credentials
//! OAuth flow and creating Lead sobjects through the REST API. Each call
//! authenticates fresh; tokens are short-lived and invocations are rare.

use crate::domain::models::LeadRecord;
use crate::error::{AppError, Result};
use crate::ports::crm::CrmPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_VERSION: &str = "v60.0";
const LEAD_SOURCE: &str = "AI Video Agent";

/// Salesforce client implementation
pub struct SalesforceClient {
    client: Client,
    login_url: String,
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    access_token: String,
    instance_url: String,
}

#[derive(Debug, Serialize)]
struct LeadPayload {
    #[serde(rename = "FirstName", skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(rename = "LastName")]
    last_name: String,
    #[serde(rename = "Company")]
    company: String,
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(rename = "Phone", skip_serializing_if = "Option::is_none")]
    phone: Option<String>,
    #[serde(rename = "LeadSource")]
    lead_source: String,
    #[serde(rename = "Description")]
    description: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

impl SalesforceClient {
    /// Create a new client for the given connected app
    pub fn new(login_url: String, client_id: String, client_secret: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            login_url: login_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        }
    }

    /// Get an access token via the client-credentials flow
    async fn authenticate(&self) -> Result<AuthResponse> {
        let response = self
            .client
            .post(format!("{}/services/oauth2/token", self.login_url))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Crm(format!("Auth request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Crm(format!(
                "Auth rejected ({}): {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Crm(format!("Failed to parse auth response: {}", e)))
    }

    fn lead_payload(lead: &LeadRecord) -> LeadPayload {
        let (first_name, last_name) = split_name(&lead.lead_name);

        let mut description = lead.sales_plan.clone();
        if !lead.pain_points.is_empty() {
            description.push_str("\n\nPain points: ");
            description.push_str(&lead.pain_points.join("; "));
        }

        LeadPayload {
            first_name,
            last_name,
            company: if lead.company_name.is_empty() {
                "Unknown".to_string()
            } else {
                lead.company_name.clone()
            },
            email: Some(lead.lead_email.clone()).filter(|e| !e.is_empty()),
            phone: Some(lead.lead_phone.clone()).filter(|p| !p.is_empty()),
            lead_source: LEAD_SOURCE.to_string(),
            description,
        }
    }
}

/// Split a display name into Salesforce's FirstName/LastName shape.
///
/// LastName is mandatory on Lead, so a single-token name becomes the last
/// name.
fn split_name(name: &str) -> (Option<String>, String) {
    let mut parts: Vec<&str> = name.split_whitespace().collect();
    match parts.len() {
        0 => (None, "Unknown".to_string()),
        1 => (None, parts[0].to_string()),
        _ => {
            let last = parts.pop().unwrap_or_default().to_string();
            (Some(parts.join(" ")), last)
        }
    }
}

#[async_trait]
impl CrmPort for SalesforceClient {
    async fn create_lead(&self, lead: &LeadRecord) -> Result<String> {
        let auth = self.authenticate().await?;

        let response = self
            .client
            .post(format!(
                "{}/services/data/{}/sobjects/Lead",
                auth.instance_url, API_VERSION
            ))
            .header("Authorization", format!("Bearer {}", auth.access_token))
            .json(&Self::lead_payload(lead))
            .send()
            .await
            .map_err(|e| AppError::Crm(format!("Lead create request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Crm(format!(
                "Lead create rejected ({}): {}",
                status, error_text
            )));
        }

        let created: CreateResponse = response
            .json()
            .await
            .map_err(|e| AppError::Crm(format!("Failed to parse create response: {}", e)))?;

        log::info!("Created CRM lead {}", created.id);
        Ok(created.id)
    }
}
