//! Google Sheets adapter
//!
//! Implements the SpreadsheetPort by appending rows through the Sheets
//! values API. Authentication uses a pre-provisioned OAuth bearer token;
//! token minting is an ops concern outside this service.

use crate::error::{AppError, Result};
use crate::ports::spreadsheet::SpreadsheetPort;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
/// Column span matching the lead-row layout written by the dispatcher
const APPEND_RANGE: &str = "Sheet1!A:Q";

/// Google Sheets client, constructed once at startup and shared
pub struct GoogleSheetsClient {
    client: Client,
    access_token: String,
    sheet_id: String,
}

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    values: Vec<&'a [String]>,
}

impl GoogleSheetsClient {
    /// Create a new client for the given spreadsheet
    pub fn new(access_token: String, sheet_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            access_token,
            sheet_id,
        }
    }
}

#[async_trait]
impl SpreadsheetPort for GoogleSheetsClient {
    async fn append_row(&self, values: &[String]) -> Result<()> {
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=USER_ENTERED",
            SHEETS_API_BASE, self.sheet_id, APPEND_RANGE
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(&AppendRequest {
                values: vec![values],
            })
            .send()
            .await
            .map_err(|e| AppError::Spreadsheet(format!("Append request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::Spreadsheet(format!(
                "Append rejected ({}): {}",
                status, error_text
            )));
        }

        log::info!("Appended row of {} cells to sheet", values.len());
        Ok(())
    }
}
