/// Error types for lead-relay
///
/// Uses thiserror for ergonomic error handling with proper Display implementations.
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Video agent API error: {0}")]
    VideoAgent(String),

    #[error("Lead analysis error: {0}")]
    Analysis(String),

    #[error("Mail service error: {0}")]
    Mail(String),

    #[error("Spreadsheet service error: {0}")]
    Spreadsheet(String),

    #[error("CRM service error: {0}")]
    Crm(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
