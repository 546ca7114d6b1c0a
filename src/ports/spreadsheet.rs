/// Spreadsheet port trait
///
/// Defines the interface for the analytics spreadsheet collaborator. One row
/// is appended per processed conversation.
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for spreadsheet services
#[async_trait]
pub trait SpreadsheetPort: Send + Sync {
    /// Append one row of cell values
    async fn append_row(&self, values: &[String]) -> Result<()>;
}
