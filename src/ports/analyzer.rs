/// Lead analyzer port trait
///
/// Defines the interface for the natural-language analysis collaborator that
/// turns a conversation transcript into a structured lead record.
use crate::domain::models::LeadRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for lead analysis services
#[async_trait]
pub trait LeadAnalyzerPort: Send + Sync {
    /// Derive a structured lead record from normalized transcript text
    async fn analyze(&self, transcript: &str) -> Result<LeadRecord>;

    /// Get the provider name
    fn provider_name(&self) -> &str;
}
