/// CRM port trait
///
/// Defines the interface for the CRM collaborator that receives qualified
/// lead records.
use crate::domain::models::LeadRecord;
use crate::error::Result;
use async_trait::async_trait;

/// Port trait for CRM services
#[async_trait]
pub trait CrmPort: Send + Sync {
    /// Create a lead in the CRM, returning the new record's id
    async fn create_lead(&self, lead: &LeadRecord) -> Result<String>;
}
