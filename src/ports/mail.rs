/// Mail port trait
///
/// Defines the interface for the transactional email collaborator.
use crate::error::Result;
use async_trait::async_trait;

/// A file attached to an outbound email
#[derive(Debug, Clone)]
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// One outbound email
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub attachments: Vec<Attachment>,
}

/// Port trait for mail services
#[async_trait]
pub trait MailerPort: Send + Sync {
    /// Send a single email
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
