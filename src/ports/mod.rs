/// Port trait definitions (interfaces)
///
/// These traits define the contracts for adapters to implement.
/// Following the ports-and-adapters (hexagonal) architecture pattern.
pub mod analyzer;
pub mod crm;
pub mod mail;
pub mod spreadsheet;
pub mod video;

#[cfg(test)]
pub mod mocks;

pub use analyzer::LeadAnalyzerPort;
pub use crm::CrmPort;
pub use mail::{Attachment, MailerPort, OutboundEmail};
pub use spreadsheet::SpreadsheetPort;
pub use video::{ConversationMetadata, CreateConversationRequest, VideoAgentPort};
