/// Domain layer - core business models and pure logic
///
/// These modules are platform-agnostic: event and lead models, transcript
/// normalization, prompt templates, and outbound email rendering.
pub mod email;
pub mod models;
pub mod prompts;
pub mod transcript;

pub use models::{EventProperties, LeadRecord, RawEvent};
pub use prompts::PromptTemplates;
