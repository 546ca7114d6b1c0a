//! LLM service adapters
//!
//! Implementations of the LeadAnalyzerPort trait.

pub mod openai;

pub use openai::OpenAiAnalyzer;
