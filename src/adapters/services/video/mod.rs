//! Video-agent platform adapters

pub mod tavus;

pub use tavus::TavusClient;
