/// Adapters - implementations of the port traits for concrete services
pub mod services;
