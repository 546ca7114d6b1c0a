//! CRM service adapters

pub mod salesforce;

pub use salesforce::SalesforceClient;
