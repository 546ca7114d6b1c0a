//! Spreadsheet service adapters

pub mod google;

pub use google::GoogleSheetsClient;
