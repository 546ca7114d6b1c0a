//! Mail service adapters

pub mod resend;

pub use resend::ResendMailer;
