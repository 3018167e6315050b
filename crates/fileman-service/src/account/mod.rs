//! Account quota and enable/disable.

pub mod service;

pub use service::{AccountService, QuotaSummary};
