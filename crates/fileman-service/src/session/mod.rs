//! Login state.

pub mod service;

pub use service::SessionService;
