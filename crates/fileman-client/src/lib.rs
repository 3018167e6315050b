//! # fileman-client
//!
//! HTTP access to a JSON-speaking DAV server. [`DavHttpClient`] wraps a
//! `reqwest` client with a cookie jar and implements
//! [`fileman_core::traits::DavClient`].

pub mod client;
pub mod dav;
pub mod forms;
pub mod operations;
pub mod propfind;
pub mod session;
pub mod upload;

pub use client::DavHttpClient;
