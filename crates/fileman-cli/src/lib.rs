//! # fileman-cli
//!
//! Terminal front end: parses commands with `clap`, drives the services in
//! `fileman-service` and renders the tree and listings through
//! [`view::TerminalView`].

pub mod commands;
pub mod output;
pub mod view;

pub use commands::Cli;
