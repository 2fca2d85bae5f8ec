//! ExplainThis - validated LLM text simplification
//!
//! Core library: the prompt catalog, response validator and retry loop,
//! plus the configuration, HTTP server and terminal front ends built on it.

pub mod cli;
pub mod config;
pub mod core;
pub mod server;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
