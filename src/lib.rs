#![deny(missing_docs)]

//! Core library for the financial news agent tool server.

/// Financial news analysis pipeline stages.
pub mod analysis;
/// HTTP routing for tool discovery and tool calls.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Model Context Protocol server implementation.
pub mod mcp;
