//! Model Context Protocol (MCP) integration for the news agent.
//!
//! The server advertises one tool per pipeline stage: `analyze_news`,
//! `compute_metric_updates`, `detect_risks_opportunities`, and `generate_recommendations`.
//! Two read-only resources, `mcp://news-agent/usage` and `mcp://news-agent/rules`, describe the
//! call chain and the rule tables behind the heuristics.
//!
//! Dispatch, handlers, schemas, and formatting live in focused submodules; the HTTP surface in
//! [`crate::api`] reuses the same dispatcher so both interfaces answer identically.

pub mod dispatch;
pub mod format;
mod handlers;
mod registry;
pub(crate) mod schemas;
mod server;

pub use dispatch::{Operation, ToolError, dispatch};
pub use format::{ToolEnvelope, ToolReply};
pub use server::NewsAgentMcpServer;
