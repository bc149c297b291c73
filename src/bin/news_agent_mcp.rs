//! MCP server entrypoint (stdio transport).
//!
//! Serves the four analysis tools and the usage/rules resources over stdio so agent hosts can
//! launch the process and route tool calls to it. Logging stays on stderr and the log file;
//! stdout belongs to the protocol.
use anyhow::{Context, Result};
use news_agent::{analysis::FinancialNewsAgent, config, logging, mcp::NewsAgentMcpServer};
use rmcp::{service::ServiceExt, transport::stdio};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let config = config::init_config().context("failed to load configuration")?;

    let server = NewsAgentMcpServer::new(Arc::new(FinancialNewsAgent::new()))
        .with_pretty_json(config.pretty_json);

    tracing::info!("Starting MCP server over stdio");
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server over stdio")?;

    service
        .waiting()
        .await
        .context("MCP server terminated unexpectedly")?;

    tracing::info!("MCP client disconnected");
    Ok(())
}
