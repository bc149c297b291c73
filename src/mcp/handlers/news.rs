//! Handler for the `analyze_news` tool.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use crate::{analysis::NewsAgent, mcp::dispatch::ToolError};

use super::parse_arguments;

/// Request payload accepted by the `analyze_news` tool.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct AnalyzeNewsRequest {
    /// News source URLs, summarized in the given order.
    pub(crate) sources: Vec<String>,
}

/// Handle the `analyze_news` tool by classifying each source and averaging its signals.
pub(crate) fn handle_analyze_news(
    agent: &dyn NewsAgent,
    arguments: Option<JsonObject>,
) -> Result<Value, ToolError> {
    let AnalyzeNewsRequest { sources } = parse_arguments(arguments)?;
    let batch = agent.analyze_news(&sources)?;
    Ok(serde_json::to_value(batch)?)
}
