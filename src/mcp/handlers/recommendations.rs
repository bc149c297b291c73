//! Handler for the `generate_recommendations` tool.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use crate::{analysis::NewsAgent, mcp::dispatch::ToolError};

use super::parse_arguments;

/// Request payload accepted by the `generate_recommendations` tool.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RecommendationsRequest {
    pub(crate) risks: Vec<String>,
    pub(crate) opportunities: Vec<String>,
}

/// Handle the `generate_recommendations` tool.
pub(crate) fn handle_generate_recommendations(
    agent: &dyn NewsAgent,
    arguments: Option<JsonObject>,
) -> Result<Value, ToolError> {
    let RecommendationsRequest {
        risks,
        opportunities,
    } = parse_arguments(arguments)?;
    let recommendation = agent.generate_recommendations(&risks, &opportunities);
    Ok(serde_json::to_value(recommendation)?)
}
