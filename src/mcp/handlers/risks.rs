//! Handler for the `detect_risks_opportunities` tool.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    analysis::{IndicatorSet, NewsAgent},
    mcp::dispatch::ToolError,
};

use super::parse_arguments;

/// Request payload accepted by the `detect_risks_opportunities` tool.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DetectRequest {
    /// News summaries scanned for sentiment keywords.
    pub(crate) summaries: Vec<String>,
    pub(crate) inflation: f64,
    pub(crate) exchange_rate: f64,
    pub(crate) interest_rate: f64,
    /// Firm named in every emitted statement.
    pub(crate) firm: String,
}

/// Handle the `detect_risks_opportunities` tool.
pub(crate) fn handle_detect_risks_opportunities(
    agent: &dyn NewsAgent,
    arguments: Option<JsonObject>,
) -> Result<Value, ToolError> {
    let DetectRequest {
        summaries,
        inflation,
        exchange_rate,
        interest_rate,
        firm,
    } = parse_arguments(arguments)?;

    let indicators = IndicatorSet {
        inflation,
        exchange_rate,
        interest_rate,
    };
    let report = agent.detect_risks_opportunities(&summaries, &indicators, &firm);
    Ok(serde_json::to_value(report)?)
}
