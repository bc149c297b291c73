//! Handler for the `compute_metric_updates` tool.

use rmcp::model::JsonObject;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    analysis::{IndicatorDelta, IndicatorSet, NewsAgent},
    mcp::dispatch::ToolError,
};

use super::parse_arguments;

/// Request payload accepted by the `compute_metric_updates` tool.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MetricUpdatesRequest {
    pub(crate) inflation_pct: f64,
    pub(crate) exchange_rate_pct: f64,
    pub(crate) interest_rate_pct: f64,
    pub(crate) yesterday_inflation: f64,
    pub(crate) yesterday_exchange_rate: f64,
    pub(crate) yesterday_interest_rate: f64,
}

impl From<MetricUpdatesRequest> for IndicatorDelta {
    fn from(request: MetricUpdatesRequest) -> Self {
        IndicatorDelta {
            inflation_pct: request.inflation_pct,
            exchange_rate_pct: request.exchange_rate_pct,
            interest_rate_pct: request.interest_rate_pct,
            prior: IndicatorSet {
                inflation: request.yesterday_inflation,
                exchange_rate: request.yesterday_exchange_rate,
                interest_rate: request.yesterday_interest_rate,
            },
        }
    }
}

/// Handle the `compute_metric_updates` tool by projecting yesterday's indicators forward.
pub(crate) fn handle_compute_metric_updates(
    agent: &dyn NewsAgent,
    arguments: Option<JsonObject>,
) -> Result<Value, ToolError> {
    let request: MetricUpdatesRequest = parse_arguments(arguments)?;
    let indicators = agent.compute_metric_updates(&request.into());
    Ok(serde_json::to_value(indicators)?)
}
