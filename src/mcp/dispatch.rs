//! Name-keyed dispatch from tool calls to pipeline stages.
//!
//! Both the MCP server and the HTTP surface route calls through [`dispatch`]. A call either
//! yields the JSON value of the stage result or a [`ToolError`]; callers render both into the
//! same response envelope, so a failed call never breaks the transport.

use std::{fmt, str::FromStr};

use rmcp::model::JsonObject;
use serde_json::Value;
use thiserror::Error;

use crate::analysis::{AnalysisError, NewsAgent};

use super::handlers::{
    indicators::handle_compute_metric_updates, news::handle_analyze_news,
    recommendations::handle_generate_recommendations, risks::handle_detect_risks_opportunities,
};

/// Errors surfaced to callers as `{"error": message}` payloads.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool name is not one of the known operations.
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),
    /// Arguments were missing or had the wrong shape.
    #[error("Invalid arguments: {0}")]
    MalformedArguments(String),
    /// The pipeline stage rejected its input.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// The stage result could not be converted to JSON.
    #[error("Failed to serialize result: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The operations advertised to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Summarize news sources and average their signals.
    AnalyzeNews,
    /// Project indicator values from percentage changes.
    ComputeMetricUpdates,
    /// Derive risks and opportunities for a firm.
    DetectRisksOpportunities,
    /// Synthesize a stance and recommendations.
    GenerateRecommendations,
}

impl Operation {
    /// Every operation, in the order a caller chains them.
    pub const ALL: [Operation; 4] = [
        Operation::AnalyzeNews,
        Operation::ComputeMetricUpdates,
        Operation::DetectRisksOpportunities,
        Operation::GenerateRecommendations,
    ];

    /// Wire name of the tool.
    pub fn name(self) -> &'static str {
        match self {
            Operation::AnalyzeNews => "analyze_news",
            Operation::ComputeMetricUpdates => "compute_metric_updates",
            Operation::DetectRisksOpportunities => "detect_risks_opportunities",
            Operation::GenerateRecommendations => "generate_recommendations",
        }
    }

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Operation::AnalyzeNews => "Analyze News",
            Operation::ComputeMetricUpdates => "Compute Metric Updates",
            Operation::DetectRisksOpportunities => "Detect Risks & Opportunities",
            Operation::GenerateRecommendations => "Generate Recommendations",
        }
    }

    /// Short description shown during tool discovery.
    pub fn description(self) -> &'static str {
        match self {
            Operation::AnalyzeNews => {
                "Summarize news source URLs and estimate average inflation, exchange-rate, and interest-rate movement (percent)."
            }
            Operation::ComputeMetricUpdates => {
                "Apply percentage changes to yesterday's inflation, exchange rate, and interest rate; results are clamped and rounded."
            }
            Operation::DetectRisksOpportunities => {
                "List risks and opportunities for a firm from current indicators and news summaries."
            }
            Operation::GenerateRecommendations => {
                "Turn risks and opportunities into a strategic synthesis and actionable recommendations."
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.name() == s)
            .ok_or_else(|| ToolError::UnknownOperation(s.to_string()))
    }
}

/// Run one tool call against `agent`.
pub fn dispatch(
    agent: &dyn NewsAgent,
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<Value, ToolError> {
    let operation = name.parse::<Operation>().inspect_err(|err| {
        tracing::warn!(tool = name, %err, "Rejected tool call");
    })?;

    let span = tracing::info_span!("tool_call", tool = operation.name());
    let _entered = span.enter();

    let outcome = match operation {
        Operation::AnalyzeNews => handle_analyze_news(agent, arguments),
        Operation::ComputeMetricUpdates => handle_compute_metric_updates(agent, arguments),
        Operation::DetectRisksOpportunities => handle_detect_risks_opportunities(agent, arguments),
        Operation::GenerateRecommendations => handle_generate_recommendations(agent, arguments),
    };

    match &outcome {
        Ok(_) => tracing::debug!("Tool call completed"),
        Err(err) => tracing::warn!(%err, "Tool call failed"),
    }
    outcome
}
