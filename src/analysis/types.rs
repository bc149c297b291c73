//! Value types and error definitions shared by the analysis pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced by the analysis pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A news source could not be parsed as an `http`/`https` URL with a host.
    #[error("Invalid news source '{input}': {reason}")]
    InvalidSource {
        /// Raw source string supplied by the caller.
        input: String,
        /// Why the source was rejected.
        reason: String,
    },
}

/// Signal estimates extracted from a single news source.
#[derive(Debug, Clone, PartialEq, Serialize, JsonSchema)]
pub struct SourceSignal {
    /// Heuristic description of the source.
    pub summary: String,
    /// Expected inflation movement, in percent.
    pub inflation: f64,
    /// Expected exchange-rate movement, in percent.
    pub exchange_rate: f64,
    /// Expected interest-rate movement, in percent.
    pub interest_rate: f64,
}

/// Aggregated output of the `analyze_news` stage.
///
/// The averaged signals are `None` when no sources were supplied, which callers must treat as
/// "no movement information" rather than zero movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewsSummaryBatch {
    /// One summary per source, in input order.
    pub summaries: Vec<String>,
    /// Mean inflation signal across sources.
    pub inflation_pct: Option<f64>,
    /// Mean exchange-rate signal across sources.
    pub exchange_rate_pct: Option<f64>,
    /// Mean interest-rate signal across sources.
    pub interest_rate_pct: Option<f64>,
}

/// Current values of the three tracked indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndicatorSet {
    /// Inflation, in percent.
    pub inflation: f64,
    /// Exchange rate as a unit-relative ratio.
    pub exchange_rate: f64,
    /// Interest rate, in percent.
    pub interest_rate: f64,
}

/// Percentage changes to apply to yesterday's indicator values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorDelta {
    /// Change applied to inflation, in percent.
    pub inflation_pct: f64,
    /// Change applied to the exchange rate, in percent.
    pub exchange_rate_pct: f64,
    /// Change applied to the interest rate, in percent.
    pub interest_rate_pct: f64,
    /// Indicator values the changes are applied to.
    pub prior: IndicatorSet,
}

/// Risks and opportunities detected for a firm.
///
/// Entries appear in rule evaluation order, not by severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RiskOpportunityReport {
    /// Firm the statements refer to.
    pub firm: String,
    /// Risk statements.
    pub risks: Vec<String>,
    /// Opportunity statements.
    pub opportunities: Vec<String>,
}

/// Qualitative posture chosen from the share of risks among all detected items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    /// Risks dominate (ratio above 0.6).
    Defensive,
    /// Neither side dominates.
    Balanced,
    /// Opportunities dominate (ratio below 0.3).
    Aggressive,
}

/// Narrative synthesis plus actionable recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// Overall assessment text.
    pub synthesis: String,
    /// Ordered recommendation list.
    pub recommendations: Vec<String>,
}
