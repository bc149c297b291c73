//! Financial news analysis pipeline: signal extraction, indicator projection, risk detection,
//! and recommendation synthesis.

pub mod indicators;
pub mod recommendations;
pub mod risks;
mod service;
pub mod signals;
pub mod types;

pub use service::{FinancialNewsAgent, NewsAgent};
pub use types::{
    AnalysisError, IndicatorDelta, IndicatorSet, NewsSummaryBatch, Recommendation,
    RiskOpportunityReport, SourceSignal, Stance,
};
