//! Agent abstraction shared by the MCP and HTTP surfaces.

use super::{
    indicators::project,
    recommendations::synthesize,
    risks::detect,
    signals::aggregate,
    types::{
        AnalysisError, IndicatorDelta, IndicatorSet, NewsSummaryBatch, Recommendation,
        RiskOpportunityReport,
    },
};

/// The four pipeline stages exposed as tools.
///
/// Implementations must not keep state between calls: every call builds its own values and
/// hands them back to the caller. External surfaces hold an implementation behind an `Arc` so
/// tests can substitute a stub.
pub trait NewsAgent: Send + Sync {
    /// Summarize news sources and average their economic signals.
    fn analyze_news(&self, sources: &[String]) -> Result<NewsSummaryBatch, AnalysisError>;

    /// Apply percentage changes to yesterday's indicator values.
    fn compute_metric_updates(&self, delta: &IndicatorDelta) -> IndicatorSet;

    /// Derive risks and opportunities for `firm` from indicators and news summaries.
    fn detect_risks_opportunities(
        &self,
        summaries: &[String],
        indicators: &IndicatorSet,
        firm: &str,
    ) -> RiskOpportunityReport;

    /// Turn risks and opportunities into a synthesis and recommendation list.
    fn generate_recommendations(
        &self,
        risks: &[String],
        opportunities: &[String],
    ) -> Recommendation;
}

/// Heuristic agent backed by fixed domain, threshold, and keyword rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinancialNewsAgent;

impl FinancialNewsAgent {
    /// Create the heuristic agent.
    pub fn new() -> Self {
        Self
    }
}

impl NewsAgent for FinancialNewsAgent {
    fn analyze_news(&self, sources: &[String]) -> Result<NewsSummaryBatch, AnalysisError> {
        tracing::info!(sources = sources.len(), "Analyzing news sources");
        aggregate(sources)
    }

    fn compute_metric_updates(&self, delta: &IndicatorDelta) -> IndicatorSet {
        let projected = project(delta);
        tracing::info!(
            inflation = projected.inflation,
            exchange_rate = projected.exchange_rate,
            interest_rate = projected.interest_rate,
            "Projected indicators"
        );
        projected
    }

    fn detect_risks_opportunities(
        &self,
        summaries: &[String],
        indicators: &IndicatorSet,
        firm: &str,
    ) -> RiskOpportunityReport {
        tracing::info!(firm, summaries = summaries.len(), "Detecting risks and opportunities");
        detect(summaries, indicators, firm)
    }

    fn generate_recommendations(
        &self,
        risks: &[String],
        opportunities: &[String],
    ) -> Recommendation {
        tracing::info!(
            risks = risks.len(),
            opportunities = opportunities.len(),
            "Generating recommendations"
        );
        synthesize(risks, opportunities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_chain_end_to_end() {
        let agent = FinancialNewsAgent::new();

        let news = agent
            .analyze_news(&[
                "https://bloomberg.com/article".to_string(),
                "https://fed.gov/announcement".to_string(),
            ])
            .expect("valid sources");
        let inflation_pct = news.inflation_pct.expect("inflation mean");
        let exchange_rate_pct = news.exchange_rate_pct.expect("exchange mean");
        let interest_rate_pct = news.interest_rate_pct.expect("interest mean");

        let indicators = agent.compute_metric_updates(&IndicatorDelta {
            inflation_pct,
            exchange_rate_pct,
            interest_rate_pct,
            prior: IndicatorSet {
                inflation: 4.5,
                exchange_rate: 1.1,
                interest_rate: 5.0,
            },
        });
        assert_eq!(indicators.inflation, 4.51);
        assert_eq!(indicators.exchange_rate, 1.0997);
        assert_eq!(indicators.interest_rate, 5.01);

        let report = agent.detect_risks_opportunities(&news.summaries, &indicators, "Acme");
        assert_eq!(report.risks.len(), 1);
        assert_eq!(report.opportunities.len(), 1);

        let recommendation =
            agent.generate_recommendations(&report.risks, &report.opportunities);
        assert!(recommendation.synthesis.starts_with("Balanced"));
        assert_eq!(recommendation.recommendations.len(), 2);
        assert!(recommendation.recommendations[0].contains("dynamic pricing"));
    }
}
