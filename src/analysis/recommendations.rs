//! Stance selection and recommendation rules for the `generate_recommendations` stage.

use super::risks::contains_any;
use super::types::{Recommendation, Stance};

/// Risk ratio above which the stance turns defensive.
pub const DEFENSIVE_RATIO: f64 = 0.6;
/// Risk ratio below which the stance turns aggressive.
pub const AGGRESSIVE_RATIO: f64 = 0.3;

/// Fallback recommendations used when no category matched.
pub const DEFAULT_RECOMMENDATIONS: [&str; 3] = [
    "Monitor economic indicators closely for emerging trends",
    "Maintain operational flexibility to adapt to changing conditions",
    "Strengthen stakeholder communication regarding market outlook",
];

/// Which list a recommendation rule scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Risks,
    Opportunities,
}

struct Rule {
    scope: Scope,
    keywords: &'static [&'static str],
    recommendations: [&'static str; 2],
}

static RULES: [Rule; 5] = [
    Rule {
        scope: Scope::Risks,
        keywords: &["inflation"],
        recommendations: [
            "Implement dynamic pricing strategies to maintain margins amid inflationary pressures",
            "Consider inflation-hedged investments and contracts",
        ],
    },
    Rule {
        scope: Scope::Risks,
        keywords: &["interest rate"],
        recommendations: [
            "Prioritize debt refinancing before rates increase further",
            "Accelerate capital-intensive projects while financing costs remain manageable",
        ],
    },
    Rule {
        scope: Scope::Risks,
        keywords: &["currency", "exchange"],
        recommendations: [
            "Implement currency hedging strategies for international operations",
            "Diversify revenue streams across multiple currencies",
        ],
    },
    Rule {
        scope: Scope::Opportunities,
        keywords: &["growth", "expansion"],
        recommendations: [
            "Accelerate market expansion plans to capitalize on favorable conditions",
            "Increase marketing and sales investments to capture market share",
        ],
    },
    Rule {
        scope: Scope::Opportunities,
        keywords: &["acquisition", "investment"],
        recommendations: [
            "Evaluate strategic acquisition opportunities while valuations are attractive",
            "Strengthen balance sheet to take advantage of investment opportunities",
        ],
    },
];

impl Stance {
    /// Pick the stance for a risk ratio; the three bands are disjoint and cover every value.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio > DEFENSIVE_RATIO {
            Stance::Defensive
        } else if ratio < AGGRESSIVE_RATIO {
            Stance::Aggressive
        } else {
            Stance::Balanced
        }
    }

    /// Narrative text describing the stance.
    pub fn synthesis(self) -> &'static str {
        match self {
            Stance::Defensive => {
                "Current market conditions present significant challenges with elevated risks across multiple dimensions. A defensive strategy focusing on risk mitigation and capital preservation is recommended."
            }
            Stance::Aggressive => {
                "Market environment is favorable with abundant opportunities outweighing risks. An aggressive growth strategy leveraging current conditions is advisable."
            }
            Stance::Balanced => {
                "Balanced risk-opportunity landscape requires a measured approach combining selective risk mitigation with strategic opportunity capture."
            }
        }
    }
}

/// Share of risks among all items, `0.0` when both lists are empty.
pub fn risk_ratio(risks: usize, opportunities: usize) -> f64 {
    let total = risks + opportunities;
    if total == 0 {
        0.0
    } else {
        risks as f64 / total as f64
    }
}

/// Derive the synthesis and recommendation list from detected risks and opportunities.
pub fn synthesize<S: AsRef<str>>(risks: &[S], opportunities: &[S]) -> Recommendation {
    let stance = Stance::from_ratio(risk_ratio(risks.len(), opportunities.len()));

    let lowered = |items: &[S]| -> Vec<String> {
        items
            .iter()
            .map(|item| item.as_ref().to_lowercase())
            .collect()
    };
    let risks = lowered(risks);
    let opportunities = lowered(opportunities);

    let mut recommendations: Vec<String> = RULES
        .iter()
        .filter(|rule| {
            let scanned = match rule.scope {
                Scope::Risks => &risks,
                Scope::Opportunities => &opportunities,
            };
            scanned
                .iter()
                .any(|item| contains_any(item, rule.keywords))
        })
        .flat_map(|rule| rule.recommendations.iter().map(|text| text.to_string()))
        .collect();

    if recommendations.is_empty() {
        recommendations = DEFAULT_RECOMMENDATIONS
            .iter()
            .map(|text| text.to_string())
            .collect();
    }

    tracing::debug!(?stance, count = recommendations.len(), "Synthesized recommendations");

    Recommendation {
        synthesis: stance.synthesis().to_string(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn empty_input_is_aggressive_with_defaults() {
        let recommendation = synthesize(&NONE, &NONE);
        assert_eq!(recommendation.synthesis, Stance::Aggressive.synthesis());
        assert_eq!(recommendation.recommendations, DEFAULT_RECOMMENDATIONS.to_vec());
    }

    #[test]
    fn stance_bands_are_disjoint() {
        assert_eq!(Stance::from_ratio(0.61), Stance::Defensive);
        assert_eq!(Stance::from_ratio(0.6), Stance::Balanced);
        assert_eq!(Stance::from_ratio(0.3), Stance::Balanced);
        assert_eq!(Stance::from_ratio(0.29), Stance::Aggressive);
        assert_eq!(risk_ratio(0, 0), 0.0);
        assert_eq!(risk_ratio(2, 1), 2.0 / 3.0);
    }

    #[test]
    fn risk_heavy_input_is_defensive() {
        let risks = [
            "High inflation (5.0%) may erode Acme's profit margins",
            "High interest rates (7.0%) increase Acme's borrowing costs",
            "Strong currency may hurt Acme's export competitiveness",
        ];
        let opportunities = ["Higher yields on Acme's cash investments"];
        let recommendation = synthesize(&risks, &opportunities);

        assert_eq!(recommendation.synthesis, Stance::Defensive.synthesis());
        assert_eq!(
            recommendation.recommendations,
            vec![
                "Implement dynamic pricing strategies to maintain margins amid inflationary pressures",
                "Consider inflation-hedged investments and contracts",
                "Prioritize debt refinancing before rates increase further",
                "Accelerate capital-intensive projects while financing costs remain manageable",
                "Implement currency hedging strategies for international operations",
                "Diversify revenue streams across multiple currencies",
                "Evaluate strategic acquisition opportunities while valuations are attractive",
                "Strengthen balance sheet to take advantage of investment opportunities",
            ]
        );
    }

    #[test]
    fn opportunity_rules_match_case_insensitively() {
        let risks = ["Supply chain delays"];
        let opportunities = ["EXPANSION into new markets", "Positive sentiment"];
        let recommendation = synthesize(&risks, &opportunities);

        assert_eq!(recommendation.synthesis, Stance::Balanced.synthesis());
        assert_eq!(
            recommendation.recommendations,
            vec![
                "Accelerate market expansion plans to capitalize on favorable conditions",
                "Increase marketing and sales investments to capture market share",
            ]
        );
    }

    #[test]
    fn unmatched_items_fall_back_to_defaults() {
        let risks = ["Labor shortages"];
        let opportunities = ["New product line", "Brand strength", "Cost savings"];
        let recommendation = synthesize(&risks, &opportunities);

        assert_eq!(recommendation.synthesis, Stance::Aggressive.synthesis());
        assert_eq!(recommendation.recommendations.len(), 3);
        assert_eq!(recommendation.recommendations[0], DEFAULT_RECOMMENDATIONS[0]);
    }
}
