//! Threshold and keyword rules for the `detect_risks_opportunities` stage.

use super::types::{IndicatorSet, RiskOpportunityReport};

/// Inflation above this value is treated as high.
pub const HIGH_INFLATION: f64 = 4.0;
/// Inflation below this value is treated as deflationary.
pub const LOW_INFLATION: f64 = 1.0;
/// Interest rates above this value are treated as high.
pub const HIGH_INTEREST_RATE: f64 = 6.0;
/// Interest rates below this value are treated as cheap financing.
pub const LOW_INTEREST_RATE: f64 = 2.0;
/// Exchange rates above this value are treated as a strong currency.
pub const STRONG_EXCHANGE_RATE: f64 = 1.2;
/// Exchange rates below this value are treated as a weak currency.
pub const WEAK_EXCHANGE_RATE: f64 = 0.9;

/// Summary keywords that signal negative sentiment.
pub const NEGATIVE_KEYWORDS: [&str; 5] =
    ["uncertainty", "volatility", "decline", "crisis", "recession"];
/// Summary keywords that signal positive sentiment.
pub const POSITIVE_KEYWORDS: [&str; 5] =
    ["growth", "expansion", "bullish", "optimistic", "recovery"];

/// Evaluate every rule against the indicators and summaries for `firm`.
///
/// Rules run in a fixed order (inflation, interest rate, exchange rate, then one pass per
/// summary) and every rule is evaluated. Output is neither sorted nor deduplicated.
pub fn detect<S: AsRef<str>>(
    summaries: &[S],
    indicators: &IndicatorSet,
    firm: &str,
) -> RiskOpportunityReport {
    let mut risks = Vec::new();
    let mut opportunities = Vec::new();

    // `{:?}` keeps the trailing `.0` on whole numbers: `5.0%`, not `5%`.
    let inflation = indicators.inflation;
    if inflation > HIGH_INFLATION {
        risks.push(format!(
            "High inflation ({inflation:?}%) may erode {firm}'s profit margins"
        ));
        opportunities.push(format!(
            "Pricing power opportunities for {firm} in inflationary environment"
        ));
    } else if inflation < LOW_INFLATION {
        risks.push(format!(
            "Deflationary pressure ({inflation:?}%) may signal economic weakness"
        ));
    }

    let interest_rate = indicators.interest_rate;
    if interest_rate > HIGH_INTEREST_RATE {
        risks.push(format!(
            "High interest rates ({interest_rate:?}%) increase {firm}'s borrowing costs"
        ));
        opportunities.push(format!("Higher yields on {firm}'s cash investments"));
    } else if interest_rate < LOW_INTEREST_RATE {
        opportunities.push(format!(
            "Low borrowing costs ({interest_rate:?}%) enable expansion financing for {firm}"
        ));
    }

    let exchange_rate = indicators.exchange_rate;
    if exchange_rate > STRONG_EXCHANGE_RATE {
        risks.push(format!(
            "Strong currency may hurt {firm}'s export competitiveness"
        ));
        opportunities.push(format!(
            "Favorable conditions for {firm}'s international acquisitions"
        ));
    } else if exchange_rate < WEAK_EXCHANGE_RATE {
        // Unlike the other low branches, a weak currency yields both an opportunity and a risk.
        opportunities.push(format!("Weak currency boosts {firm}'s export revenues"));
        risks.push(format!(
            "Higher import costs for {firm}'s international operations"
        ));
    }

    for summary in summaries {
        let summary = summary.as_ref().to_lowercase();
        if contains_any(&summary, &NEGATIVE_KEYWORDS) {
            risks.push(format!(
                "Market uncertainty may impact {firm}'s business confidence"
            ));
        }
        if contains_any(&summary, &POSITIVE_KEYWORDS) {
            opportunities.push(format!(
                "Positive market sentiment creates growth opportunities for {firm}"
            ));
        }
    }

    tracing::debug!(
        firm,
        risks = risks.len(),
        opportunities = opportunities.len(),
        "Evaluated risk and opportunity rules"
    );

    RiskOpportunityReport {
        firm: firm.to_string(),
        risks,
        opportunities,
    }
}

/// Case-sensitive substring check; callers lower-case `haystack` first.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}
