//! Source classification and signal aggregation for the `analyze_news` stage.
//!
//! Sources are never fetched. Each one is parsed as a URL and its host is matched against a
//! fixed, ordered list of categories; the first category whose needle appears in the host
//! supplies the summary template and the three signal magnitudes.

use url::Url;

use super::types::{AnalysisError, NewsSummaryBatch, SourceSignal};

/// Broad kind of publisher a news source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceCategory {
    /// Newswires such as Bloomberg or Reuters.
    Wire,
    /// Central bank communication.
    CentralBank,
    /// Financial press such as the WSJ or the FT.
    FinancialPress,
    /// Anything not matched by the other categories.
    General,
}

impl SourceCategory {
    /// Categories in matching priority order; `General` is the fallback.
    pub const PRIORITY: [SourceCategory; 3] = [
        SourceCategory::Wire,
        SourceCategory::CentralBank,
        SourceCategory::FinancialPress,
    ];

    /// Classify a lower-cased domain.
    pub fn classify(domain: &str) -> Self {
        let domain = domain.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|category| {
                category
                    .needles()
                    .iter()
                    .any(|needle| domain.contains(needle))
            })
            .unwrap_or(SourceCategory::General)
    }

    /// Domain substrings that select this category.
    pub fn needles(self) -> &'static [&'static str] {
        match self {
            SourceCategory::Wire => &["bloomberg", "reuters"],
            SourceCategory::CentralBank => &["fed", "centralbank"],
            SourceCategory::FinancialPress => &["wsj", "ft.com"],
            SourceCategory::General => &[],
        }
    }

    /// Stable label used in diagnostics and the rules resource.
    pub fn label(self) -> &'static str {
        match self {
            SourceCategory::Wire => "wire",
            SourceCategory::CentralBank => "central_bank",
            SourceCategory::FinancialPress => "financial_press",
            SourceCategory::General => "general",
        }
    }

    /// Typical (inflation, exchange rate, interest rate) pressure for this category.
    pub fn signals(self) -> (f64, f64, f64) {
        match self {
            SourceCategory::Wire => (0.2, -0.1, 0.15),
            SourceCategory::CentralBank => (0.1, 0.05, 0.25),
            SourceCategory::FinancialPress => (0.05, 0.1, 0.0),
            SourceCategory::General => (0.0, 0.0, 0.05),
        }
    }

    fn summary(self, domain: &str) -> String {
        match self {
            SourceCategory::Wire => format!(
                "Financial markets report from {domain}: Mixed economic signals with focus on monetary policy"
            ),
            SourceCategory::CentralBank => format!(
                "Central bank communication from {domain}: Policy stance remains data-dependent"
            ),
            SourceCategory::FinancialPress => format!(
                "Market analysis from {domain}: Corporate earnings and economic indicators show resilience"
            ),
            SourceCategory::General => format!(
                "Economic news from {domain}: General market developments and policy discussions"
            ),
        }
    }
}

/// Extract the summary and signal magnitudes for a single news source.
pub fn extract(source: &str) -> Result<SourceSignal, AnalysisError> {
    let domain = parse_domain(source)?;
    let category = SourceCategory::classify(&domain);
    let (inflation, exchange_rate, interest_rate) = category.signals();
    tracing::debug!(source, domain = %domain, category = category.label(), "Classified news source");
    Ok(SourceSignal {
        summary: category.summary(&domain),
        inflation,
        exchange_rate,
        interest_rate,
    })
}

/// Extract every source and average each signal type.
///
/// Summaries keep the input order. The first invalid source fails the whole batch.
pub fn aggregate<S: AsRef<str>>(sources: &[S]) -> Result<NewsSummaryBatch, AnalysisError> {
    let signals = sources
        .iter()
        .map(|source| extract(source.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewsSummaryBatch {
        inflation_pct: mean(signals.iter().map(|signal| signal.inflation)),
        exchange_rate_pct: mean(signals.iter().map(|signal| signal.exchange_rate)),
        interest_rate_pct: mean(signals.iter().map(|signal| signal.interest_rate)),
        summaries: signals.into_iter().map(|signal| signal.summary).collect(),
    })
}

/// Arithmetic mean, or `None` for an empty sequence.
///
/// The sum is carried as an unevaluated `hi + lo` pair and the division is corrected with a
/// fused multiply-add, so the result is the exact mean rounded once. `0.0, 0.2, 0.1` averages
/// to `0.1`, not `0.10000000000000002`.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (hi, lo, count) = values.fold((0.0, 0.0, 0usize), |(hi, lo, count), value| {
        let (sum, err) = two_sum(hi, value);
        (sum, lo + err, count + 1)
    });
    if count == 0 {
        return None;
    }

    let n = count as f64;
    let (hi, lo) = two_sum(hi, lo);
    let quotient = hi / n;
    let remainder = (-quotient).mul_add(n, hi) + lo;
    Some(quotient + remainder / n)
}

/// Knuth's error-free addition: `a + b == sum + err` exactly.
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let sum = a + b;
    let b_virtual = sum - a;
    let err = (a - (sum - b_virtual)) + (b - b_virtual);
    (sum, err)
}

/// Parse a source as an absolute web URL and return its lower-cased `host[:port]`.
fn parse_domain(source: &str) -> Result<String, AnalysisError> {
    let invalid = |reason: &str| AnalysisError::InvalidSource {
        input: source.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(source.trim()).map_err(|err| invalid(&err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| invalid("missing host"))?
        .to_lowercase();

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host,
    })
}
