//! Formatting helpers shared by the MCP server and the HTTP surface.

use rmcp::model::ResourceContents;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::analysis::{
    indicators::{
        EXCHANGE_RATE_FLOOR, EXCHANGE_RATE_PRECISION, INFLATION_BOUNDS, INTEREST_RATE_BOUNDS,
        PERCENT_PRECISION,
    },
    recommendations::{AGGRESSIVE_RATIO, DEFAULT_RECOMMENDATIONS, DEFENSIVE_RATIO},
    risks::{
        HIGH_INFLATION, HIGH_INTEREST_RATE, LOW_INFLATION, LOW_INTEREST_RATE, NEGATIVE_KEYWORDS,
        POSITIVE_KEYWORDS, STRONG_EXCHANGE_RATE, WEAK_EXCHANGE_RATE,
    },
    signals::SourceCategory,
};

use super::dispatch::ToolError;

pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Text payload for a finished tool call plus whether it carries an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    /// JSON text: the stage result or `{"error": message}`.
    pub text: String,
    /// Whether `text` is an error payload.
    pub is_error: bool,
}

impl ToolReply {
    /// Render a dispatch outcome.
    pub fn from_outcome(outcome: Result<Value, ToolError>, pretty: bool) -> Self {
        match outcome {
            Ok(value) => Self {
                text: serialize_json(&value, pretty),
                is_error: false,
            },
            Err(err) => Self {
                text: error_payload(&err),
                is_error: true,
            },
        }
    }
}

/// Response envelope: `{ content: [{ type: "text", text }] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEnvelope {
    /// Content items; always a single text item.
    pub content: Vec<TextContent>,
}

/// One text content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// Content kind; always `"text"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// JSON-serialized payload.
    pub text: String,
}

impl From<ToolReply> for ToolEnvelope {
    fn from(reply: ToolReply) -> Self {
        Self {
            content: vec![TextContent {
                kind: "text".into(),
                text: reply.text,
            }],
        }
    }
}

/// Render an error as `{"error": message}`.
pub(crate) fn error_payload(error: &ToolError) -> String {
    json!({ "error": error.to_string() }).to_string()
}

/// Serialize a value to JSON, falling back to compact formatting on error.
pub(crate) fn serialize_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if !pretty {
        return serde_json::to_string(value).unwrap_or_else(|_| "{}".into());
    }
    serde_json::to_string_pretty(value).unwrap_or_else(|error| {
        tracing::warn!(%error, "Failed to serialize JSON prettily");
        serde_json::to_string(value).unwrap_or_else(|_| "{}".into())
    })
}

/// Build JSON resource contents for MCP resource responses.
pub(crate) fn json_resource_contents(uri: &str, text: String) -> ResourceContents {
    ResourceContents::TextResourceContents {
        uri: uri.to_string(),
        mime_type: Some(APPLICATION_JSON.into()),
        text,
        meta: None,
    }
}

/// Recommended call chain and how results feed the next stage.
pub(crate) fn usage_payload() -> Value {
    json!({
        "title": "News Agent Usage",
        "policy": [
            "The server keeps no state between calls; pass every input explicitly.",
            "Supply yesterday's indicator values yourself; they are not stored.",
            "Sources are classified by domain only and never fetched.",
        ],
        "flow": [
            {
                "tool": "analyze_news",
                "call": "analyze_news({ sources })",
                "feeds": "summaries -> detect_risks_opportunities; *_pct -> compute_metric_updates"
            },
            {
                "tool": "compute_metric_updates",
                "call": "compute_metric_updates({ inflation_pct, exchange_rate_pct, interest_rate_pct, yesterday_inflation, yesterday_exchange_rate, yesterday_interest_rate })",
                "feeds": "inflation, exchange_rate, interest_rate -> detect_risks_opportunities"
            },
            {
                "tool": "detect_risks_opportunities",
                "call": "detect_risks_opportunities({ summaries, inflation, exchange_rate, interest_rate, firm })",
                "feeds": "risks, opportunities -> generate_recommendations"
            },
            {
                "tool": "generate_recommendations",
                "call": "generate_recommendations({ risks, opportunities })",
                "feeds": null
            }
        ]
    })
}

/// The literal rule tables the analysis applies.
pub(crate) fn rules_payload() -> Value {
    let categories: Vec<Value> = SourceCategory::PRIORITY
        .into_iter()
        .chain([SourceCategory::General])
        .map(|category| {
            let (inflation, exchange_rate, interest_rate) = category.signals();
            json!({
                "category": category.label(),
                "domain_contains": category.needles(),
                "signals": {
                    "inflation": inflation,
                    "exchange_rate": exchange_rate,
                    "interest_rate": interest_rate,
                },
            })
        })
        .collect();

    json!({
        "sources": categories,
        "projection": {
            "inflation": { "min": INFLATION_BOUNDS.0, "max": INFLATION_BOUNDS.1, "decimals": PERCENT_PRECISION },
            "exchange_rate": { "min": EXCHANGE_RATE_FLOOR, "max": null, "decimals": EXCHANGE_RATE_PRECISION },
            "interest_rate": { "min": INTEREST_RATE_BOUNDS.0, "max": INTEREST_RATE_BOUNDS.1, "decimals": PERCENT_PRECISION },
        },
        "thresholds": {
            "inflation": { "high": HIGH_INFLATION, "low": LOW_INFLATION },
            "interest_rate": { "high": HIGH_INTEREST_RATE, "low": LOW_INTEREST_RATE },
            "exchange_rate": { "high": STRONG_EXCHANGE_RATE, "low": WEAK_EXCHANGE_RATE },
        },
        "keywords": {
            "negative": NEGATIVE_KEYWORDS,
            "positive": POSITIVE_KEYWORDS,
        },
        "stance": {
            "defensive_above": DEFENSIVE_RATIO,
            "aggressive_below": AGGRESSIVE_RATIO,
        },
        "default_recommendations": DEFAULT_RECOMMENDATIONS,
    })
}
