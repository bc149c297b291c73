//! JSON schema builders for MCP tools.

use schemars::JsonSchema;
use serde_json::{Map, Value};

use crate::analysis::{IndicatorSet, NewsSummaryBatch, Recommendation, RiskOpportunityReport};

use super::dispatch::Operation;

/// Input schema advertised for `operation`.
pub(crate) fn input_schema(operation: Operation) -> Map<String, Value> {
    match operation {
        Operation::AnalyzeNews => analyze_news_input_schema(),
        Operation::ComputeMetricUpdates => metric_updates_input_schema(),
        Operation::DetectRisksOpportunities => detect_input_schema(),
        Operation::GenerateRecommendations => recommendations_input_schema(),
    }
}

/// Schema of the JSON result produced by `operation`, derived from the result type.
pub(crate) fn output_schema(operation: Operation) -> Map<String, Value> {
    match operation {
        Operation::AnalyzeNews => schema_of::<NewsSummaryBatch>(),
        Operation::ComputeMetricUpdates => schema_of::<IndicatorSet>(),
        Operation::DetectRisksOpportunities => schema_of::<RiskOpportunityReport>(),
        Operation::GenerateRecommendations => schema_of::<Recommendation>(),
    }
}

/// Build the schema describing the `analyze_news` tool input.
fn analyze_news_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "sources".into(),
        string_array_schema("News source URLs (http or https); only the domain is inspected"),
    );

    let mut schema = finalize_object_schema(properties, &["sources"]);
    schema.insert(
        "examples".into(),
        Value::Array(vec![serde_json::json!({
            "sources": [
                "https://www.bloomberg.com/markets",
                "https://www.federalreserve.gov/newsevents.htm"
            ]
        })]),
    );
    schema
}

/// Build the schema describing the `compute_metric_updates` tool input.
fn metric_updates_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "inflation_pct".into(),
        number_schema("Percentage change applied to yesterday's inflation"),
    );
    properties.insert(
        "exchange_rate_pct".into(),
        number_schema("Percentage change applied to yesterday's exchange rate"),
    );
    properties.insert(
        "interest_rate_pct".into(),
        number_schema("Percentage change applied to yesterday's interest rate"),
    );
    properties.insert(
        "yesterday_inflation".into(),
        number_schema("Yesterday's inflation, in percent"),
    );
    properties.insert(
        "yesterday_exchange_rate".into(),
        number_schema("Yesterday's exchange rate as a ratio"),
    );
    properties.insert(
        "yesterday_interest_rate".into(),
        number_schema("Yesterday's interest rate, in percent"),
    );

    finalize_object_schema(
        properties,
        &[
            "inflation_pct",
            "exchange_rate_pct",
            "interest_rate_pct",
            "yesterday_inflation",
            "yesterday_exchange_rate",
            "yesterday_interest_rate",
        ],
    )
}

/// Build the schema describing the `detect_risks_opportunities` tool input.
fn detect_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "summaries".into(),
        string_array_schema("News summaries scanned for sentiment keywords"),
    );
    properties.insert(
        "inflation".into(),
        number_schema("Current inflation, in percent"),
    );
    properties.insert(
        "exchange_rate".into(),
        number_schema("Current exchange rate as a ratio"),
    );
    properties.insert(
        "interest_rate".into(),
        number_schema("Current interest rate, in percent"),
    );
    properties.insert(
        "firm".into(),
        string_schema("Firm the risks and opportunities refer to"),
    );

    finalize_object_schema(
        properties,
        &[
            "summaries",
            "inflation",
            "exchange_rate",
            "interest_rate",
            "firm",
        ],
    )
}

/// Build the schema describing the `generate_recommendations` tool input.
fn recommendations_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "risks".into(),
        string_array_schema("Risk statements, typically from detect_risks_opportunities"),
    );
    properties.insert(
        "opportunities".into(),
        string_array_schema("Opportunity statements, typically from detect_risks_opportunities"),
    );

    finalize_object_schema(properties, &["risks", "opportunities"])
}

fn schema_of<T: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => schema,
        Ok(_) | Err(_) => {
            tracing::warn!("Failed to render output schema");
            Map::new()
        }
    }
}

fn string_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn number_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("number".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn string_array_schema(description: &str) -> Value {
    let mut item_schema = Map::new();
    item_schema.insert("type".into(), Value::String("string".into()));
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("array".into()));
    schema.insert("description".into(), Value::String(description.into()));
    schema.insert("items".into(), Value::Object(item_schema));
    Value::Object(schema)
}

fn finalize_object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(
                required
                    .iter()
                    .map(|&key| Value::String(key.into()))
                    .collect(),
            ),
        );
    }
    schema.insert("additionalProperties".into(), Value::Bool(false));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_required_field_is_described() {
        for operation in Operation::ALL {
            let schema = input_schema(operation);
            let properties = schema["properties"].as_object().expect("properties");
            let required = schema["required"].as_array().expect("required list");
            assert!(!required.is_empty(), "{operation}");
            for field in required {
                let field = field.as_str().expect("field name");
                assert!(properties.contains_key(field), "{operation}: {field}");
            }
        }
    }

    #[test]
    fn metric_updates_take_six_numbers() {
        let schema = input_schema(Operation::ComputeMetricUpdates);
        let properties = schema["properties"].as_object().expect("properties");
        assert_eq!(properties.len(), 6);
        assert!(properties.values().all(|field| field["type"] == "number"));
    }

    #[test]
    fn sources_are_an_array_of_strings() {
        let schema = input_schema(Operation::AnalyzeNews);
        assert_eq!(schema["properties"]["sources"]["type"], "array");
        assert_eq!(schema["properties"]["sources"]["items"]["type"], "string");
    }

    #[test]
    fn output_schemas_name_result_fields() {
        let schema = output_schema(Operation::GenerateRecommendations);
        let properties = schema["properties"].as_object().expect("properties");
        assert!(properties.contains_key("synthesis"));
        assert!(properties.contains_key("recommendations"));
    }
}
