//! Argument parsing and per-tool handlers.
//!
//! Each handler deserializes its typed request, hands it to the agent, and converts the stage
//! result to JSON. Shape errors are reported before any analysis runs.

use rmcp::model::JsonObject;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::dispatch::ToolError;

pub mod indicators;
pub mod news;
pub mod recommendations;
pub mod risks;

/// Parse structured arguments supplied to a tool invocation.
pub(crate) fn parse_arguments<T: DeserializeOwned>(
    arguments: Option<JsonObject>,
) -> Result<T, ToolError> {
    let value = arguments
        .map(Value::Object)
        .unwrap_or_else(|| Value::Object(JsonObject::new()));
    parse_arguments_value(value)
}

/// Deserialize arguments represented as a JSON value into the target type.
pub(crate) fn parse_arguments_value<T: DeserializeOwned>(value: Value) -> Result<T, ToolError> {
    serde_json::from_value(value).map_err(|err| ToolError::MalformedArguments(err.to_string()))
}
