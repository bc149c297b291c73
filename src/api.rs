//! HTTP surface for the news agent.
//!
//! This module exposes a compact Axum router:
//!
//! - `GET /tools` – Discovery catalog listing each tool with its input and output schemas.
//! - `POST /tools/{name}` – Invoke a tool with the request body as its argument object. The
//!   response is always `200 OK` with the `{ content: [{ type: "text", text }] }` envelope;
//!   failures carry `{"error": message}` as the text.
//! - `GET /health` – Liveness probe.
//!
//! The HTTP surface shares the dispatcher with the MCP server, so behavior is identical across
//! interfaces.

use crate::analysis::NewsAgent;
use crate::mcp::{Operation, ToolEnvelope, ToolError, ToolReply, dispatch, schemas};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Shared state handed to every route.
struct ApiState<S> {
    agent: Arc<S>,
    pretty_json: bool,
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            pretty_json: self.pretty_json,
        }
    }
}

/// Build the HTTP router exposing tool discovery and invocation.
pub fn create_router<S>(agent: Arc<S>, pretty_json: bool) -> Router
where
    S: NewsAgent + 'static,
{
    Router::new()
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool::<S>))
        .route("/health", get(health))
        .with_state(ApiState { agent, pretty_json })
}

/// Descriptor for a single tool in the discovery catalog.
#[derive(Serialize)]
struct ToolDescriptor {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    input_schema: Map<String, Value>,
    output_schema: Map<String, Value>,
}

/// Response body for `GET /tools`.
#[derive(Serialize)]
struct ToolsResponse {
    tools: Vec<ToolDescriptor>,
}

/// Enumerate the tools for discovery by hosts.
async fn list_tools() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: Operation::ALL
            .into_iter()
            .map(|operation| ToolDescriptor {
                name: operation.name(),
                title: operation.title(),
                description: operation.description(),
                input_schema: schemas::input_schema(operation),
                output_schema: schemas::output_schema(operation),
            })
            .collect(),
    })
}

/// Invoke a tool with the request body as its arguments.
///
/// An empty body is treated as an empty argument object; anything other than a JSON object is
/// reported as malformed arguments inside the envelope.
async fn call_tool<S>(
    State(state): State<ApiState<S>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Json<ToolEnvelope>
where
    S: NewsAgent + 'static,
{
    let outcome = parse_body(&body)
        .and_then(|arguments| dispatch(state.agent.as_ref(), &name, Some(arguments)));
    tracing::info!(tool = %name, ok = outcome.is_ok(), "HTTP tool call");
    Json(ToolReply::from_outcome(outcome, state.pretty_json).into())
}

fn parse_body(body: &[u8]) -> Result<Map<String, Value>, ToolError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(arguments)) => Ok(arguments),
        Ok(_) => Err(ToolError::MalformedArguments(
            "request body must be a JSON object".into(),
        )),
        Err(err) => Err(ToolError::MalformedArguments(err.to_string())),
    }
}

/// Response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
