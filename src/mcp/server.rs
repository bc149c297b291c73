//! MCP server bootstrap and request dispatch.

use std::{borrow::Cow, sync::Arc};

use crate::{
    analysis::NewsAgent,
    mcp::{
        dispatch::{Operation, dispatch},
        format::{ToolReply, json_resource_contents, rules_payload, serialize_json, usage_payload},
        registry, schemas,
    },
};
use rmcp::{
    ErrorData as McpError,
    handler::server::ServerHandler,
    model::{
        AnnotateAble, CallToolRequestParam, CallToolResult, Content, ListResourcesResult,
        ListToolsResult, RawResource, ReadResourceRequestParam, ReadResourceResult, Resource,
        ServerCapabilities, ServerInfo, Tool, ToolAnnotations,
    },
};

const USAGE_URI: &str = "mcp://news-agent/usage";
const RULES_URI: &str = "mcp://news-agent/rules";

/// MCP server exposing the news analysis pipeline as tools.
#[derive(Clone)]
pub struct NewsAgentMcpServer {
    agent: Arc<dyn NewsAgent>,
    registry: Arc<registry::Registry>,
    pretty_json: bool,
}

impl NewsAgentMcpServer {
    /// Create a new MCP server backed by `agent`.
    pub fn new(agent: Arc<dyn NewsAgent>) -> Self {
        let mut registry = registry::Registry::new();
        registry.register_resource(USAGE_URI, resource_usage);
        registry.register_resource(RULES_URI, resource_rules);

        Self {
            agent,
            registry: Arc::new(registry),
            pretty_json: true,
        }
    }

    /// Choose between pretty and compact JSON in tool results.
    pub fn with_pretty_json(mut self, pretty_json: bool) -> Self {
        self.pretty_json = pretty_json;
        self
    }

    /// Run a tool call and wrap the outcome as MCP content.
    ///
    /// Failures become an `{"error": ...}` text item flagged with `is_error`; the JSON-RPC
    /// response itself always succeeds.
    pub fn call(&self, name: &str, arguments: Option<rmcp::model::JsonObject>) -> CallToolResult {
        let outcome = dispatch(self.agent.as_ref(), name, arguments);
        let reply = ToolReply::from_outcome(outcome, self.pretty_json);
        let content = vec![Content::text(reply.text)];
        if reply.is_error {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        }
    }

    fn describe_tools(&self) -> Vec<Tool> {
        Operation::ALL
            .into_iter()
            .map(|operation| Tool {
                name: Cow::Borrowed(operation.name()),
                title: Some(operation.title().to_string()),
                description: Some(Cow::Borrowed(operation.description())),
                input_schema: Arc::new(schemas::input_schema(operation)),
                output_schema: None,
                annotations: Some(
                    ToolAnnotations::with_title(operation.title())
                        .read_only(true)
                        .destructive(false)
                        .idempotent(true)
                        .open_world(false),
                ),
                icons: None,
            })
            .collect()
    }

    fn describe_resources(&self) -> Vec<Resource> {
        let mut usage = RawResource::new(USAGE_URI, "usage");
        usage.description = Some(
            "Recommended tool chain: analyze_news -> compute_metric_updates -> detect_risks_opportunities -> generate_recommendations."
                .into(),
        );
        usage.mime_type = Some(super::format::APPLICATION_JSON.into());

        let mut rules = RawResource::new(RULES_URI, "rules");
        rules.description = Some(
            "Source categories, clamp bounds, detection thresholds, keyword lists, and stance bands."
                .into(),
        );
        rules.mime_type = Some(super::format::APPLICATION_JSON.into());

        vec![usage.no_annotation(), rules.no_annotation()]
    }
}

fn resource_usage(
    server: &NewsAgentMcpServer,
    _request: ReadResourceRequestParam,
) -> Result<ReadResourceResult, McpError> {
    Ok(ReadResourceResult {
        contents: vec![json_resource_contents(
            USAGE_URI,
            serialize_json(&usage_payload(), server.pretty_json),
        )],
    })
}

fn resource_rules(
    server: &NewsAgentMcpServer,
    _request: ReadResourceRequestParam,
) -> Result<ReadResourceResult, McpError> {
    Ok(ReadResourceResult {
        contents: vec![json_resource_contents(
            RULES_URI,
            serialize_json(&rules_payload(), server.pretty_json),
        )],
    })
}

impl ServerHandler for NewsAgentMcpServer {
    fn get_info(&self) -> ServerInfo {
        let mut implementation = rmcp::model::Implementation::from_build_env();
        implementation.name = "news-agent".to_string();
        implementation.title = Some("Financial News Agent MCP".to_string());
        implementation.version = env!("CARGO_PKG_VERSION").to_string();

        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: implementation,
            instructions: Some(
                "Use this server to turn financial news sources into a recommendation. Call analyze_news with source URLs, project indicators with compute_metric_updates using yesterday's values, detect firm-specific risks and opportunities, then generate recommendations. Each call is independent; pass results forward yourself.".into(),
            ),
            ..ServerInfo::default()
        }
    }

    fn list_resources(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListResourcesResult, McpError>> + Send + '_ {
        let resources = self.describe_resources();
        std::future::ready(Ok(ListResourcesResult::with_all_items(resources)))
    }

    fn list_tools(
        &self,
        _request: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        let tools = self.describe_tools();
        std::future::ready(Ok(ListToolsResult::with_all_items(tools)))
    }

    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<ReadResourceResult, McpError>> + Send + '_ {
        let result = match self.registry.resources.get(request.uri.as_str()) {
            Some(handler) => handler(self, request),
            None => Err(McpError::invalid_params(
                format!("Unknown resource URI: {}", request.uri),
                None,
            )),
        };
        std::future::ready(result)
    }

    fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        std::future::ready(Ok(self.call(&request.name, request.arguments)))
    }
}
