use std::sync::Arc;

use news_agent::{analysis::FinancialNewsAgent, logging, mcp::NewsAgentMcpServer};
use rmcp::{
    handler::client::ClientHandler,
    model::{
        CallToolRequestParam, CallToolResult, ClientInfo, PaginatedRequestParam,
        ReadResourceRequestParam, ResourceContents,
    },
    service::{RoleClient, RoleServer, RunningService, Service, serve_directly},
    transport::async_rw::AsyncRwTransport,
};
use serde_json::{Value, json};
use tokio::{io::split, sync::OnceCell};

static INIT: OnceCell<()> = OnceCell::const_new();

#[derive(Clone, Default)]
struct DummyClientHandler;

impl ClientHandler for DummyClientHandler {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

struct TestHarness {
    service: RunningService<RoleClient, DummyClientHandler>,
    server: RunningService<RoleServer, NewsAgentMcpServer>,
}

impl TestHarness {
    async fn new() -> Self {
        INIT.get_or_init(|| async {
            logging::init_tracing();
        })
        .await;

        let server = NewsAgentMcpServer::new(Arc::new(FinancialNewsAgent::new()))
            .with_pretty_json(false);

        let (client_stream, server_stream) = tokio::io::duplex(16 * 1024);
        let (client_read, client_write) = split(client_stream);
        let (server_read, server_write) = split(server_stream);

        let client_transport = AsyncRwTransport::new_client(client_read, client_write);
        let server_transport = AsyncRwTransport::new_server(server_read, server_write);

        let server_info = server.get_info();
        let client_handler = DummyClientHandler;
        let client_info = ClientHandler::get_info(&client_handler);

        let server =
            serve_directly::<RoleServer, _, _, _, _>(server, server_transport, Some(client_info));
        let service = serve_directly::<RoleClient, _, _, _, _>(
            client_handler,
            client_transport,
            Some(server_info),
        );

        Self { service, server }
    }

    async fn call(&self, name: &str, arguments: Value) -> CallToolResult {
        self.service
            .call_tool(CallToolRequestParam {
                name: name.to_string().into(),
                arguments: arguments.as_object().cloned(),
            })
            .await
            .expect("tool call should be answered")
    }

    async fn shutdown(self) {
        let Self { service, server } = self;
        let _ = service.cancel().await;
        let _ = server.cancel().await;
    }
}

fn payload(result: &CallToolResult) -> Value {
    let text = result
        .content
        .first()
        .and_then(|content| content.raw.as_text())
        .map(|content| content.text.clone())
        .expect("text content");
    serde_json::from_str(&text).expect("text content should be JSON")
}

#[tokio::test]
async fn initialize_and_list_tools() {
    let harness = TestHarness::new().await;
    let service = &harness.service;

    let info = service
        .peer_info()
        .expect("server info should be initialized");
    assert_eq!(info.server_info.name, "news-agent");
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.resources.is_some());

    let tools_result = service
        .list_tools(Some(PaginatedRequestParam { cursor: None }))
        .await
        .expect("list_tools");

    let names: Vec<_> = tools_result
        .tools
        .iter()
        .map(|tool| tool.name.as_ref())
        .collect();
    assert_eq!(
        names,
        [
            "analyze_news",
            "compute_metric_updates",
            "detect_risks_opportunities",
            "generate_recommendations"
        ]
    );

    let detect = &tools_result.tools[2];
    assert_eq!(
        detect.input_schema["required"],
        json!(["summaries", "inflation", "exchange_rate", "interest_rate", "firm"])
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn pipeline_chains_across_calls() {
    let harness = TestHarness::new().await;

    let news = harness
        .call(
            "analyze_news",
            json!({ "sources": ["https://www.bloomberg.com/news", "https://www.wsj.com/economy"] }),
        )
        .await;
    assert_eq!(news.is_error, Some(false));
    let news = payload(&news);
    assert_eq!(news["summaries"].as_array().map(Vec::len), Some(2));
    assert!(news["summaries"][0].as_str().expect("summary").contains("bloomberg"));

    let metrics = payload(
        &harness
            .call(
                "compute_metric_updates",
                json!({
                    "inflation_pct": 10,
                    "exchange_rate_pct": 0,
                    "interest_rate_pct": 50,
                    "yesterday_inflation": 4.0,
                    "yesterday_exchange_rate": 1.3,
                    "yesterday_interest_rate": 5.0,
                }),
            )
            .await,
    );
    assert_eq!(
        metrics,
        json!({ "inflation": 4.4, "exchange_rate": 1.3, "interest_rate": 7.5 })
    );

    let report = payload(
        &harness
            .call(
                "detect_risks_opportunities",
                json!({
                    "summaries": news["summaries"],
                    "inflation": metrics["inflation"],
                    "exchange_rate": metrics["exchange_rate"],
                    "interest_rate": metrics["interest_rate"],
                    "firm": "Acme",
                }),
            )
            .await,
    );
    assert_eq!(report["risks"].as_array().map(Vec::len), Some(3));
    assert_eq!(report["opportunities"].as_array().map(Vec::len), Some(3));

    let recommendation = payload(
        &harness
            .call(
                "generate_recommendations",
                json!({
                    "risks": report["risks"],
                    "opportunities": report["opportunities"],
                }),
            )
            .await,
    );
    assert!(
        recommendation["synthesis"]
            .as_str()
            .expect("synthesis")
            .starts_with("Balanced")
    );
    assert_eq!(
        recommendation["recommendations"].as_array().map(Vec::len),
        Some(8)
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn unknown_tool_returns_error_payload_and_server_keeps_serving() {
    let harness = TestHarness::new().await;

    let response = harness.call("forecast_gdp", json!({})).await;
    assert_eq!(response.is_error, Some(true));
    assert_eq!(payload(&response), json!({ "error": "Unknown tool: forecast_gdp" }));

    let response = harness
        .call("generate_recommendations", json!({ "risks": [], "opportunities": [] }))
        .await;
    assert_eq!(response.is_error, Some(false));
    assert_eq!(
        payload(&response)["recommendations"],
        json!([
            "Monitor economic indicators closely for emerging trends",
            "Maintain operational flexibility to adapt to changing conditions",
            "Strengthen stakeholder communication regarding market outlook"
        ])
    );

    harness.shutdown().await;
}

#[tokio::test]
async fn malformed_arguments_and_sources_are_reported() {
    let harness = TestHarness::new().await;

    let response = harness
        .call("compute_metric_updates", json!({ "inflation_pct": "ten" }))
        .await;
    assert_eq!(response.is_error, Some(true));
    let error = payload(&response)["error"].as_str().map(str::to_owned);
    assert!(error.expect("error message").starts_with("Invalid arguments"));

    let response = harness
        .call("analyze_news", json!({ "sources": ["not a url"] }))
        .await;
    assert_eq!(response.is_error, Some(true));
    let error = payload(&response)["error"].as_str().map(str::to_owned);
    assert!(error.expect("error message").contains("Invalid news source 'not a url'"));

    harness.shutdown().await;
}

#[tokio::test]
async fn rules_resource_exposes_thresholds() {
    let harness = TestHarness::new().await;

    let result = harness
        .service
        .read_resource(ReadResourceRequestParam {
            uri: "mcp://news-agent/rules".into(),
        })
        .await
        .expect("read rules resource");
    let text = match &result.contents[0] {
        ResourceContents::TextResourceContents { text, .. } => text.clone(),
        other => panic!("expected text resource, got {other:?}"),
    };
    let rules: Value = serde_json::from_str(&text).expect("rules JSON");
    assert_eq!(rules["thresholds"]["inflation"]["high"], 4.0);
    assert_eq!(rules["stance"]["defensive_above"], 0.6);

    let err = harness
        .service
        .read_resource(ReadResourceRequestParam {
            uri: "mcp://news-agent/missing".into(),
        })
        .await;
    assert!(err.is_err());

    harness.shutdown().await;
}
