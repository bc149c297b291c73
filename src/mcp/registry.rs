use std::collections::HashMap;

use rmcp::ErrorData as McpError;
use rmcp::model::{ReadResourceRequestParam, ReadResourceResult};

use super::server::NewsAgentMcpServer;

pub type ResourceHandler =
    fn(&NewsAgentMcpServer, ReadResourceRequestParam) -> Result<ReadResourceResult, McpError>;

/// Registry mapping resource URIs to handler functions.
#[derive(Default)]
pub struct Registry {
    pub resources: HashMap<&'static str, ResourceHandler>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_resource(&mut self, uri: &'static str, handler: ResourceHandler) {
        self.resources.insert(uri, handler);
    }
}
