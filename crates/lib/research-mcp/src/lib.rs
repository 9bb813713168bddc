//! MCP server implementation for research-mcp.
//!
//! This crate wires the search and analysis gateways into rmcp tool handlers
//! and exposes the MCP-facing tool surface. Tool handlers are the single
//! dispatch point: gateway failures are converted into error results here and
//! never propagate as protocol errors.

mod helpers;
mod tools;
pub mod server;

use std::sync::Arc;

use research_core::analysis::AnalysisClient;
use research_core::search::SearchClient;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"research-mcp exposes Brave Search and Gemini analysis tools.

Tools:
- `brave_web_search`: general web search. Arguments: `query` (required),
  `count` (1-20, default 10), `offset` (0-9, default 0).
- `brave_local_search`: local business and place search with POI details,
  ratings, phone numbers, and opening hours. Arguments: `query` (required),
  `count` (1-20, default 5). Falls back to web search automatically when no
  local results match.
- `gemini_research_paper_analysis`: in-depth research paper analysis.
  Arguments: `paperContent` (required, at least 100 characters),
  `analysisType` (summary, critique, literature review, key findings, or
  comprehensive; default comprehensive), `additionalContext` (optional).
- `health` returns `ok`.";

/// MCP server wrapper around the search and analysis gateways.
#[derive(Clone)]
pub struct ResearchMcp {
    tool_router: ToolRouter<Self>,
    search: Arc<SearchClient>,
    analysis: Option<Arc<AnalysisClient>>,
}

impl ResearchMcp {
    /// Creates a new server. `analysis` is `None` when no Gemini key is
    /// configured; the analysis tool then reports itself unavailable.
    #[must_use]
    pub fn new(search: SearchClient, analysis: Option<AnalysisClient>) -> Self {
        let tool_router =
            Self::tool_router_core() + Self::tool_router_search() + Self::tool_router_analysis();
        Self {
            tool_router,
            search: Arc::new(search),
            analysis: analysis.map(Arc::new),
        }
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl ResearchMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for ResearchMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
