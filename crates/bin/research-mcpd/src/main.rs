//! Daemon entry point for the research MCP server.
//!
//! Loads configuration from the environment, builds the provider gateways,
//! and serves the MCP protocol over stdio (and optionally streamable HTTP)
//! until the client disconnects or an interrupt arrives.

mod config;

use research_core::analysis::AnalysisClient;
use research_core::search::SearchClient;
use research_mcp::ResearchMcp;
use research_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::config::ResearchConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // stdout carries the stdio transport; all logging goes to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ResearchConfig::from_args()?;
    if config.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; research paper analysis will be unavailable");
    }

    let search = SearchClient::new(config.brave_api_key.clone())
        .with_base_url(config.brave_api_base_url.clone());
    let analysis = config
        .gemini_api_key
        .clone()
        .map(|key| AnalysisClient::new(key).with_base_url(config.gemini_api_base_url.clone()));
    let service = ResearchMcp::new(search, analysis);

    if config.mcp_http_serve {
        let http_service = service.clone();
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr);
        tracing::info!(addr = %config.mcp_http_addr, "starting MCP streamable HTTP transport");
        tokio::spawn(async move {
            if let Err(err) = serve_streamable_http(http_service, http_config).await {
                tracing::error!("MCP HTTP transport exited: {err}");
            }
        });
    }

    if config.enable_stdio {
        tracing::info!("serving MCP over stdio");
        tokio::select! {
            result = serve_stdio(service) => result?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("received interrupt, shutting down");
            }
        }
    } else {
        tokio::signal::ctrl_c().await?;
        tracing::info!("received interrupt, shutting down");
    }

    Ok(())
}
