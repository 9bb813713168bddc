use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{ResearchMcp, helpers};

const DEFAULT_WEB_COUNT: u32 = 10;
const DEFAULT_LOCAL_COUNT: u32 = 5;
const DEFAULT_OFFSET: u32 = 0;

/// Parameters for the web search tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct WebSearchParams {
    /// Search query (max 400 chars, 50 words).
    pub query: String,
    /// Number of results (1-20, default 10).
    pub count: Option<u32>,
    /// Pagination offset (max 9, default 0).
    pub offset: Option<u32>,
}

/// Parameters for the local search tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct LocalSearchParams {
    /// Local search query (e.g. 'pizza near Central Park').
    pub query: String,
    /// Number of results (1-20, default 5).
    pub count: Option<u32>,
}

#[tool_router(router = tool_router_search, vis = "pub")]
impl ResearchMcp {
    #[tool(
        description = "Performs a web search using the Brave Search API, ideal for general queries, news, articles, and online content. Supports pagination. Maximum 20 results per request, with offset for pagination."
    )]
    async fn brave_web_search(
        &self,
        Parameters(params): Parameters<WebSearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let count = params.count.unwrap_or(DEFAULT_WEB_COUNT);
        let offset = params.offset.unwrap_or(DEFAULT_OFFSET);
        match self.search.web_search(&params.query, count, offset).await {
            Ok(text) => Ok(helpers::text_result(text)),
            Err(err) => Ok(helpers::error_result(format!("Error: {err}"))),
        }
    }

    #[tool(
        description = "Searches for local businesses and places using Brave's Local Search API. Returns business names, addresses, ratings, review counts, phone numbers, and opening hours. Use this when the query implies 'near me' or mentions specific locations. Automatically falls back to web search if no local results are found."
    )]
    async fn brave_local_search(
        &self,
        Parameters(params): Parameters<LocalSearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let count = params.count.unwrap_or(DEFAULT_LOCAL_COUNT);
        match self.search.local_search(&params.query, count).await {
            Ok(text) => Ok(helpers::text_result(text)),
            Err(err) => Ok(helpers::error_result(format!("Error: {err}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use research_core::search::SearchClient;
    use rmcp::handler::server::wrapper::Parameters;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{LocalSearchParams, WebSearchParams};
    use crate::ResearchMcp;

    fn server_for(mock: &MockServer) -> ResearchMcp {
        let search = SearchClient::new("test-key").with_base_url(mock.uri());
        ResearchMcp::new(search, None)
    }

    fn result_parts(result: &rmcp::model::CallToolResult) -> (bool, String) {
        let value = serde_json::to_value(result).expect("result should serialize");
        let is_error = value["isError"].as_bool().unwrap_or(false);
        let text = value["content"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        (is_error, text)
    }

    #[tokio::test]
    async fn web_search_applies_count_and_offset_defaults() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/web/search"))
            .and(query_param("count", "10"))
            .and(query_param("offset", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "web": { "results": [{ "title": "T", "description": "D", "url": "U" }] }
            })))
            .expect(1)
            .mount(&mock)
            .await;

        let result = server_for(&mock)
            .brave_web_search(Parameters(WebSearchParams {
                query: "anything".to_string(),
                count: None,
                offset: None,
            }))
            .await
            .expect("handler should not fail");

        let (is_error, text) = result_parts(&result);
        assert!(!is_error);
        assert_eq!(text, "Title: T\nDescription: D\nURL: U");
    }

    #[tokio::test]
    async fn gateway_failure_becomes_error_result() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/web/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock)
            .await;

        let result = server_for(&mock)
            .brave_local_search(Parameters(LocalSearchParams {
                query: "pizza".to_string(),
                count: None,
            }))
            .await
            .expect("handler should not fail");

        let (is_error, text) = result_parts(&result);
        assert!(is_error);
        assert!(text.starts_with("Error: Brave API error: 500"));
        assert!(text.contains("boom"));
    }

    #[tokio::test]
    async fn local_search_applies_count_default() {
        let mock = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/web/search"))
            .and(query_param("result_filter", "locations"))
            .and(query_param("count", "5"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "locations": { "results": [] } })),
            )
            .expect(1)
            .mount(&mock)
            .await;
        Mock::given(method("GET"))
            .and(path("/web/search"))
            .and(query_param("offset", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "web": { "results": [] } })),
            )
            .mount(&mock)
            .await;

        let result = server_for(&mock)
            .brave_local_search(Parameters(LocalSearchParams {
                query: "pizza".to_string(),
                count: None,
            }))
            .await
            .expect("handler should not fail");

        let (is_error, _) = result_parts(&result);
        assert!(!is_error);
    }
}
