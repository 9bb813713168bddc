use research_core::analysis::MIN_PAPER_LENGTH;
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

const DEFAULT_ANALYSIS_KIND: &str = "comprehensive";

/// Parameters for the research paper analysis tool.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaperAnalysisParams {
    /// The full text of the research paper to analyze.
    pub paper_content: String,
    /// Type of analysis to perform (summary, critique, literature review, key findings, or comprehensive).
    pub analysis_type: Option<String>,
    /// Optional additional context or specific questions to guide the analysis.
    pub additional_context: Option<String>,
}

#[tool_router(router = tool_router_analysis, vis = "pub")]
impl ResearchMcp {
    #[tool(
        description = "Performs in-depth analysis of research papers using Google's Gemini model. Ideal for academic research, literature reviews, and deep understanding of scientific papers. Can extract key findings, provide critical evaluation, summarize complex research, and place papers within the broader research landscape."
    )]
    async fn gemini_research_paper_analysis(
        &self,
        Parameters(params): Parameters<PaperAnalysisParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let Some(client) = self.analysis.as_deref() else {
            return Ok(helpers::error_result(
                "Research paper analysis is unavailable: GEMINI_API_KEY is not configured",
            ));
        };

        if params.paper_content.len() < MIN_PAPER_LENGTH {
            return Ok(helpers::error_result(
                "The provided paper content is too short for meaningful analysis. Please provide more comprehensive text.",
            ));
        }

        let kind = params
            .analysis_type
            .as_deref()
            .unwrap_or(DEFAULT_ANALYSIS_KIND);
        tracing::info!(kind, "analyzing research paper");
        match client
            .analyze_paper(
                &params.paper_content,
                kind,
                params.additional_context.as_deref(),
            )
            .await
        {
            Ok(text) => Ok(helpers::text_result(text)),
            Err(err) => Ok(helpers::error_result(format!(
                "Error analyzing research paper: {err}"
            ))),
        }
    }
}
