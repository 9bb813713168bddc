//! Gemini analysis gateway.
//!
//! Builds an analysis prompt from paper content, an analysis kind, and
//! optional extra context, then forwards it to the Gemini `generateContent`
//! endpoint. The model's text comes back verbatim; no post-processing.

use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-1.5-flash";

/// Minimum paper length (in bytes) accepted for analysis. Enforced by the
/// dispatcher before this gateway is called.
pub const MIN_PAPER_LENGTH: usize = 100;

/// Failure surfaced by the analysis gateway.
#[derive(Debug)]
pub enum AnalysisError {
    /// Non-success status from the model endpoint, with the body verbatim.
    Api { status: StatusCode, body: String },
    /// Transport-level failure (connect, timeout, malformed payload).
    Http(reqwest::Error),
    /// The model responded successfully but produced no candidates.
    EmptyResponse,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, body } => {
                write!(f, "Failed to analyze paper: Gemini API error: {status}\n{body}")
            }
            Self::Http(err) => write!(f, "Failed to analyze paper: {err}"),
            Self::EmptyResponse => {
                write!(f, "Failed to analyze paper: model returned no candidates")
            }
        }
    }
}

impl Error for AnalysisError {}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini generative-language API.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnalysisClient {
    /// Creates a client against the public Gemini endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL. Intended for tests and proxies.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sends paper content to the model and returns its analysis verbatim.
    ///
    /// # Errors
    /// Returns [`AnalysisError::Api`] on a non-success status,
    /// [`AnalysisError::Http`] on transport failure, and
    /// [`AnalysisError::EmptyResponse`] when no candidates come back.
    pub async fn analyze_paper(
        &self,
        content: &str,
        kind: &str,
        context: Option<&str>,
    ) -> Result<String, AnalysisError> {
        let prompt = build_prompt(content, kind, context);
        tracing::debug!(kind, prompt_len = prompt.len(), "requesting paper analysis");

        let response = self
            .http
            .post(format!("{}/models/{MODEL}:generateContent", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "contents": [{ "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Api { status, body });
        }

        let data: GenerateResponse = response.json().await?;
        let candidate = data
            .candidates
            .into_iter()
            .next()
            .ok_or(AnalysisError::EmptyResponse)?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect())
    }
}

fn build_prompt(content: &str, kind: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "I need you to perform a detailed {kind} analysis of the following research paper.\n\n"
    );
    if let Some(context) = context {
        prompt.push_str(&format!("Additional context: {context}\n\n"));
    }
    prompt.push_str(&format!("Research paper content:\n{content}\n\n"));
    prompt.push_str(instruction_for(kind));
    prompt
}

/// Kind-specific instruction suffix. Recognized kinds match case-insensitively;
/// anything else falls through to the comprehensive instruction.
fn instruction_for(kind: &str) -> &'static str {
    match kind.to_lowercase().as_str() {
        "summary" => {
            "Provide a comprehensive summary including the research question, methodology, key findings, and conclusions."
        }
        "critique" => {
            "Provide a critical evaluation of the research methodology, validity of findings, limitations, and suggestions for improvement."
        }
        "literature review" => {
            "Analyze how this paper fits into the broader research landscape, identifying key related works and research gaps."
        }
        "key findings" => {
            "Extract and explain the most significant findings and their implications."
        }
        _ => {
            "Perform a comprehensive analysis including summary, methodology assessment, key findings, limitations, and significance."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_kinds_match_case_insensitively() {
        assert_eq!(instruction_for("Summary"), instruction_for("summary"));
        assert_eq!(instruction_for("CRITIQUE"), instruction_for("critique"));
        assert_eq!(
            instruction_for("Literature Review"),
            instruction_for("literature review")
        );
        assert_eq!(
            instruction_for("Key Findings"),
            instruction_for("key findings")
        );
    }

    #[test]
    fn unrecognized_kind_falls_through_to_comprehensive() {
        assert_eq!(instruction_for("deep dive"), instruction_for("comprehensive"));
        assert_eq!(instruction_for(""), instruction_for("comprehensive"));
    }

    #[test]
    fn prompt_names_the_kind_and_carries_the_content() {
        let prompt = build_prompt("the paper body", "critique", None);
        assert!(prompt.starts_with(
            "I need you to perform a detailed critique analysis of the following research paper.\n\n"
        ));
        assert!(prompt.contains("Research paper content:\nthe paper body\n\n"));
        assert!(prompt.ends_with(instruction_for("critique")));
        assert!(!prompt.contains("Additional context:"));
    }

    #[test]
    fn prompt_includes_context_line_when_supplied() {
        let prompt = build_prompt("the paper body", "summary", Some("focus on methods"));
        assert!(prompt.contains("Additional context: focus on methods\n\n"));
    }

    #[test]
    fn generate_response_tolerates_missing_fields() {
        let data: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{}}]}"#)
                .expect("payload should deserialize");
        assert_eq!(data.candidates.len(), 1);
        assert!(data.candidates[0].content.parts.is_empty());
    }
}
