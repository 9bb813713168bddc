//! Brave Search gateway.
//!
//! Issues web and local search calls against the Brave Search API and renders
//! the responses as plain-text result blocks. Local search runs a
//! location-discovery query first, then fetches POI details and descriptions
//! concurrently for the discovered ids, falling back to a plain web search
//! when no locations match.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::format::format_local_results;

const DEFAULT_BASE_URL: &str = "https://api.search.brave.com/res/v1";
const SUBSCRIPTION_HEADER: &str = "X-Subscription-Token";

/// Hard ceiling the provider places on the `count` parameter.
pub const MAX_RESULT_COUNT: u32 = 20;

/// Failure surfaced by the search gateway.
#[derive(Debug)]
pub enum SearchError {
    /// Non-success status from the provider, with the response body verbatim.
    Api { status: StatusCode, body: String },
    /// Transport-level failure (connect, timeout, malformed payload).
    Http(reqwest::Error),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { status, body } => write!(f, "Brave API error: {status}\n{body}"),
            Self::Http(err) => write!(f, "Brave API request failed: {err}"),
        }
    }
}

impl Error for SearchError {}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

/// Clamps a requested result count to the provider ceiling.
#[must_use]
pub const fn clamp_count(count: u32) -> u32 {
    if count > MAX_RESULT_COUNT {
        MAX_RESULT_COUNT
    } else {
        count
    }
}

#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    web: WebSection,
    #[serde(default)]
    locations: LocationSection,
}

#[derive(Debug, Default, Deserialize)]
struct WebSection {
    #[serde(default)]
    results: Vec<WebResult>,
}

#[derive(Debug, Default, Deserialize)]
struct WebResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Default, Deserialize)]
struct LocationSection {
    #[serde(default)]
    results: Vec<LocationRef>,
}

/// Opaque location identifier from a location-filtered query. The id may be
/// missing or null for unverified entries.
#[derive(Debug, Default, Deserialize)]
struct LocationRef {
    #[serde(default)]
    id: Option<String>,
}

/// A point-of-interest record returned by the POI lookup.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub address: Address,
    pub phone: Option<String>,
    pub rating: Option<Rating>,
    pub opening_hours: Vec<String>,
    pub price_range: Option<String>,
}

/// Structured postal address; every component is optional in the payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub street_address: Option<String>,
    pub address_locality: Option<String>,
    pub address_region: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rating {
    pub rating_value: Option<f64>,
    pub rating_count: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PoiResponse {
    #[serde(default)]
    pub results: Vec<Place>,
}

/// Free-text descriptions keyed by location id. Entries may be missing for
/// some ids.
#[derive(Debug, Default, Deserialize)]
pub struct DescriptionTable {
    #[serde(default)]
    pub descriptions: HashMap<String, String>,
}

/// Client for the Brave Search API.
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SearchClient {
    /// Creates a client against the public Brave endpoint.
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

    /// Runs a general web search and renders the results as text blocks,
    /// preserving the provider's ranking order.
    ///
    /// # Errors
    /// Returns [`SearchError::Api`] on a non-success provider status and
    /// [`SearchError::Http`] on transport failure.
    pub async fn web_search(
        &self,
        query: &str,
        count: u32,
        offset: u32,
    ) -> Result<String, SearchError> {
        let data: QueryResponse = self
            .get_json(
                "/web/search",
                &[
                    ("q", query.to_string()),
                    ("count", clamp_count(count).to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        Ok(render_web_results(&data.web.results))
    }

    /// Runs a local-business search with POI and description enrichment.
    ///
    /// Falls back to a plain web search when the location-discovery query
    /// returns no ids. A provider error on that query propagates instead;
    /// the fallback covers empty results only. The POI and description
    /// lookups run concurrently and both must succeed.
    ///
    /// # Errors
    /// Returns [`SearchError::Api`] on a non-success provider status and
    /// [`SearchError::Http`] on transport failure, from any of the calls.
    pub async fn local_search(&self, query: &str, count: u32) -> Result<String, SearchError> {
        let data: QueryResponse = self
            .get_json(
                "/web/search",
                &[
                    ("q", query.to_string()),
                    ("search_lang", "en".to_string()),
                    ("result_filter", "locations".to_string()),
                    ("count", clamp_count(count).to_string()),
                ],
            )
            .await?;

        let ids: Vec<String> = data
            .locations
            .results
            .into_iter()
            .filter_map(|location| location.id)
            .filter(|id| !id.is_empty())
            .collect();

        if ids.is_empty() {
            tracing::debug!(query, "no local results, falling back to web search");
            return self.web_search(query, count, 0).await;
        }

        let (pois, descriptions) =
            tokio::try_join!(self.fetch_pois(&ids), self.fetch_descriptions(&ids))?;

        Ok(format_local_results(&pois.results, &descriptions.descriptions))
    }

    async fn fetch_pois(&self, ids: &[String]) -> Result<PoiResponse, SearchError> {
        self.get_json("/local/pois", &ids_query(ids)).await
    }

    async fn fetch_descriptions(&self, ids: &[String]) -> Result<DescriptionTable, SearchError> {
        self.get_json("/local/descriptions", &ids_query(ids)).await
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, SearchError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .header(ACCEPT, "application/json")
            .header(SUBSCRIPTION_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

fn ids_query(ids: &[String]) -> Vec<(&'static str, String)> {
    ids.iter().map(|id| ("ids", id.clone())).collect()
}

fn render_web_results(results: &[WebResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "Title: {}\nDescription: {}\nURL: {}",
                result.title, result.description, result.url
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
