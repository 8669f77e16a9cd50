use serde::{Deserialize, Serialize};
use tracing::warn;

use super::fallback::{fetch_with_fallback, Provider};
use super::http::{FetchError, HttpRequest, HttpTransport};
use crate::config::EndpointConfig;

pub const MAX_RESULTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

/// Human-facing search page for `query`, used whenever the API has nothing.
pub fn search_page_url(base: &str, query: &str) -> String {
    format!("{}?q={}", base, urlencoding::encode(query))
}

#[derive(Debug, Default, Deserialize)]
struct InstantAnswer {
    #[serde(rename = "AbstractText", default)]
    abstract_text: Option<String>,
    #[serde(rename = "Heading", default)]
    heading: Option<String>,
    #[serde(rename = "AbstractURL", default)]
    abstract_url: Option<String>,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<Topic>,
    #[serde(rename = "Results", default)]
    results: Vec<Topic>,
    #[serde(rename = "Definition", default)]
    definition: Option<String>,
    #[serde(rename = "DefinitionURL", default)]
    definition_url: Option<String>,
}

/// Related topics may also be nested category groups; those carry neither
/// field and are skipped.
#[derive(Debug, Default, Deserialize)]
struct Topic {
    #[serde(rename = "FirstURL", default)]
    first_url: Option<String>,
    #[serde(rename = "Text", default)]
    text: Option<String>,
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

impl Topic {
    fn into_result(self) -> Option<SearchResult> {
        let link = non_empty(self.first_url)?;
        let text = non_empty(self.text)?;
        let title = match text.split(" - ").next() {
            Some(head) if !head.is_empty() => head.to_string(),
            _ => text.clone(),
        };
        Some(SearchResult {
            title,
            snippet: text,
            link,
        })
    }
}

/// DuckDuckGo instant-answer API.
#[derive(Debug, Clone)]
pub struct InstantAnswerProvider {
    pub api_base: String,
    pub page_base: String,
    pub query: String,
}

impl InstantAnswerProvider {
    pub fn new(endpoints: &EndpointConfig, query: &str) -> Self {
        Self {
            api_base: endpoints.search_api.clone(),
            page_base: endpoints.search_page.clone(),
            query: query.to_string(),
        }
    }

    /// Decomposes the response into results, section by section: abstract,
    /// related topics, direct results, definition. Always yields between one
    /// and `MAX_RESULTS` entries.
    fn decompose(&self, answer: InstantAnswer) -> Vec<SearchResult> {
        let fallback_link = search_page_url(&self.page_base, &self.query);
        let mut results = Vec::new();

        if let Some(snippet) = non_empty(answer.abstract_text) {
            results.push(SearchResult {
                title: non_empty(answer.heading).unwrap_or_else(|| self.query.clone()),
                snippet,
                link: non_empty(answer.abstract_url).unwrap_or_else(|| fallback_link.clone()),
            });
        }

        results.extend(answer.related_topics.into_iter().filter_map(Topic::into_result));
        results.extend(answer.results.into_iter().filter_map(Topic::into_result));

        if let (Some(snippet), Some(link)) =
            (non_empty(answer.definition), non_empty(answer.definition_url))
        {
            results.push(SearchResult {
                title: format!("{} - Definition", self.query),
                snippet,
                link,
            });
        }

        if results.is_empty() {
            results.push(SearchResult {
                title: format!("Search results for \"{}\"", self.query),
                snippet: "I couldn't find specific information, but you can try searching directly on DuckDuckGo.".to_string(),
                link: fallback_link,
            });
        }

        results.truncate(MAX_RESULTS);
        results
    }
}

impl Provider for InstantAnswerProvider {
    type Output = Vec<SearchResult>;

    fn name(&self) -> &str {
        "duckduckgo"
    }

    fn request(&self) -> HttpRequest {
        HttpRequest::get(format!(
            "{}?q={}&format=json&no_html=1&skip_disambig=1",
            self.api_base,
            urlencoding::encode(&self.query)
        ))
    }

    fn normalize(&self, body: &str) -> Result<Vec<SearchResult>, FetchError> {
        let answer: InstantAnswer =
            serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
        Ok(self.decompose(answer))
    }
}

/// Runs the search chain. A failed chain is replaced by a single local
/// "Search Error" card so the caller always has something to show.
pub async fn search(
    transport: &dyn HttpTransport,
    endpoints: &EndpointConfig,
    query: &str,
) -> Vec<SearchResult> {
    let providers = [InstantAnswerProvider::new(endpoints, query)];
    match fetch_with_fallback(transport, &providers).await {
        Ok(results) => results,
        Err(e) => {
            warn!("Search failed: {}", e);
            vec![SearchResult {
                title: "Search Error".to_string(),
                snippet: "I couldn't complete the search. Please try again later.".to_string(),
                link: search_page_url(&endpoints.search_page, query),
            }]
        }
    }
}
