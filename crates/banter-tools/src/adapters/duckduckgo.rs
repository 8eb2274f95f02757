// Tool: duckduckgo_search
//
// Single-call wrapper over the DuckDuckGo Instant Answer API. The abstract
// (when present) comes first, then one result per related topic that carries
// both a text and a URL, truncated to max_results. Transport failures come
// back as a tool error message so the conversation can continue.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::config::SearchConfig;
use crate::tools::{Tool, ToolExecutionResult};

const DEFAULT_MAX_RESULTS: u64 = 5;
const MAX_RESULTS_LIMIT: u64 = 100;

/// Tool that searches the web via DuckDuckGo
pub struct DuckDuckGoSearchTool {
    client: Client,
    base_url: String,
}

impl DuckDuckGoSearchTool {
    /// Create the tool against the configured search endpoint
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    async fn search(&self, query: &str, max_results: usize) -> ToolExecutionResult {
        let url = format!("{}/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(err) => {
                error!(error = %err, "DuckDuckGo search request failed");
                return ToolExecutionResult::tool_error(format!(
                    "DuckDuckGo search request failed: {err}"
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), "DuckDuckGo search request failed");
            return ToolExecutionResult::tool_error(format!(
                "DuckDuckGo search request failed: status {}",
                status.as_u16()
            ));
        }

        let answer: InstantAnswer = match response.json().await {
            Ok(a) => a,
            Err(err) => {
                error!(error = %err, "DuckDuckGo search response was not valid JSON");
                return ToolExecutionResult::tool_error(format!(
                    "DuckDuckGo search request failed: {err}"
                ));
            }
        };

        let results = map_results(answer, max_results);
        ToolExecutionResult::success(serde_json::json!({
            "query": query,
            "results": results,
        }))
    }
}

#[async_trait]
impl Tool for DuckDuckGoSearchTool {
    fn name(&self) -> &str {
        "duckduckgo_search"
    }

    fn description(&self) -> &str {
        "A free search engine for finding information from the web. Useful for when you need to answer questions about current events or general information."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "minLength": 1,
                    "description": "The search query string."
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 100,
                    "description": "The maximum number of search results to return. Defaults to 5."
                }
            },
            "required": ["query"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, arguments: Value) -> ToolExecutionResult {
        let query = match arguments.get("query").and_then(|v| v.as_str()) {
            Some(q) if !q.is_empty() => q,
            _ => return ToolExecutionResult::tool_error("Missing required parameter: query"),
        };

        let max_results = match arguments.get("max_results") {
            None => DEFAULT_MAX_RESULTS,
            Some(value) => match value.as_u64() {
                Some(n) if (1..=MAX_RESULTS_LIMIT).contains(&n) => n,
                _ => {
                    return ToolExecutionResult::tool_error(
                        "Invalid max_results: must be an integer between 1 and 100",
                    )
                }
            },
        };

        self.search(query, max_results as usize).await
    }
}

/// One search result handed back to the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct SearchResult {
    title: String,
    link: String,
    snippet: String,
}

fn map_results(answer: InstantAnswer, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    if !answer.abstract_text.is_empty() {
        results.push(SearchResult {
            title: "Abstract".to_string(),
            link: answer.abstract_url,
            snippet: answer.abstract_text,
        });
    }

    // Topics missing either field are skipped, not errors
    for topic in answer.related_topics {
        if topic.text.is_empty() || topic.first_url.is_empty() {
            continue;
        }
        let title = topic
            .text
            .split(" - ")
            .next()
            .unwrap_or_default()
            .to_string();
        results.push(SearchResult {
            title,
            link: topic.first_url,
            snippet: topic.text,
        });
    }

    results.truncate(max_results);
    results
}

// ============================================================================
// Wire types for the Instant Answer API
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InstantAnswer {
    #[serde(rename = "AbstractText")]
    abstract_text: String,
    #[serde(rename = "AbstractURL")]
    abstract_url: String,
    #[serde(rename = "RelatedTopics")]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RelatedTopic {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: String,
}
