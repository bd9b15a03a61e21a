//! Gemini `generateContent` client with Google Search grounding.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{SearchBackend, SearchResult, Source, error::SearchError};
use crate::config::Config;

const DEFAULT_SOURCE_TITLE: &str = "Source";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| SearchError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn send(&self, body: &GenerateRequest<'_>) -> Result<String, SearchError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl SearchBackend for GeminiClient {
    async fn generate(&self, query: &str) -> Result<SearchResult, SearchError> {
        let prompt = build_prompt(query);
        let body = GenerateRequest::grounded(&prompt);

        info!(model = self.model.as_str(), "gemini_search_request");
        let text = self.send(&body).await?;
        let result = parse_generate_response(&text)?;
        debug!(sources = result.sources.len(), "gemini_search_response");
        Ok(result)
    }
}

/// Wraps the raw query in the fixed instruction template.
pub fn build_prompt(query: &str) -> String {
    format!(
        "The user is looking for: \"{query}\".\n\
         Provide a concise summary of what this is, and if it's a game, \
         suggest where they might find unblocked versions or similar games.\n\
         Format the response in clean Markdown."
    )
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
    tools: [RequestTool; 1],
}

impl<'a> GenerateRequest<'a> {
    fn grounded(prompt: &'a str) -> Self {
        Self {
            contents: [RequestContent {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            tools: [RequestTool {
                google_search: GoogleSearch {},
            }],
        }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct RequestTool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    uri: Option<String>,
    title: Option<String>,
}

/// Extracts the answer text and citations from the first candidate.
///
/// A body without candidates is an error; a candidate without grounding
/// metadata simply has no sources.
pub fn parse_generate_response(body: &str) -> Result<SearchResult, SearchError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| SearchError::Parse(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| SearchError::Parse("response contained no candidates".into()))?;

    let text = candidate
        .content
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .concat()
        })
        .unwrap_or_default();

    let sources = candidate
        .grounding_metadata
        .map(|m| m.grounding_chunks)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|chunk| chunk.web)
        .filter_map(|web| {
            let uri = web.uri.filter(|u| !u.is_empty())?;
            let title = web
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string());
            Some(Source { uri, title })
        })
        .collect();

    Ok(SearchResult { text, sources })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prompt_embeds_query() {
        let prompt = build_prompt("Slope");
        assert!(prompt.starts_with("The user is looking for: \"Slope\"."));
        assert!(prompt.contains("unblocked versions"));
        assert!(prompt.contains("Markdown"));
    }

    #[test]
    fn request_enables_google_search() {
        let body = serde_json::to_value(GenerateRequest::grounded("hello")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "tools": [{ "google_search": {} }]
            })
        );
    }

    #[test]
    fn endpoint_uses_model_and_base_url() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_BASE_URL" => Some("http://127.0.0.1:9/v1beta".into()),
            "GEMINI_MODEL" => Some("test-model".into()),
            _ => None,
        });
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/v1beta/models/test-model:generateContent"
        );
    }

    #[test]
    fn parses_text_and_sources() {
        let body = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "**Slope** is a " }, { "text": "browser game." }]
                },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://example.com/slope", "title": "example.com" } },
                        { "web": { "uri": "https://games.test/" } }
                    ]
                }
            }]
        })
        .to_string();

        let result = parse_generate_response(&body).unwrap();
        assert_eq!(result.text, "**Slope** is a browser game.");
        assert_eq!(
            result.sources,
            vec![
                Source {
                    uri: "https://example.com/slope".into(),
                    title: "example.com".into()
                },
                Source {
                    uri: "https://games.test/".into(),
                    title: "Source".into()
                },
            ]
        );
    }

    #[test]
    fn zero_grounding_chunks_yield_no_sources() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "answer" }] },
                "groundingMetadata": { "groundingChunks": [] }
            }]
        })
        .to_string();
        let result = parse_generate_response(&body).unwrap();
        assert_eq!(result.text, "answer");
        assert!(result.sources.is_empty());
    }

    #[test]
    fn missing_metadata_yields_no_sources() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "answer" }] } }]
        })
        .to_string();
        let result = parse_generate_response(&body).unwrap();
        assert!(result.sources.is_empty());
    }

    #[test]
    fn chunks_without_web_uri_are_skipped() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "answer" }] },
                "groundingMetadata": {
                    "groundingChunks": [{}, { "web": { "title": "no uri" } }]
                }
            }]
        })
        .to_string();
        let result = parse_generate_response(&body).unwrap();
        assert!(result.sources.is_empty());
    }

    #[test]
    fn no_candidates_is_an_error() {
        let body = json!({ "candidates": [] }).to_string();
        assert!(matches!(
            parse_generate_response(&body),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            parse_generate_response("<html>502</html>"),
            Err(SearchError::Parse(_))
        ));
    }
}
