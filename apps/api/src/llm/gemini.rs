//! Google Generative Language client used for LinkedIn PDF analysis.
//!
//! The profile PDF travels inline, base64-encoded, alongside the prompt —
//! the same `generateContent` shape the original integration used.

use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{LlmError, MAX_RETRIES};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all Gemini calls.
pub const MODEL: &str = "gemini-1.5-pro-latest";

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first text part.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .find_map(|p| p.text)
    }
}

/// Wraps the `generateContent` endpoint with the same retry policy as the
/// Groq client. The API key travels as a query parameter, which is how
/// the Generative Language API authenticates.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends a prompt plus an inline PDF document and returns the response text.
    pub async fn analyze_pdf(&self, prompt: &str, pdf_bytes: &[u8]) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text(prompt.to_string()),
                    Part::InlineData(InlineData {
                        mime_type: "application/pdf".to_string(),
                        data: base64::engine::general_purpose::STANDARD.encode(pdf_bytes),
                    }),
                ],
            }],
        };

        let url = format!("{GEMINI_API_URL}/{MODEL}:generateContent");
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Gemini call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .query(&[("key", self.api_key.as_str())])
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
            }

            let generate_response: GenerateResponse = response.json().await?;
            return generate_response.text().ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_takes_first_text_part() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "hello"}, {"text": "ignored"}]}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_response_text_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_inline_data_serializes_camel_case() {
        let part = Part::InlineData(InlineData {
            mime_type: "application/pdf".to_string(),
            data: "AAAA".to_string(),
        });
        let json = serde_json::to_string(&part).unwrap();
        assert!(json.contains("inlineData"));
        assert!(json.contains("mimeType"));
    }
}
