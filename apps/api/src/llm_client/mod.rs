/// LLM Client: the single point of entry for all generative-language API
/// calls in this service.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All analysis and chat interactions MUST go through this module.
///
/// Model: gemini-2.5-flash (hardcoded)
///
/// Failure policy: a single attempt per call, surfaced to the caller. The
/// workflow owns retries and they are always user-initiated; this client
/// never retries silently. The request timeout is the caller-visible ceiling
/// so the workflow cannot hang on a dead service.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::analysis::{AnalysisResult, EvaluationRequest};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all LLM calls in this service.
pub const MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("response shape mismatch: {0}")]
    Shape(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One prior turn of the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Model,
}

impl Speaker {
    fn as_role(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Model => "model",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (Gemini generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: SystemInstruction,
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Extracts the text of the first candidate's first part.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .map(|p| p.text.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam
// ────────────────────────────────────────────────────────────────────────────

/// The evaluation/chat boundary. Carried in `AppState` as
/// `Arc<dyn EvaluationBackend>` so the workflow can be exercised against a
/// stub service in tests.
#[async_trait]
pub trait EvaluationBackend: Send + Sync {
    /// Sends the (job description, resume text) pair and returns a fully
    /// validated result, never a partially populated one.
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<AnalysisResult, LlmError>;

    /// Sends one assistant message plus ordered history, returns the reply.
    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// The production backend speaking to the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes one call to the generateContent endpoint and returns the reply
    /// text. No retries: the first failure is the caller's to handle.
    async fn generate(
        &self,
        system: &str,
        contents: Vec<Content>,
        response_schema: Option<serde_json::Value>,
    ) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![Part {
                    text: system.to_string(),
                }],
            },
            contents,
            generation_config: response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed.text().ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded ({} chars)", text.len());
        Ok(text.to_string())
    }
}

#[async_trait]
impl EvaluationBackend for GeminiClient {
    async fn evaluate(&self, request: &EvaluationRequest) -> Result<AnalysisResult, LlmError> {
        let prompt = prompts::ANALYSIS_PROMPT_TEMPLATE
            .replace("{job_description}", &request.job_description)
            .replace("{resume_text}", &request.resume_text);

        let contents = vec![Content {
            role: "user".to_string(),
            parts: vec![Part { text: prompt }],
        }];

        let text = self
            .generate(
                prompts::ANALYSIS_SYSTEM,
                contents,
                Some(prompts::analysis_response_schema()),
            )
            .await?;

        let text = strip_json_fences(&text);
        let result: AnalysisResult =
            serde_json::from_str(text).map_err(|e| LlmError::Shape(e.to_string()))?;
        result.validate().map_err(LlmError::Shape)?;
        Ok(result)
    }

    async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, LlmError> {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content {
                role: turn.speaker.as_role().to_string(),
                parts: vec![Part {
                    text: turn.text.clone(),
                }],
            })
            .collect();
        contents.push(Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: message.to_string(),
            }],
        });

        self.generate(prompts::CHAT_SYSTEM, contents, None).await
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
/// Structured-output mode should return bare JSON, but fenced replies still
/// show up and are cheap to accept.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"match_percentage\": 62}\n```";
        assert_eq!(strip_json_fences(input), "{\"match_percentage\": 62}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"match_percentage\": 62}\n```";
        assert_eq!(strip_json_fences(input), "{\"match_percentage\": 62}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"match_percentage\": 62}";
        assert_eq!(strip_json_fences(input), input);
    }

    #[test]
    fn test_generate_response_text_extraction() {
        let json = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "hello there"}]
                    }
                }
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("hello there"));
    }

    #[test]
    fn test_generate_response_without_candidates_is_empty() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_gemini_error_body_parses() {
        let json = r#"{"error": {"code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE"}}"#;
        let err: GeminiError = serde_json::from_str(json).unwrap();
        assert_eq!(err.error.message, "The model is overloaded");
    }

    #[test]
    fn test_chat_turn_speaker_roles() {
        assert_eq!(Speaker::User.as_role(), "user");
        assert_eq!(Speaker::Model.as_role(), "model");
        let turn: ChatTurn =
            serde_json::from_str(r#"{"speaker": "model", "text": "hi"}"#).unwrap();
        assert_eq!(turn.speaker, Speaker::Model);
    }
}
