//! Gemini `generateContent` API client.
//!
//! # Architecture
//!
//! The module uses a trait-based design so the network boundary can be
//! stubbed in tests:
//! - [`GenerateText`]: core trait defining async text generation
//! - [`GeminiClient`]: production implementation over the Gemini REST API
//!
//! There is no retry and no backoff: a transport or API failure propagates
//! to the caller and terminates the run. The API key is read from the
//! `GEMINI_API_KEY` environment variable when the client is constructed, so
//! a missing credential fails before any network call is attempted. The key
//! is sent in a request header and never logged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Trait for async text generation.
///
/// Implementors send a prompt to a generative-text backend and return the
/// raw response text unmodified.
pub trait GenerateText {
    /// Send a prompt and receive the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<ContentPayload<'a>>,
    #[serde(rename = "systemInstruction")]
    system_instruction: ContentPayload<'a>,
}

#[derive(Serialize)]
struct ContentPayload<'a> {
    parts: Vec<PartPayload<'a>>,
}

#[derive(Serialize)]
struct PartPayload<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    system_instruction: String,
}

impl GeminiClient {
    /// Construct a client, reading the API key from the environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `GEMINI_API_KEY` is unset or
    /// empty. This is checked here, before any request is made.
    pub fn from_env(model: &str, system_instruction: &str) -> Result<Self, Box<dyn Error>> {
        let api_key = match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(format!(
                    "{API_KEY_VAR} environment variable is not set; cannot call the Gemini API"
                )
                .into());
            }
        };

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: model.to_string(),
            system_instruction: system_instruction.to_string(),
        })
    }
}

impl GenerateText for GeminiClient {
    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let url = format!("{BASE_URL}/models/{}:generateContent", self.model);
        let request = GenerateContentRequest {
            contents: vec![ContentPayload {
                parts: vec![PartPayload { text: prompt }],
            }],
            system_instruction: ContentPayload {
                parts: vec![PartPayload {
                    text: &self.system_instruction,
                }],
            },
        };

        let t0 = Instant::now();
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                status = %status,
                elapsed_ms = t0.elapsed().as_millis() as u64,
                body_preview = %truncate_for_log(&body, 300),
                "Gemini API returned an error status"
            );
            return Err(format!("Gemini API request failed with status {status}").into());
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text: String = parsed
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err("Gemini API returned no usable candidate text".into());
        }

        info!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            response_chars = text.chars().count(),
            "Gemini API call succeeded"
        );
        Ok(text)
    }
}

/// Truncate a string for logging purposes, without splitting a code point.
fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let cut = s
            .char_indices()
            .take_while(|(i, _)| *i < max)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}
