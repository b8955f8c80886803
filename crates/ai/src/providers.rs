//! Insight providers - the Gemini client and a stub for tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::InsightError;
use crate::types::{ExpenseSnapshot, Insight};

// ============================================================================
// Constants
// ============================================================================

/// Model every insight request runs against.
pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Base URL of the Generative Language API.
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "SEME_GEMINI_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Opening paragraph of every insight request. The advisor persona and the
/// exactly-3-tips instruction are what cap the response size.
const ADVISOR_PROMPT: &str = "Você é um consultor financeiro amigável e otimista para uma família. Analise a seguinte lista de despesas recentes e forneça exatamente 3 dicas curtas, práticas e encorajadoras para ajudá-los a economizar dinheiro ou melhorar seus hábitos financeiros. As dicas devem ser acionáveis e baseadas nos dados fornecidos.";

// ============================================================================
// Provider Trait
// ============================================================================

/// Trait for turning expense snapshots into savings tips.
#[async_trait]
pub trait InsightProviderTrait: Send + Sync {
    /// Ask the advisor for tips over the given snapshots.
    async fn generate_insights(
        &self,
        expenses: &[ExpenseSnapshot],
    ) -> Result<Vec<Insight>, InsightError>;
}

// ============================================================================
// Request Construction
// ============================================================================

/// Render the advisor prompt with the expense listing embedded.
fn advisor_prompt(expenses: &[ExpenseSnapshot]) -> Result<String, InsightError> {
    let listing = serde_json::to_string_pretty(expenses)
        .map_err(|e| InsightError::Serialization(e.to_string()))?;
    Ok(format!(
        "{}\n\n      Gastos recentes:\n      {}\n      ",
        ADVISOR_PROMPT, listing
    ))
}

/// Response schema sent with every request: an array of
/// `{title, description}` objects, both strings.
fn insight_schema() -> serde_json::Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "Um título curto e chamativo para a dica financeira."
                },
                "description": {
                    "type": "STRING",
                    "description": "Uma descrição de uma frase, explicando a dica de forma simples e direta."
                }
            },
            "required": ["title", "description"]
        }
    })
}

/// Build the full `generateContent` request body.
fn build_request_body(expenses: &[ExpenseSnapshot]) -> Result<serde_json::Value, InsightError> {
    let prompt = advisor_prompt(expenses)?;
    Ok(json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": insight_schema(),
        }
    }))
}

// ============================================================================
// Response Parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
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

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, InsightError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(InsightError::EmptyResponse)?;
    let parts = candidate.content.map(|content| content.parts).unwrap_or_default();
    let text: String = parts.into_iter().filter_map(|part| part.text).collect();
    if text.trim().is_empty() {
        return Err(InsightError::EmptyResponse);
    }
    Ok(text)
}

/// Parse the schema-constrained JSON payload into insights.
fn parse_insights(text: &str) -> Result<Vec<Insight>, InsightError> {
    serde_json::from_str(text.trim()).map_err(|e| InsightError::InvalidResponse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a non-2xx response to an error, keeping the envelope message when the
/// body parses and a truncated raw body when it does not.
fn api_error(status: u16, body: &str) -> InsightError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => body.chars().take(200).collect(),
    };
    InsightError::Api { status, message }
}

// ============================================================================
// Gemini Provider
// ============================================================================

/// Insight provider backed by the Gemini `generateContent` endpoint.
pub struct GeminiInsightProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiInsightProvider {
    /// Create a provider with an explicit key.
    ///
    /// `None` is accepted: the key is only checked when a request is made,
    /// so an unconfigured key surfaces as [`InsightError::MissingApiKey`] on
    /// first use rather than at startup.
    pub fn new(api_key: Option<String>) -> Result<Self, InsightError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| InsightError::Http(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: DEFAULT_GEMINI_URL.to_string(),
            api_key,
        })
    }

    /// Create a provider reading the key from `SEME_GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self, InsightError> {
        let api_key = std::env::var(ENV_GEMINI_API_KEY)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        Self::new(api_key)
    }

    fn request_url(&self, api_key: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, api_key
        )
    }
}

#[async_trait]
impl InsightProviderTrait for GeminiInsightProvider {
    /// POST /v1beta/models/gemini-2.5-flash:generateContent?key=API_KEY
    async fn generate_insights(
        &self,
        expenses: &[ExpenseSnapshot],
    ) -> Result<Vec<Insight>, InsightError> {
        let api_key = self.api_key.as_deref().ok_or(InsightError::MissingApiKey)?;
        let body = build_request_body(expenses)?;

        // The URL carries the API key, so neither it nor transport errors
        // holding it are ever logged verbatim.
        debug!(
            "[Gemini] POST models/{}:generateContent ({} expenses)",
            GEMINI_MODEL,
            expenses.len()
        );
        let response = self
            .client
            .post(self.request_url(api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| InsightError::Http(e.without_url().to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| InsightError::Http(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| InsightError::InvalidResponse(e.to_string()))?;
        parse_insights(&extract_text(decoded)?)
    }
}

// ============================================================================
// Stub Provider for Testing
// ============================================================================

/// A canned provider for tests and offline development.
///
/// Records every snapshot batch it receives so tests can assert on call
/// counts and on exactly what left the process.
pub struct StubInsightProvider {
    insights: Vec<Insight>,
    fail: bool,
    /// Snapshot batches received, in call order.
    pub calls: Mutex<Vec<Vec<ExpenseSnapshot>>>,
}

impl StubInsightProvider {
    /// A stub answering every request with the given insights.
    pub fn with_insights(insights: Vec<Insight>) -> Self {
        Self {
            insights,
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A stub whose requests all fail with a provider error.
    pub fn failing() -> Self {
        Self {
            insights: Vec::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InsightProviderTrait for StubInsightProvider {
    async fn generate_insights(
        &self,
        expenses: &[ExpenseSnapshot],
    ) -> Result<Vec<Insight>, InsightError> {
        self.calls.lock().unwrap().push(expenses.to_vec());
        if self.fail {
            return Err(InsightError::Api {
                status: 500,
                message: "stubbed failure".to_string(),
            });
        }
        Ok(self.insights.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
