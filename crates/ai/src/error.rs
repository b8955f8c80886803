//! Insight gateway error types.

use thiserror::Error;

/// Insight gateway errors.
#[derive(Debug, Error)]
pub enum InsightError {
    /// No Gemini API key is configured.
    #[error("Missing Gemini API key")]
    MissingApiKey,

    /// Transport failure talking to the provider.
    #[error("Network error: {0}")]
    Http(String),

    /// The provider answered with an error status.
    #[error("Provider error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Snapshot serialization failed while building the prompt.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The provider answered but the payload did not match the agreed shape.
    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    /// The provider returned no candidates or no text part.
    #[error("Empty provider response")]
    EmptyResponse,
}

impl InsightError {
    /// The pt-BR copy screens show for this failure.
    ///
    /// Only the missing-key case gets dedicated wording; every other failure
    /// is transient from the user's point of view and shares the retry copy.
    pub fn user_message(&self) -> &'static str {
        match self {
            InsightError::MissingApiKey => "A chave da API para a IA não foi configurada.",
            _ => "Não foi possível carregar as sugestões da IA. Tente novamente mais tarde.",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
