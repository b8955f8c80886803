//! Core error types for the SemeSmart application.
//!
//! This module defines store-agnostic error types. Backend-specific errors
//! (from the Firebase REST gateways, the device file store, etc.) are
//! converted to these types by the gateway crates.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the family-finance core.
///
/// This enum represents all possible errors that can occur in the
/// application. Backend-specific errors are wrapped in string form to keep
/// this type transport-agnostic.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Errors raised by the identity provider.
///
/// Each known provider code maps to one variant; [`AuthError::user_message`]
/// carries the product's fixed pt-BR copy for it. Codes the product does not
/// special-case land in `Provider` with the raw message preserved.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Wrong e-mail/password pair, or the account does not exist.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Registration attempted with an e-mail that already has an account.
    #[error("E-mail already registered")]
    EmailInUse,

    /// Password rejected by the provider's strength policy.
    #[error("Password too weak")]
    WeakPassword,

    /// The user abandoned the federated sign-in flow.
    #[error("Federated sign-in cancelled")]
    FederatedCancelled,

    /// The federated provider is not enabled for this project.
    #[error("Federated sign-in not enabled")]
    FederatedDisabled,

    /// The e-mail already has an account under a different sign-in method.
    #[error("Account exists with a different credential")]
    AccountConflict,

    /// The refresh token is expired or revoked; the session must restart.
    #[error("Session expired")]
    SessionExpired,

    /// Any other provider error, with the provider's code and message.
    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },
}

impl AuthError {
    /// User-facing message in the product locale (pt-BR).
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AuthError::EmailInUse => "Este e-mail já está cadastrado.".to_string(),
            AuthError::WeakPassword => "A senha deve ter pelo menos 6 caracteres.".to_string(),
            AuthError::FederatedCancelled => "Login com Google cancelado pelo usuário.".to_string(),
            AuthError::FederatedDisabled => {
                "Login com Google não está habilitado. Verifique as configurações do Firebase."
                    .to_string()
            }
            AuthError::AccountConflict => {
                "Já existe uma conta com este e-mail usando outro método de login.".to_string()
            }
            AuthError::SessionExpired => "Sua sessão expirou. Entre novamente.".to_string(),
            AuthError::Provider { message, .. } => {
                format!("Ocorreu um erro no Firebase: {}", message)
            }
        }
    }
}

/// Store-agnostic error type for document-store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested document was not found.
    #[error("Document not found: {0}")]
    NotFound(String),

    /// A create hit an already-existing document.
    #[error("Document already exists: {0}")]
    AlreadyExists(String),

    /// A conditional write lost against a newer document revision.
    #[error("Document revision conflict: {0}")]
    RevisionConflict(String),

    /// The store rejected the caller's credentials.
    #[error("Store rejected credentials: {0}")]
    Unauthorized(String),

    /// The store answered with an error payload.
    #[error("Store API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reaching the store.
    #[error("Store request failed: {0}")]
    Http(String),

    /// The stored document could not be decoded.
    #[error("Failed to decode stored document: {0}")]
    Deserialization(String),

    /// The document could not be encoded for storage.
    #[error("Failed to encode document: {0}")]
    Serialization(String),

    /// Local device-store I/O failure.
    #[error("Device store I/O failed: {0}")]
    Io(String),
}

/// Validation errors for user input, raised before any network call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Card last4 must be exactly four digits, got '{0}'")]
    InvalidCardDigits(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("No record with id '{0}' in {1}")]
    UnknownId(String, &'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<chrono::ParseError> for Error {
    fn from(err: chrono::ParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Store(StoreError::Deserialization(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Store(StoreError::Io(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
