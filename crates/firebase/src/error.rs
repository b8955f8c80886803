//! Google REST error envelope parsing.
//!
//! Both the Identity Toolkit and Firestore answer failures with
//! `{"error": {"code": 400, "message": "...", "status": "..."}}`. The
//! identity endpoints carry a stable error code in `message`
//! ("EMAIL_EXISTS", "WEAK_PASSWORD : ..."), Firestore carries the gRPC
//! status name in `status` ("FAILED_PRECONDITION", "NOT_FOUND"). This
//! module maps both shapes onto the core error taxonomy.

use reqwest::StatusCode;
use serde::Deserialize;

use semesmart_core::errors::{AuthError, Error, StoreError};

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Maps a failed identity-endpoint response onto the auth taxonomy.
pub(crate) fn map_identity_error(status: StatusCode, body: &str) -> Error {
    let Some(err) = parse_envelope(body) else {
        return Error::Store(StoreError::Api {
            status: status.as_u16(),
            message: truncate(body),
        });
    };

    // "WEAK_PASSWORD : Password should be at least 6 characters" carries
    // detail after the code.
    let code = err
        .message
        .split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let auth = match code.as_str() {
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
            AuthError::InvalidCredentials
        }
        "EMAIL_EXISTS" => AuthError::EmailInUse,
        "WEAK_PASSWORD" => AuthError::WeakPassword,
        "OPERATION_NOT_ALLOWED" => AuthError::FederatedDisabled,
        "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" => AuthError::SessionExpired,
        _ => AuthError::Provider {
            code,
            message: err.message,
        },
    };
    Error::Auth(auth)
}

/// Maps a failed Firestore response onto the store taxonomy.
pub(crate) fn map_firestore_error(status: StatusCode, body: &str) -> Error {
    let Some(err) = parse_envelope(body) else {
        return Error::Store(StoreError::Api {
            status: status.as_u16(),
            message: truncate(body),
        });
    };

    let store = match err.status.as_deref() {
        Some("NOT_FOUND") => StoreError::NotFound(err.message),
        Some("ALREADY_EXISTS") => StoreError::AlreadyExists(err.message),
        Some("FAILED_PRECONDITION") => StoreError::RevisionConflict(err.message),
        Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED") => {
            StoreError::Unauthorized(err.message)
        }
        _ => StoreError::Api {
            status: status.as_u16(),
            message: err.message,
        },
    };
    Error::Store(store)
}

fn parse_envelope(body: &str) -> Option<ApiErrorBody> {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .map(|r| r.error)
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}
