//! Firestore REST client for the per-user household document.
//!
//! One document per user under the `users` collection, read and replaced
//! whole. Every write is conditional: creates require the document to be
//! absent, replaces require the caller's revision (the document's
//! `updateTime`) to still be current.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;

use semesmart_core::errors::{Error, Result, StoreError};
use semesmart_core::households::{Household, HouseholdStoreTrait, Revision, StoredHousehold};
use semesmart_core::session::AuthenticatedUser;

use crate::config::FirebaseConfig;
use crate::error::map_firestore_error;
use crate::firestore::value::{decode_fields, encode_fields};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Firestore collection holding one document per user.
const USERS_COLLECTION: &str = "users";

/// A Firestore document envelope; `updateTime` doubles as the revision.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentResponse {
    #[serde(default)]
    fields: Option<serde_json::Value>,
    update_time: String,
}

/// REST client for the household document store.
#[derive(Debug, Clone)]
pub struct FirestoreClient {
    client: reqwest::Client,
    config: FirebaseConfig,
}

impl FirestoreClient {
    pub fn new(config: FirebaseConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Full REST URL of one user's document.
    fn document_url(&self, user_id: &str) -> String {
        format!(
            "{}/projects/{}/databases/(default)/documents/{}/{}",
            self.config.firestore_url, self.config.project_id, USERS_COLLECTION, user_id
        )
    }

    fn headers(&self, user: &AuthenticatedUser) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = HeaderValue::from_str(&format!("Bearer {}", user.id_token)).map_err(
            |_| Error::Store(StoreError::Unauthorized("invalid id token format".to_string())),
        )?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    fn encode_document(household: &Household) -> Result<serde_json::Value> {
        let document = serde_json::to_value(household)
            .map_err(|e| Error::Store(StoreError::Serialization(e.to_string())))?;
        Ok(serde_json::json!({ "fields": encode_fields(&document)? }))
    }

    fn decode_document(response: DocumentResponse) -> Result<StoredHousehold> {
        let fields = response.fields.unwrap_or_else(|| serde_json::json!({}));
        let document = decode_fields(&fields)?;
        let household: Household = serde_json::from_value(document)
            .map_err(|e| Error::Store(StoreError::Deserialization(e.to_string())))?;
        Ok(StoredHousehold {
            household,
            revision: Revision::new(response.update_time),
        })
    }

    async fn parse_response(response: reqwest::Response) -> Result<DocumentResponse> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Store(StoreError::Http(e.to_string())))?;

        if !status.is_success() {
            return Err(map_firestore_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to deserialize Firestore response: {}", e);
            Error::Store(StoreError::Deserialization(e.to_string()))
        })
    }

    /// PATCH the whole document under the given precondition query.
    async fn write(
        &self,
        user: &AuthenticatedUser,
        household: &Household,
        precondition: &str,
    ) -> Result<StoredHousehold> {
        let url = format!("{}?{}", self.document_url(&user.user_id), precondition);

        let response = self
            .client
            .patch(&url)
            .headers(self.headers(user)?)
            .json(&Self::encode_document(household)?)
            .send()
            .await
            .map_err(|e| Error::Store(StoreError::Http(e.to_string())))?;

        let document = Self::parse_response(response).await?;
        Self::decode_document(document)
    }
}

#[async_trait]
impl HouseholdStoreTrait for FirestoreClient {
    /// GET /v1/projects/{project}/databases/(default)/documents/users/{uid}
    async fn load(&self, user: &AuthenticatedUser) -> Result<Option<StoredHousehold>> {
        let url = self.document_url(&user.user_id);
        debug!("[Firestore] GET users/{}", user.user_id);

        let response = self
            .client
            .get(&url)
            .headers(self.headers(user)?)
            .send()
            .await
            .map_err(|e| Error::Store(StoreError::Http(e.to_string())))?;

        match Self::parse_response(response).await {
            Ok(document) => Ok(Some(Self::decode_document(document)?)),
            // A user that never wrote a document is not an error.
            Err(Error::Store(StoreError::NotFound(_))) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// PATCH .../users/{uid}?currentDocument.exists=false
    async fn create(
        &self,
        user: &AuthenticatedUser,
        household: &Household,
    ) -> Result<StoredHousehold> {
        debug!("[Firestore] create users/{}", user.user_id);
        self.write(user, household, "currentDocument.exists=false")
            .await
    }

    /// PATCH .../users/{uid}?currentDocument.updateTime={revision}
    async fn replace(
        &self,
        user: &AuthenticatedUser,
        household: &Household,
        expected: &Revision,
    ) -> Result<StoredHousehold> {
        debug!(
            "[Firestore] replace users/{} at revision {}",
            user.user_id, expected
        );
        let precondition = format!(
            "currentDocument.updateTime={}",
            urlencoding::encode(expected.as_str())
        );
        self.write(user, household, &precondition).await
    }
}
