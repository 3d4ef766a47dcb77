//! Async client for the backend revision endpoint.
//!
//! The backend owns archival of prior quote copies and the CRM/PDF glue;
//! this client only ships the payload.

use crate::commands::revision::RevisionOptions;
use crate::errors::{EngineError, Result};
use energen_core::version::metadata::QuoteVersionMetadata;
use energen_core::CalculationSnapshot;
use energen_core_types::{RequestId, Sensitive};
use serde::{Deserialize, Serialize};

/// Body for `POST /api/quote/create-revision`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRequest {
    /// The quote copy being replaced (superseded form for major bumps)
    pub current_quote: QuoteVersionMetadata,
    /// The newly created revision
    pub revision: QuoteVersionMetadata,
    pub options: RevisionOptions,
    /// The calculation state the revision was built from
    pub quote_data: CalculationSnapshot,
}

/// Backend response for a revision submission.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevisionResponse {
    pub success: bool,
    #[serde(default)]
    pub quote_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client for the quoting backend.
pub struct RevisionClient {
    base_url: String,
    /// Backend API token, redacted from all Debug/Display output
    token: Option<Sensitive<String>>,
    http: reqwest::Client,
}

impl RevisionClient {
    /// Client against the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Attach a bearer token for the backend.
    pub fn with_token(mut self, token: Sensitive<String>) -> Self {
        self.token = Some(token);
        self
    }

    /// Submit a revision to the backend.
    ///
    /// Each submission carries a fresh `x-request-id` so backend logs can
    /// be correlated with the caller's.
    ///
    /// # Errors
    ///
    /// - `Http` — transport failure
    /// - `Backend` — non-success status from the backend
    pub async fn create_revision(&self, request: &RevisionRequest) -> Result<RevisionResponse> {
        let url = format!(
            "{}/api/quote/create-revision",
            self.base_url.trim_end_matches('/')
        );
        let request_id = RequestId::new();
        let mut builder = self
            .http
            .post(&url)
            .header("x-request-id", request_id.as_str())
            .json(request);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.expose());
        }
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use energen_core::snapshot::builder::{build_snapshot, QuoteState};

    fn request() -> RevisionRequest {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let snapshot = build_snapshot(&QuoteState::default(), None);
        let meta = QuoteVersionMetadata::new_draft("a".repeat(64), now);
        RevisionRequest {
            current_quote: meta.clone(),
            revision: meta,
            options: RevisionOptions::default(),
            quote_data: snapshot,
        }
    }

    #[test]
    fn test_request_body_is_camel_case() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("currentQuote").is_some());
        assert!(json.get("quoteData").is_some());
        assert!(json.get("current_quote").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_surfaces_transport_error() {
        // Nothing listens on the discard port; the send must fail with a
        // transport error, not a panic or a silent success.
        let client = RevisionClient::new("http://127.0.0.1:9");
        let err = client.create_revision(&request()).await.unwrap_err();
        assert!(matches!(err, EngineError::Http(_)));
    }
}
