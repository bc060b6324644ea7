//! Document API Client
//!
//! Thin adapter over `reqwest` for the document backend. Every request goes
//! to the configured base URL with a JSON content type; authorized calls
//! take the caller's [`Session`] explicitly and send it as a bearer token.
//!
//! Errors are mapped into [`ApiError`] so views can decide between an inline
//! message, a toast, or a redirect without inspecting HTTP details. Nothing
//! is retried and no timeout beyond the transport default is applied.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::egui_app::config::Config;
use crate::egui_app::session::Session;
use crate::shared::{
    Document, DocumentPayload, ErrorDetail, LoginRequest, RegisterRequest, TokenResponse,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("request failed with status {status}")]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("not authorized")]
    Unauthorized { detail: Option<String> },

    #[error("not found")]
    NotFound { detail: Option<String> },

    #[error("failed to parse response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("not logged in")]
    NotAuthenticated,

    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request ended without a response")]
    Interrupted,
}

impl ApiError {
    /// Backend-provided message, if the error carried one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. }
            | ApiError::Unauthorized { detail }
            | ApiError::NotFound { detail } => detail.as_deref(),
            _ => None,
        }
    }

    /// The backend's message verbatim, or `fallback` when there is none
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. } | ApiError::NotAuthenticated)
    }
}

/// HTTP client bound to one backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(config.server_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> Result<RequestBuilder, ApiError> {
        let bearer = session.bearer().ok_or(ApiError::NotAuthenticated)?;
        Ok(builder.header(AUTHORIZATION, bearer))
    }

    /// `POST /login`
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        tracing::debug!(email = %request.email, "POST /login");
        let response = self
            .client
            .post(self.url("/login"))
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `POST /register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        tracing::debug!(email = %request.email, username = %request.username, "POST /register");
        let response = self
            .client
            .post(self.url("/register"))
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `GET /documents`
    pub async fn list_documents(&self, session: &Session) -> Result<Vec<Document>, ApiError> {
        let request = self.authorized(self.client.get(self.url("/documents")), session)?;
        let response = request.send().await.map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `GET /documents/search?q=`
    pub async fn search_documents(&self, session: &Session, query: &str) -> Result<Vec<Document>, ApiError> {
        let request = self
            .client
            .get(self.url("/documents/search"))
            .query(&[("q", query)]);
        let response = self
            .authorized(request, session)?
            .send()
            .await
            .map_err(ApiError::Network)?;
        decode(response).await
    }

    /// List or search depending on whether `query` has any content
    pub async fn fetch_documents(&self, session: &Session, query: &str) -> Result<Vec<Document>, ApiError> {
        if query.trim().is_empty() {
            self.list_documents(session).await
        } else {
            self.search_documents(session, query).await
        }
    }

    /// `GET /documents/{id}`; not every backend deployment exposes it
    pub async fn get_document(&self, session: &Session, id: i64) -> Result<Document, ApiError> {
        let request = self.authorized(self.client.get(self.url(&format!("/documents/{}", id))), session)?;
        let response = request.send().await.map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `POST /documents`
    pub async fn create_document(&self, session: &Session, payload: &DocumentPayload) -> Result<Document, ApiError> {
        let request = self.authorized(self.client.post(self.url("/documents")), session)?;
        let response = request.json(payload).send().await.map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `PUT /documents/{id}`
    pub async fn update_document(
        &self,
        session: &Session,
        id: i64,
        payload: &DocumentPayload,
    ) -> Result<Document, ApiError> {
        let request = self.authorized(self.client.put(self.url(&format!("/documents/{}", id))), session)?;
        let response = request.json(payload).send().await.map_err(ApiError::Network)?;
        decode(response).await
    }

    /// `DELETE /documents/{id}`; only the status matters
    pub async fn delete_document(&self, session: &Session, id: i64) -> Result<(), ApiError> {
        let request = self.authorized(self.client.delete(self.url(&format!("/documents/{}", id))), session)?;
        let response = request.send().await.map_err(ApiError::Network)?;
        check_status(response).await.map(|_| ())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorDetail>(&body)
        .ok()
        .and_then(|d| d.message().map(str::to_string));
    tracing::warn!(%status, detail = ?detail, "backend returned an error");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized { detail },
        StatusCode::NOT_FOUND => ApiError::NotFound { detail },
        _ => ApiError::Status { status, detail },
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::with_base_url("http://localhost:8000/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/documents"), "http://localhost:8000/documents");
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let error = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Incorrect password".to_string()),
        };
        assert_eq!(error.user_message("Login failed"), "Incorrect password");
        assert_eq!(
            ApiError::NotFound { detail: None }.user_message("Login failed"),
            "Login failed"
        );
        let missing = ApiError::NotFound {
            detail: Some("User not found".to_string()),
        };
        assert_eq!(missing.user_message("Login failed"), "User not found");
    }

    #[test]
    fn test_unauthorized_classification() {
        assert!(ApiError::NotAuthenticated.is_unauthorized());
        assert!(ApiError::Unauthorized { detail: None }.is_unauthorized());
        assert!(!ApiError::NotFound { detail: None }.is_unauthorized());
    }
}
