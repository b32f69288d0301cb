/// HTTP/JSON client for the remote recommendation service
///
/// Endpoints:
/// 1. Stats: GET /api/stats
/// 2. Browse: GET /api/dramas
/// 3. Search: GET /api/search?q=<query>
/// 4. Recommend: POST /api/recommend with { "title": ... }
use std::time::Duration;

use reqwest::{Client as HttpClient, Response};
use serde::de::DeserializeOwned;

use crate::{
    error::{BackendError, BackendResult},
    models::{Drama, RecommendRequest, RecommendationResult, RemoteErrorBody, Stats},
    services::providers::RecommendationBackend,
};

const DEFAULT_REJECTION_MESSAGE: &str = "Failed to get recommendations";

#[derive(Clone)]
pub struct HttpBackend {
    http_client: HttpClient,
    api_url: String,
}

impl HttpBackend {
    /// Creates a client whose every call is bounded by `request_timeout`
    pub fn new(api_url: impl Into<String>, request_timeout: Duration) -> BackendResult<Self> {
        let http_client = HttpClient::builder().timeout(request_timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Decodes a success body, or turns a non-success status into an error
    async fn decode<T: DeserializeOwned>(response: Response) -> BackendResult<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

/// Interprets a failed recommend response
///
/// A JSON body is a structured rejection; anything else means the service
/// could not be used for this call.
fn rejection_from_body(status: u16, body: String) -> BackendError {
    match serde_json::from_str::<RemoteErrorBody>(&body) {
        Ok(parsed) => BackendError::Rejected {
            message: parsed
                .error
                .unwrap_or_else(|| DEFAULT_REJECTION_MESSAGE.to_string()),
            suggestions: parsed.suggestions,
        },
        Err(_) => BackendError::Status { status, body },
    }
}

#[async_trait::async_trait]
impl RecommendationBackend for HttpBackend {
    async fn fetch_stats(&self) -> BackendResult<Stats> {
        let response = self.http_client.get(self.url("/api/stats")).send().await?;
        Self::decode(response).await
    }

    async fn list_dramas(&self) -> BackendResult<Vec<Drama>> {
        let response = self.http_client.get(self.url("/api/dramas")).send().await?;
        let dramas: Vec<Drama> = Self::decode(response).await?;

        tracing::debug!(results = dramas.len(), provider = self.name(), "Browse list fetched");

        Ok(dramas)
    }

    async fn search(&self, query: &str) -> BackendResult<Vec<Drama>> {
        let response = self
            .http_client
            .get(self.url("/api/search"))
            .query(&[("q", query)])
            .send()
            .await?;
        let dramas: Vec<Drama> = Self::decode(response).await?;

        tracing::info!(
            query = %query,
            results = dramas.len(),
            provider = self.name(),
            "Title search completed"
        );

        Ok(dramas)
    }

    async fn recommend(&self, title: &str) -> BackendResult<RecommendationResult> {
        let response = self
            .http_client
            .post(self.url("/api/recommend"))
            .json(&RecommendRequest {
                title: title.to_string(),
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await?;
            return Err(rejection_from_body(status, body));
        }

        let result: RecommendationResult = response.json().await?;

        tracing::info!(
            title = %title,
            results = result.recommendations.len(),
            provider = self.name(),
            "Recommendations fetched"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
