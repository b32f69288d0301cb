use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Number of remote suggestions shown to the user
const MAX_SUGGESTIONS: usize = 3;

/// Failures of a call to the remote recommendation service
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    /// No usable response: connection refused, timeout, malformed body
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response without a structured error body
    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered and reported an error of its own
    #[error("Backend rejected request: {message}")]
    Rejected {
        message: String,
        suggestions: Vec<String>,
    },
}

impl BackendError {
    /// Whether the failure means "could not reach the service"
    pub fn is_transport(&self) -> bool {
        !matches!(self, BackendError::Rejected { .. })
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors surfaced to the user by a recommendation request
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Reported by the remote service, possibly with alternative titles
    #[error("{}", format_with_suggestions(.message, .suggestions))]
    NotFound {
        message: String,
        suggestions: Vec<String>,
    },

    /// Selected title is absent from the local catalog
    #[error("Drama '{title}' not found in the local catalog")]
    LocalNotFound { title: String },
}

impl RecommendError {
    /// Suggestions worth showing, at most three
    pub fn suggestions(&self) -> &[String] {
        match self {
            RecommendError::NotFound { suggestions, .. } => {
                &suggestions[..suggestions.len().min(MAX_SUGGESTIONS)]
            }
            RecommendError::LocalNotFound { .. } => &[],
        }
    }
}

impl From<BackendError> for RecommendError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Rejected {
                message,
                suggestions,
            } => RecommendError::NotFound {
                message,
                suggestions,
            },
            other => RecommendError::NotFound {
                message: other.to_string(),
                suggestions: Vec::new(),
            },
        }
    }
}

fn format_with_suggestions(message: &str, suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return message.to_string();
    }
    let shown: Vec<&str> = suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(String::as_str)
        .collect();
    format!("{}. Did you mean: {}?", message, shown.join(", "))
}

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Recommend(#[from] RecommendError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Recommend(err) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": err.to_string(),
                    "suggestions": err.suggestions(),
                }),
            ),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
