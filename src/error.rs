use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("AI 응답 처리 중 오류 발생: {0}")]
    Completion(String),

    #[error("AI 응답에서 JSON 형식을 찾을 수 없습니다.")]
    NoJsonFound,

    #[error("AI가 5개의 앱을 제공하지 않았습니다.")]
    WrongCount(usize),

    #[error("AI 응답 처리 중 오류 발생: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether the failure comes from the model breaking the suggestion contract
    /// rather than from the model API itself.
    pub fn is_malformed_output(&self) -> bool {
        matches!(
            self,
            AppError::NoJsonFound | AppError::WrongCount(_) | AppError::InvalidJson(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Recommendation failures travel in the body, not the status line.
            AppError::Completion(_)
            | AppError::NoJsonFound
            | AppError::WrongCount(_)
            | AppError::InvalidJson(_) => StatusCode::OK,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::HttpClient(_) | AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
