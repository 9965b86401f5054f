use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RappError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("PMS rejected {resource} request with status {status}")]
    UnexpectedStatus { resource: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

impl RappError {
    /// 上游 PMS 造成的錯誤（連線失敗或非 2xx）
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RappError::ApiError(_) | RappError::UnexpectedStatus { .. }
        )
    }

    pub fn is_config(&self) -> bool {
        matches!(self, RappError::InvalidConfigValueError { .. })
    }
}

impl IntoResponse for RappError {
    fn into_response(self) -> Response {
        let status = if self.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        tracing::warn!("❌ Request failed: {}", self);

        let body = serde_json::json!({ "ok": false, "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RappError>;
