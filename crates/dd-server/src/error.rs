//! API error type and its HTTP mapping

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// API-layer error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 500 - the report could not be produced
    #[error("Error generating due diligence: {0}")]
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<dd_report::ReportError> for ApiError {
    fn from(err: dd_report::ReportError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::Internal("No valid JSON found in the response".into());
        assert_eq!(
            err.to_string(),
            "Error generating due diligence: No valid JSON found in the response"
        );
    }

    #[test]
    fn test_status_code() {
        let response = ApiError::Internal("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
