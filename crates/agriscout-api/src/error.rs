use agriscout_core::error::AgriError;
use agriscout_draw::DrawError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self { status: StatusCode::NOT_FOUND, message: message.into(), details: None }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self { status: StatusCode::CONFLICT, message: message.into(), details: None }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self { status: StatusCode::UNPROCESSABLE_ENTITY, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { success: false, error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<AgriError> for ApiError {
    fn from(err: AgriError) -> Self {
        match &err {
            AgriError::LandNotFound { .. } | AgriError::PartitionNotFound { .. } => {
                Self::not_found(err.to_string())
            }
            AgriError::InvalidRing { .. } => {
                Self::unprocessable("Invalid ring").with_details(err.to_string())
            }
            AgriError::Upstream { .. } => Self {
                status: StatusCode::BAD_GATEWAY,
                message: "Upstream service failed".to_string(),
                details: Some(err.to_string()),
            },
            _ => Self::internal("Internal error").with_details(err.to_string()),
        }
    }
}

impl From<DrawError> for ApiError {
    fn from(err: DrawError) -> Self {
        match err {
            DrawError::Store(inner) => inner.into(),
            other => Self::conflict(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agriscout_core::models::Phase;

    #[test]
    fn test_not_found_mapping() {
        let err: ApiError = AgriError::LandNotFound { id: "land-x".to_string() }.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert!(err.message.contains("land-x"));
    }

    #[test]
    fn test_draw_error_mapping() {
        let err: ApiError = DrawError::PhaseDoesNotAllowDrawing { phase: Phase::Dashboard }.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert!(err.message.contains("dashboard"));

        let err: ApiError =
            DrawError::Store(AgriError::PartitionNotFound { id: "p".to_string() }).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upstream_is_bad_gateway() {
        let err: ApiError = AgriError::upstream("geocoder", "timeout").into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.details.as_deref(), Some("Upstream service geocoder failed: timeout"));
    }
}
