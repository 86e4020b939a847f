use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog::CatalogError;
use folio::ConfigLoadError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid image id: {0}")]
    InvalidId(String),

    #[error("Not found: {0}")]
    ResourceNotFound(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) | ServerError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ServerError::ResourceNotFound(_) | ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Catalog(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::InvalidId(_) => "INVALID_ID",
            ServerError::ResourceNotFound(_) | ServerError::NotFound => "NOT_FOUND",
            ServerError::Catalog(_) => "CATALOG_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<CatalogError> for ServerError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidId(raw) => ServerError::InvalidId(raw),
            CatalogError::NotFound(id) => ServerError::ResourceNotFound(format!("image {id}")),
            other => ServerError::Catalog(other.to_string()),
        }
    }
}

impl From<ConfigLoadError> for ServerError {
    fn from(err: ConfigLoadError) -> Self {
        ServerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_http_status() {
        let invalid: ServerError = CatalogError::InvalidId("xyz".into()).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.error_code(), "INVALID_ID");

        let missing: ServerError = CatalogError::NotFound("abc".into()).into();
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.error_code(), "NOT_FOUND");

        let storage: ServerError = CatalogError::Storage("disk gone".into()).into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(storage.to_string().contains("disk gone"));
    }

    #[test]
    fn every_variant_has_a_code() {
        let cases = [
            (ServerError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (ServerError::InvalidId("x".into()), StatusCode::BAD_REQUEST, "INVALID_ID"),
            (ServerError::ResourceNotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (ServerError::Catalog("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "CATALOG_ERROR"),
            (ServerError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            (ServerError::NotFound, StatusCode::NOT_FOUND, "NOT_FOUND"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn config_errors_are_internal() {
        let err: ServerError = ConfigLoadError::Validation("bad".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
