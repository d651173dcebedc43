use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gofontweb::AssetError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Asset '{0}' not found")]
    AssetNotFound(String),

    #[error("Asset error: {0}")]
    Asset(String),
}

impl From<AssetError> for ServiceError {
    fn from(err: AssetError) -> Self {
        match err {
            AssetError::NotFound(path) | AssetError::InvalidPath(path) => Self::AssetNotFound(path),
            AssetError::Io(message) => Self::Asset(message),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::AssetNotFound(_) => (StatusCode::NOT_FOUND, "AssetNotFound", self.to_string()),
            Self::Asset(_) => {
                tracing::error!("Internal error: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "InternalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
