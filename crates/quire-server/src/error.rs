use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use quire_gateway::GatewayError;
use quire_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    /// HTTP status and machine-readable code for this error.
    ///
    /// Authentication failures never reach here: the gateway records a
    /// failing hook as an absent user.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Gateway(GatewayError::NotFound(_)) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Gateway(GatewayError::Store(StoreError::InvalidName { .. })) => {
                (StatusCode::BAD_REQUEST, "invalid_name")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = match &self {
            Self::Gateway(GatewayError::NotFound(id)) => json!({"error": code, "id": id}),
            _ => json!({"error": code, "message": self.to_string()}),
        };
        (status, Json(body)).into_response()
    }
}
