use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unified error type for the LAN chat application
#[derive(Error, Debug)]
pub enum ChatError {
    // Upload errors
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid multipart request: {0}")]
    InvalidMultipart(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for LAN chat operations
pub type Result<T> = std::result::Result<T, ChatError>;

impl ChatError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            ChatError::MissingFile | ChatError::InvalidMultipart(_) => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            ChatError::InvalidConfig(_) | ChatError::Io(_) | ChatError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

// Implement IntoResponse for HTTP error responses
impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}
