use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use axura_shared::{AxuraError, UserId};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// A JSON body axum refused to extract. Keeps axum's status
    /// (400, 415 or 422).
    #[error("Invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<AxuraError> for ServerError {
    fn from(err: AxuraError) -> Self {
        match err {
            AxuraError::UserNotFound(id) => ServerError::UserNotFound(id),
            other => ServerError::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::UserNotFound(_) => (StatusCode::NOT_FOUND, "User not found".to_string()),
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::InvalidBody { status, .. } => (*status, self.to_string()),
        };

        let body = serde_json::json!({
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
