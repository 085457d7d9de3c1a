use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fareday_core::ValidationError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string(), "code": err.code() }),
            ),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
