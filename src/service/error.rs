use crate::errors::AppError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Auth | AppError::WrongPassword => StatusCode::UNAUTHORIZED,
            AppError::EmptyLog => StatusCode::CONFLICT,
            AppError::InvalidTimestamp(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": "error",
            "message": self.user_message(),
        }));
        (status, body).into_response()
    }
}
