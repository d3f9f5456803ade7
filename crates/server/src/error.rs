use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use reimburse_ocr::ExtractionError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Extraction(ExtractionError::MalformedToken { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "Extraction request rejected");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
