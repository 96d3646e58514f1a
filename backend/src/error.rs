use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::inference::classifier::ClassifierError;
use crate::llm::client::LlmError;

/// Request-level error taxonomy. Model-load failures are not represented here;
/// they abort startup before the server binds.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Inference error: {0}")]
    Inference(#[from] ClassifierError),
    #[error("Upstream LLM error: {0}")]
    Upstream(#[from] LlmError),
    #[error("Invalid request: {0}")]
    Validation(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Decode(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Inference(_) | ApiError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_failures_are_client_errors() {
        let err = ApiError::from(image::load_from_memory(b"junk").unwrap_err());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_bad_gateway() {
        let err = ApiError::Upstream(LlmError::MalformedResponse("no choices".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn error_bodies_are_json() {
        let err = ApiError::Validation("missing required `image` field".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
