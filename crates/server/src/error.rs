use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use docsum_common::DocsumError;
use std::fmt;
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// HTTP wrapper for `DocsumError`
#[derive(Debug)]
pub struct ApiError(pub DocsumError);

impl From<DocsumError> for ApiError {
    fn from(err: DocsumError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let body = if self.0.is_input_error() {
            warn!("Rejected request: {}", self.0);
            ErrorResponse {
                error: self.0.public_message(),
                details: None,
            }
        } else {
            error!("Summarization failed: {}", self.0);
            ErrorResponse {
                error: self.0.public_message(),
                details: Some(self.0.to_string()),
            }
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
