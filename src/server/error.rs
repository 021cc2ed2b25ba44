//! # API Errors
//!
//! Every failure a request can end in, and how it is rendered over HTTP.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::common::messages::ErrorResponse;
use crate::processing::StegoError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Image and message are required.")]
    MissingImageOrMessage,

    #[error("Image is required.")]
    MissingImage,

    #[error("Valid image file required.")]
    InvalidFile,

    #[error("Failed to read multipart data: {0}")]
    Multipart(String),

    /// The message cannot be embedded (multi-byte characters, marker bytes).
    #[error(transparent)]
    Payload(StegoError),

    #[error("Encoding failed.")]
    EncodingFailed,

    #[error("Decoding failed.")]
    DecodingFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::EncodingFailed | Self::DecodingFailed => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
