//! Errors returned by the HTTP handlers.

use actix_multipart::MultipartError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use extrato_core::{ExportError, UnknownLayout};
use thiserror::Error;

/// Request-level failures. Per-file failures never end up here; they become
/// `Erro:` rows in the table.
#[derive(Error, Debug)]
pub enum WebError {
    /// Malformed multipart body.
    #[error("invalid upload: {0}")]
    Multipart(#[from] MultipartError),

    /// Layout field names no known layout.
    #[error(transparent)]
    Layout(#[from] UnknownLayout),

    /// The upload carried no files.
    #[error("no PDF files were uploaded")]
    NoFiles,

    /// A file exceeded the configured size limit.
    #[error("{name} exceeds the {limit} byte upload limit")]
    TooLarge { name: String, limit: usize },

    /// The batch could not be scheduled.
    #[error("processing failed: {0}")]
    Processing(String),

    /// The workbook could not be written.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebError::Multipart(_) | WebError::Layout(_) | WebError::NoFiles => {
                StatusCode::BAD_REQUEST
            }
            WebError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            WebError::Processing(_) | WebError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
