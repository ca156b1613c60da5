//! Reading the multipart upload form.

use actix_multipart::Multipart;
use extrato_core::models::config::ServerConfig;
use extrato_core::{Layout, StatementFile};
use futures_util::TryStreamExt as _;
use tracing::debug;

use crate::error::WebError;

/// Form field carrying the layout slug or label.
pub const LAYOUT_FIELD: &str = "layout";
/// Form field carrying the PDF files.
pub const FILES_FIELD: &str = "files";
/// Size limit for parts that are not files.
pub const MAX_FIELD_SIZE: usize = 1024;

/// A parsed upload: one layout for the whole batch and its files in order.
#[derive(Debug)]
pub struct UploadBatch {
    pub layout: Layout,
    pub files: Vec<StatementFile>,
}

/// Drain the multipart stream.
///
/// Falls back to `default_layout` when the form has no layout field. Empty
/// file parts (an untouched file input) are skipped. File parts are capped at
/// `max_file_size`, other parts at [`MAX_FIELD_SIZE`], and the whole stream at
/// `max_request_size`.
pub async fn read_upload(
    mut payload: Multipart,
    default_layout: Layout,
    limits: &ServerConfig,
) -> Result<UploadBatch, WebError> {
    let mut layout = None;
    let mut files = Vec::new();
    let mut received = 0usize;

    while let Some(mut field) = payload.try_next().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        let limit = if file_name.is_some() {
            limits.max_file_size
        } else {
            MAX_FIELD_SIZE
        };

        let mut data = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            received += chunk.len();
            if received > limits.max_request_size {
                return Err(WebError::TooLarge {
                    name: "upload".to_string(),
                    limit: limits.max_request_size,
                });
            }
            if data.len() + chunk.len() > limit {
                return Err(WebError::TooLarge {
                    name: file_name.unwrap_or(name),
                    limit,
                });
            }
            data.extend_from_slice(&chunk);
        }

        match (name.as_str(), file_name) {
            (LAYOUT_FIELD, _) => {
                let value = String::from_utf8_lossy(&data);
                layout = Some(value.parse::<Layout>()?);
            }
            (FILES_FIELD, Some(file_name)) if !file_name.is_empty() && !data.is_empty() => {
                debug!("Received {} ({} bytes)", file_name, data.len());
                files.push(StatementFile::new(file_name, data));
            }
            (other, _) => debug!("Ignoring form field {:?}", other),
        }
    }

    if files.is_empty() {
        return Err(WebError::NoFiles);
    }

    Ok(UploadBatch {
        layout: layout.unwrap_or(default_layout),
        files,
    })
}
