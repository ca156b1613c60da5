//! HTTP handler functions.

use actix_multipart::Multipart;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use extrato_core::{to_xlsx, BatchProcessor, ConsolidatedTable, XLSX_MIME};
use tracing::info;

use crate::error::WebError;
use crate::models::{ApiHealth, ApiProcessResponse};
use crate::page;
use crate::upload::{read_upload, UploadBatch};
use crate::AppState;

/// `GET /`
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::upload_form(state.config.processing.default_layout))
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /process`
///
/// Processes the uploaded files and renders the results page.
pub async fn process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, WebError> {
    let (batch, table) = upload_and_process(&state, payload).await?;
    let xlsx = to_xlsx(&table, &state.config.export)?;
    let file_name = state.config.export.file_name(batch.layout);

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page::results(batch.layout, &table, &xlsx, &file_name)))
}

/// `POST /api/process`
///
/// Processes the uploaded files and returns records plus aggregates.
pub async fn api_process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, WebError> {
    let (batch, table) = upload_and_process(&state, payload).await?;
    Ok(HttpResponse::Ok().json(ApiProcessResponse::new(batch.layout, table)))
}

/// `POST /api/export`
///
/// Processes the uploaded files and returns the workbook as an attachment.
pub async fn api_export(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, WebError> {
    let (batch, table) = upload_and_process(&state, payload).await?;
    let xlsx = to_xlsx(&table, &state.config.export)?;
    let file_name = state.config.export.file_name(batch.layout);

    Ok(HttpResponse::Ok()
        .content_type(XLSX_MIME)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file_name)],
        })
        .body(xlsx))
}

async fn upload_and_process(
    state: &web::Data<AppState>,
    payload: Multipart,
) -> Result<(UploadBatch, ConsolidatedTable), WebError> {
    let mut batch = read_upload(
        payload,
        state.config.processing.default_layout,
        &state.config.server,
    )
    .await?;

    info!("Processing {} files as {}", batch.files.len(), batch.layout);

    let files = std::mem::take(&mut batch.files);
    let layout = batch.layout;
    let state = state.clone();

    let (table, files) = web::block(move || {
        let mut shared = state.cache();
        let mut processor = BatchProcessor::new(layout);
        if let Some(cache) = shared.as_mut() {
            processor = processor.with_cache(cache);
        }
        let table = processor.run_with_progress(&files, |p| {
            info!("[{}/{}] {}{}", p.done, p.total, p.file_name, if p.cached { " (cached)" } else { "" });
        });
        (table, files)
    })
    .await
    .map_err(|e| WebError::Processing(e.to_string()))?;

    batch.files = files;
    Ok((batch, table))
}
