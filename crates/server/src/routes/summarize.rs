use actix_multipart::{Field, Multipart};
use actix_web::dev::UrlEncoded;
use actix_web::error::UrlencodedError;
use actix_web::{post, web, HttpMessage, HttpRequest, HttpResponse};
use docsum_common::DocsumError;
use docsum_extract::{detect_kind, extract_text_blocking};
use futures_util::StreamExt;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::SummarizeResponse;

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Uploaded file part
#[derive(Debug)]
struct UploadedFile {
    filename: String,
    bytes: Vec<u8>,
}

/// Fields of a summarize form
#[derive(Debug, Default)]
struct SummarizeForm {
    text: Option<String>,
    file: Option<UploadedFile>,
}

/// URL-encoded summarize form; only free text can be sent this way
#[derive(Debug, Deserialize)]
struct TextForm {
    #[serde(default)]
    text: Option<String>,
}

/// Read a field body, enforcing the shared upload budget
async fn read_field(field: &mut Field, received: &mut usize, limit: usize) -> Result<Vec<u8>, DocsumError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| DocsumError::invalid_input(format!("Malformed upload: {}", e)))?;
        *received += chunk.len();
        if *received > limit {
            return Err(DocsumError::PayloadTooLarge(limit));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn read_form(payload: &mut Multipart, limit: usize) -> Result<SummarizeForm, DocsumError> {
    let mut form = SummarizeForm::default();
    let mut received = 0usize;

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| DocsumError::invalid_input(format!("Malformed upload: {}", e)))?;
        let content_disposition = field.content_disposition().clone();

        match content_disposition.get_name() {
            Some("text") => {
                let data = read_field(&mut field, &mut received, limit).await?;
                form.text = Some(String::from_utf8_lossy(&data).into_owned());
            }
            Some("file") => {
                let filename = content_disposition.get_filename().unwrap_or_default().to_string();
                let bytes = read_field(&mut field, &mut received, limit).await?;
                // Browsers send an empty part when no file was chosen
                if !(filename.is_empty() && bytes.is_empty()) {
                    form.file = Some(UploadedFile { filename, bytes });
                }
            }
            other => {
                debug!("Ignoring form field {:?}", other);
                read_field(&mut field, &mut received, limit).await?;
            }
        }
    }

    Ok(form)
}

async fn read_urlencoded(
    req: &HttpRequest,
    mut payload: actix_web::dev::Payload,
    limit: usize,
) -> Result<SummarizeForm, DocsumError> {
    let form = UrlEncoded::<TextForm>::new(req, &mut payload)
        .limit(limit)
        .await
        .map_err(|e| match e {
            UrlencodedError::Overflow { .. } => DocsumError::PayloadTooLarge(limit),
            other => DocsumError::invalid_input(format!("Malformed form: {}", other)),
        })?;

    Ok(SummarizeForm {
        text: form.text,
        file: None,
    })
}

/// Pick the document text: an uploaded file wins over the text field
async fn resolve_text(form: SummarizeForm) -> Result<String, DocsumError> {
    if let Some(file) = form.file {
        let kind = detect_kind(&file.filename)?;
        info!("Extracting uploaded {} '{}' ({} bytes)", kind, file.filename, file.bytes.len());
        return extract_text_blocking(kind, file.bytes).await;
    }

    form.text
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DocsumError::invalid_input("No text or file provided"))
}

/// Summarize free text or an uploaded PDF/DOCX/TXT
///
/// Accepts multipart forms (text and/or file) and URL-encoded forms (text only).
#[post("/summarize")]
pub async fn summarize(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let limit = state.config.max_upload_bytes;
    let form = if req.content_type().eq_ignore_ascii_case(FORM_URLENCODED) {
        read_urlencoded(&req, payload.into_inner(), limit).await?
    } else {
        let mut multipart = Multipart::new(req.headers(), payload);
        read_form(&mut multipart, limit).await?
    };
    let text = resolve_text(form).await?;

    let summary = state.summarizer.summarize(&text).await?;
    info!("Summary produced - Length: {} chars", summary.chars().count());

    Ok(HttpResponse::Ok().json(SummarizeResponse { summary }))
}
