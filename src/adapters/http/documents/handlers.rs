//! HTTP handlers for document endpoints.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::ErrorResponse;
use crate::ports::{DocumentStore, DocumentStoreError, ExtractionError};

use super::dto::DocumentListResponse;

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD: &str = "pdf";

const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Clone)]
pub struct DocumentHandlers {
    store: Arc<dyn DocumentStore>,
    max_upload_bytes: u64,
}

impl DocumentHandlers {
    pub fn new(store: Arc<dyn DocumentStore>, max_upload_bytes: u64) -> Self {
        Self {
            store,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }
}

/// GET /api/documents - List knowledge documents
pub async fn list_documents(State(handlers): State<DocumentHandlers>) -> Response {
    match handlers.store.list().await {
        Ok(documents) => {
            (StatusCode::OK, Json(DocumentListResponse::from(documents))).into_response()
        }
        Err(e) => handle_store_error(e),
    }
}

/// POST /api/documents - Upload a PDF into the knowledge directory
pub async fn upload_document(
    State(handlers): State<DocumentHandlers>,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return multipart_error(err.status(), err.body_text()),
        };

        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        if field.content_type() != Some(PDF_CONTENT_TYPE) {
            return (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(ErrorResponse::unsupported_media_type(
                    "Only PDF files are accepted",
                )),
            )
                .into_response();
        }

        let original_name = upload_name(field.file_name());
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => return multipart_error(err.status(), err.body_text()),
        };

        if bytes.len() as u64 > handlers.max_upload_bytes {
            return handle_store_error(DocumentStoreError::TooLarge {
                size: bytes.len() as u64,
                max: handlers.max_upload_bytes,
            });
        }

        return match handlers.store.store(bytes.to_vec(), &original_name).await {
            Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
            Err(e) => handle_store_error(e),
        };
    }

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request("No file uploaded")),
    )
        .into_response()
}

/// Upload name with a `.pdf` suffix guaranteed.
fn upload_name(file_name: Option<&str>) -> String {
    let name = file_name
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("document.pdf");

    if name.to_ascii_lowercase().ends_with(".pdf") {
        name.to_string()
    } else {
        format!("{}.pdf", name)
    }
}

fn multipart_error(status: StatusCode, message: String) -> Response {
    let body = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorResponse::payload_too_large(message)
    } else {
        ErrorResponse::bad_request(message)
    };
    (status, Json(body)).into_response()
}

fn handle_store_error(error: DocumentStoreError) -> Response {
    match error {
        DocumentStoreError::TooLarge { .. } => (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ErrorResponse::payload_too_large(error.to_string())),
        )
            .into_response(),
        DocumentStoreError::Empty => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        DocumentStoreError::Extraction(ExtractionError::Unsupported(_)) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Json(ErrorResponse::unsupported_media_type(error.to_string())),
        )
            .into_response(),
        DocumentStoreError::NoText(_) | DocumentStoreError::Extraction(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable(error.to_string())),
        )
            .into_response(),
        DocumentStoreError::Io(err) => {
            tracing::error!(error = %err, "Document storage failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Document storage failed")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_name_appends_pdf_suffix() {
        assert_eq!(upload_name(Some("laudo")), "laudo.pdf");
        assert_eq!(upload_name(Some("Laudo.PDF")), "Laudo.PDF");
        assert_eq!(upload_name(None), "document.pdf");
        assert_eq!(upload_name(Some("  ")), "document.pdf");
    }

    #[test]
    fn store_errors_map_to_statuses() {
        let too_large = DocumentStoreError::TooLarge { size: 11, max: 10 };
        assert_eq!(handle_store_error(too_large).status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            handle_store_error(DocumentStoreError::NoText("a.pdf".to_string())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            handle_store_error(DocumentStoreError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
