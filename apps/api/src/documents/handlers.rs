//! Axum route handlers for saved documents.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::session::SessionUser;
use crate::documents::store::{self, NewDocument};
use crate::documents::validation::{max_len, validate_document};
use crate::errors::AppError;
use crate::models::document::{DocumentData, DocumentRow, DocumentType};
use crate::render::builtin::DEFAULT_TEMPLATE_ID;
use crate::render::handlers::{render_blocking, resolve_template};
use crate::render::renderer::RenderMode;
use crate::state::AppState;

const MAX_TITLE: usize = 120;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDocumentRequest {
    pub title: Option<String>,
    pub template_id: Option<String>,
    pub data: DocumentData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: Uuid,
    pub document_type: String,
    pub title: String,
    pub template_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<DocumentRow> for DocumentSummary {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            document_type: row.document_type,
            title: row.title,
            template_id: row.template_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub template: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Explicit title, else "<name> <type>", else "Untitled <type>".
fn resolve_title(title: Option<&str>, data: &DocumentData) -> Result<String, AppError> {
    let label = data.document_type().label();
    let title = match title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_string(),
        None => {
            let name = data.personal_info().full_name.trim();
            if name.is_empty() {
                format!("Untitled {label}")
            } else {
                format!("{name} {label}")
            }
        }
    };
    max_len("title", &title, MAX_TITLE, "Title")?;
    Ok(title)
}

/// Validates the body and, if given, that the template exists.
async fn check_save_request(state: &AppState, req: &SaveDocumentRequest) -> Result<String, AppError> {
    validate_document(&req.data)?;
    if let Some(id) = req.template_id.as_deref() {
        resolve_template(state, id).await?;
    }
    resolve_title(req.title.as_deref(), &req.data)
}

fn to_json(data: &DocumentData) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(data).map_err(|e| AppError::Internal(e.into()))
}

/// Lowercase ASCII slug for download file names.
fn file_slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "document".to_string()
    } else {
        slug.to_string()
    }
}

/// A saved document keeps the type it was created with.
fn ensure_same_type(stored: &str, incoming: DocumentType) -> Result<(), AppError> {
    let stored_type = stored
        .parse::<DocumentType>()
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
    if stored_type != incoming {
        return Err(AppError::InvalidField {
            field: "data.documentType".to_string(),
            message: format!(
                "This document is a {} and cannot be saved as a {}",
                stored_type.label(),
                incoming.label()
            ),
        });
    }
    Ok(())
}

async fn load_owned(state: &AppState, id: Uuid, user: &SessionUser) -> Result<DocumentRow, AppError> {
    store::get_document(&state.db, id, user.id)
        .await
        .map_err(AppError::Internal)?
        .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/documents
pub async fn handle_create_document(
    State(state): State<AppState>,
    user: SessionUser,
    Json(req): Json<SaveDocumentRequest>,
) -> Result<(StatusCode, Json<DocumentRow>), AppError> {
    let title = check_save_request(&state, &req).await?;
    let data = to_json(&req.data)?;

    let row = store::insert_document(
        &state.db,
        NewDocument {
            user_id: user.id,
            document_type: req.data.document_type().as_str(),
            title: &title,
            template_id: req.template_id.as_deref(),
            data: &data,
        },
    )
    .await
    .map_err(AppError::Internal)?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    let rows = store::list_documents(&state.db, user.id)
        .await
        .map_err(AppError::Internal)?;
    Ok(Json(rows.into_iter().map(DocumentSummary::from).collect()))
}

/// GET /api/v1/documents/:id
pub async fn handle_get_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentRow>, AppError> {
    Ok(Json(load_owned(&state, id, &user).await?))
}

/// PUT /api/v1/documents/:id
///
/// Whole-document replace. The document type is fixed at creation.
pub async fn handle_update_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<Uuid>,
    Json(req): Json<SaveDocumentRequest>,
) -> Result<Json<DocumentRow>, AppError> {
    let existing = load_owned(&state, id, &user).await?;
    ensure_same_type(&existing.document_type, req.data.document_type())?;

    let title = check_save_request(&state, &req).await?;
    let data = to_json(&req.data)?;

    let row = store::replace_document(
        &state.db,
        id,
        user.id,
        &title,
        req.template_id.as_deref(),
        &data,
    )
    .await
    .map_err(AppError::Internal)?
    .ok_or_else(|| AppError::NotFound(format!("Document {id} not found")))?;

    info!("User {} saved document {id}", user.id);
    Ok(Json(row))
}

/// DELETE /api/v1/documents/:id
pub async fn handle_delete_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_document(&state.db, id, user.id)
        .await
        .map_err(AppError::Internal)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Document {id} not found")));
    }
    info!("User {} deleted document {id}", user.id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/documents/:id/export
///
/// Print-mode HTML as a download; the browser's print dialog turns it into a PDF.
pub async fn handle_export_document(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let row = load_owned(&state, id, &user).await?;
    let template_id = query
        .template
        .or(row.template_id.clone())
        .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string());
    let template = resolve_template(&state, &template_id).await?;

    let rendered = render_blocking(
        state.renderer.clone(),
        template.html,
        template.css,
        row.data,
        RenderMode::Print,
        row.title.clone(),
    )
    .await?;

    info!("Exported document {id} with template {template_id}");

    let disposition = format!("attachment; filename=\"{}.html\"", file_slug(&row.title));
    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        rendered.html,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::{PersonalInfo, ResumeData};

    fn resume(name: &str) -> DocumentData {
        DocumentData::Resume(ResumeData {
            personal_info: PersonalInfo {
                full_name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_resolve_title_explicit() {
        assert_eq!(resolve_title(Some("  My CV "), &resume("Ada")).unwrap(), "My CV");
    }

    #[test]
    fn test_resolve_title_from_name() {
        assert_eq!(resolve_title(None, &resume("Ada Lovelace")).unwrap(), "Ada Lovelace Resume");
        assert_eq!(resolve_title(Some(""), &resume("")).unwrap(), "Untitled Resume");
    }

    #[test]
    fn test_resolve_title_too_long() {
        let long = "x".repeat(MAX_TITLE + 1);
        match resolve_title(Some(&long), &resume("Ada")) {
            Err(AppError::InvalidField { field, .. }) => assert_eq!(field, "title"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_update_keeps_document_type() {
        assert!(ensure_same_type("cv", DocumentType::Cv).is_ok());
        match ensure_same_type("resume", DocumentType::Biodata) {
            Err(AppError::InvalidField { field, message }) => {
                assert_eq!(field, "data.documentType");
                assert!(message.contains("Resume"));
                assert!(message.contains("Biodata"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            ensure_same_type("letter", DocumentType::Cv),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_file_slug() {
        assert_eq!(file_slug("Ada Lovelace — Resume (2024)"), "ada-lovelace-resume-2024");
        assert_eq!(file_slug("!!!"), "document");
    }

    #[test]
    fn test_save_request_parses_tagged_data() {
        let req: SaveDocumentRequest = serde_json::from_value(serde_json::json!({
            "templateId": "modern",
            "data": {
                "documentType": "biodata",
                "personalInfo": { "fullName": "Ravi", "email": "ravi@example.com" },
                "hobbies": ["cricket"]
            }
        }))
        .unwrap();
        assert_eq!(req.data.document_type(), DocumentType::Biodata);
        assert!(req.title.is_none());
    }
}
