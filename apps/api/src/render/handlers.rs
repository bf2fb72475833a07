//! Axum route handlers for templates and rendering.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::session::AdminUser;
use crate::errors::AppError;
use crate::models::document::{DocumentData, DocumentType};
use crate::models::template::TemplateRow;
use crate::render::builtin::{builtin_template, builtin_templates};
use crate::render::renderer::{RenderMode, RenderedDocument, TemplateRenderer, TemplateSource};
use crate::render::store::{self, NewTemplate};
use crate::state::AppState;

const MAX_TEMPLATE_BYTES: usize = 200 * 1024;
const MAX_TEMPLATE_NAME: usize = 80;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub document_type: Option<String>,
    pub builtin: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub document_type: Option<String>,
    pub html: String,
    pub css: String,
    pub builtin: bool,
}

impl From<TemplateRow> for TemplateDetail {
    fn from(row: TemplateRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            document_type: row.document_type,
            html: row.html,
            css: row.css,
            builtin: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub template_id: Option<String>,
    pub html: Option<String>,
    pub css: Option<String>,
    pub data: DocumentData,
    #[serde(default)]
    pub mode: RenderMode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub description: Option<String>,
    pub html: String,
    #[serde(default)]
    pub css: String,
    pub document_type: Option<DocumentType>,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

/// Looks a template up by builtin slug first, then by catalogue UUID.
pub async fn resolve_template(state: &AppState, id: &str) -> Result<TemplateDetail, AppError> {
    if let Some(t) = builtin_template(id) {
        return Ok(TemplateDetail {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: Some(t.description.to_string()),
            document_type: None,
            html: t.html.to_string(),
            css: t.css.to_string(),
            builtin: true,
        });
    }

    let uuid = Uuid::parse_str(id)
        .map_err(|_| AppError::NotFound(format!("Template {id} not found")))?;
    store::get_template(&state.db, uuid)
        .await
        .map_err(AppError::Internal)?
        .map(TemplateDetail::from)
        .ok_or_else(|| AppError::NotFound(format!("Template {id} not found")))
}

/// Runs the renderer off the async executor. Any failure becomes a generic render error.
pub async fn render_blocking(
    renderer: Arc<TemplateRenderer>,
    html: String,
    css: String,
    data: Value,
    mode: RenderMode,
    title: String,
) -> Result<RenderedDocument, AppError> {
    tokio::task::spawn_blocking(move || {
        renderer.render(&TemplateSource { html: &html, css: &css }, &data, mode, &title)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("render task panicked: {e}")))?
    .map_err(|e| AppError::Render(e.to_string()))
}

fn check_template_size(html: &str, css: &str) -> Result<(), AppError> {
    if html.len() > MAX_TEMPLATE_BYTES {
        return Err(AppError::InvalidField {
            field: "html".to_string(),
            message: "Template HTML is too large".to_string(),
        });
    }
    if css.len() > MAX_TEMPLATE_BYTES {
        return Err(AppError::InvalidField {
            field: "css".to_string(),
            message: "Template CSS is too large".to_string(),
        });
    }
    Ok(())
}

fn name_conflict(name: &str) -> AppError {
    AppError::Conflict(format!("A template named '{name}' already exists"))
}

/// Trims the name, checks its length, and rejects names taken by a built-in.
fn check_template_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.is_empty() || name.chars().count() > MAX_TEMPLATE_NAME {
        return Err(AppError::InvalidField {
            field: "name".to_string(),
            message: format!("Template name must be 1-{MAX_TEMPLATE_NAME} characters"),
        });
    }
    let taken = builtin_templates()
        .iter()
        .any(|t| t.id.eq_ignore_ascii_case(name) || t.name.eq_ignore_ascii_case(name));
    if taken {
        return Err(name_conflict(name));
    }
    Ok(name)
}

/// The insert skips rows whose name is already in the catalogue, including one
/// written by a concurrent request after any earlier check.
fn created_or_conflict(row: Option<TemplateRow>, name: &str) -> Result<TemplateRow, AppError> {
    row.ok_or_else(|| name_conflict(name))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemplateSummary>>, AppError> {
    let mut templates: Vec<TemplateSummary> = builtin_templates()
        .iter()
        .map(|t| TemplateSummary {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: Some(t.description.to_string()),
            document_type: None,
            builtin: true,
        })
        .collect();

    let stored = store::list_templates(&state.db)
        .await
        .map_err(AppError::Internal)?;
    templates.extend(stored.into_iter().map(|row| TemplateSummary {
        id: row.id.to_string(),
        name: row.name,
        description: row.description,
        document_type: row.document_type,
        builtin: false,
    }));

    Ok(Json(templates))
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TemplateDetail>, AppError> {
    Ok(Json(resolve_template(&state, &id).await?))
}

/// POST /api/v1/render
///
/// Renders document data with a catalogue template or an inline HTML/CSS pair.
/// The data is not schema-validated: previews run while the wizard is half filled in.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Json<RenderedDocument>, AppError> {
    let (html, css) = match (req.template_id.as_deref(), req.html) {
        (Some(id), _) => {
            let template = resolve_template(&state, id).await?;
            (template.html, template.css)
        }
        (None, Some(html)) => (html, req.css.unwrap_or_default()),
        (None, None) => {
            return Err(AppError::Validation(
                "Either templateId or html must be provided".to_string(),
            ))
        }
    };
    check_template_size(&html, &css)?;

    let title = req.data.personal_info().full_name.clone();
    let data = serde_json::to_value(&req.data).map_err(|e| AppError::Internal(e.into()))?;

    let rendered = render_blocking(state.renderer.clone(), html, css, data, req.mode, title).await?;
    Ok(Json(rendered))
}

/// POST /api/v1/admin/templates
pub async fn handle_create_template(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(req): Json<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<TemplateDetail>), AppError> {
    let name = check_template_name(&req.name)?;
    if req.html.trim().is_empty() {
        return Err(AppError::InvalidField {
            field: "html".to_string(),
            message: "Template HTML is required".to_string(),
        });
    }
    check_template_size(&req.html, &req.css)?;

    // Compile once against empty data so syntax errors surface at upload time.
    if let Err(e) = state.renderer.render_body(&req.html, &Value::Null) {
        warn!("Rejected template '{name}': {e}");
        return Err(AppError::InvalidField {
            field: "html".to_string(),
            message: "Template could not be compiled".to_string(),
        });
    }

    let row = store::insert_template(
        &state.db,
        NewTemplate {
            name,
            description: req.description.as_deref(),
            html: &req.html,
            css: &req.css,
            document_type: req.document_type.map(|d| d.as_str()),
        },
    )
    .await
    .map_err(AppError::Internal)?;
    let row = created_or_conflict(row, name)?;

    info!("Admin {} created template {}", admin.0.email, row.id);
    Ok((StatusCode::CREATED, Json(row.into())))
}

/// DELETE /api/v1/admin/templates/:id
pub async fn handle_delete_template(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = store::delete_template(&state.db, id)
        .await
        .map_err(AppError::Internal)?;
    if !deleted {
        return Err(AppError::NotFound(format!("Template {id} not found")));
    }
    info!("Admin {} deleted template {id}", admin.0.email);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_template_size() {
        assert!(check_template_size("<p></p>", "").is_ok());
        let big = "a".repeat(MAX_TEMPLATE_BYTES + 1);
        match check_template_size(&big, "") {
            Err(AppError::InvalidField { field, .. }) => assert_eq!(field, "html"),
            other => panic!("unexpected: {other:?}"),
        }
        match check_template_size("", &big) {
            Err(AppError::InvalidField { field, .. }) => assert_eq!(field, "css"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_template_name_checks() {
        assert_eq!(check_template_name("  Elegant ").unwrap(), "Elegant");
        assert!(matches!(check_template_name("   "), Err(AppError::InvalidField { .. })));
        let long = "n".repeat(MAX_TEMPLATE_NAME + 1);
        assert!(matches!(check_template_name(&long), Err(AppError::InvalidField { .. })));
        assert!(matches!(check_template_name("CLASSIC"), Err(AppError::Conflict(_))));
        assert!(matches!(check_template_name("modern"), Err(AppError::Conflict(_))));
    }

    #[test]
    fn test_skipped_insert_is_a_conflict() {
        match created_or_conflict(None, "Elegant") {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("Elegant")),
            other => panic!("unexpected: {other:?}"),
        }

        let row = TemplateRow {
            id: Uuid::new_v4(),
            name: "Elegant".to_string(),
            description: None,
            html: "<p></p>".to_string(),
            css: String::new(),
            document_type: None,
            created_at: chrono::Utc::now(),
        };
        let id = row.id;
        assert_eq!(created_or_conflict(Some(row), "Elegant").unwrap().id, id);
    }

    #[tokio::test]
    async fn test_render_blocking_maps_failures_to_render_error() {
        let renderer = Arc::new(TemplateRenderer::new());
        let result = render_blocking(
            renderer,
            "{{#if x}}".to_string(),
            String::new(),
            Value::Null,
            RenderMode::Print,
            "t".to_string(),
        )
        .await;
        assert!(matches!(result, Err(AppError::Render(_))));
    }

    #[test]
    fn test_render_request_defaults_to_preview() {
        let req: RenderRequest = serde_json::from_value(serde_json::json!({
            "templateId": "classic",
            "data": { "documentType": "cv" }
        }))
        .unwrap();
        assert_eq!(req.mode, RenderMode::Preview);
        assert_eq!(req.data.document_type(), DocumentType::Cv);
    }
}
