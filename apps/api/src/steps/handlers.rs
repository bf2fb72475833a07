use std::collections::HashSet;

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::document::DocumentType;
use crate::steps::config::{document_structure, step_rules, DocumentStructure, StepConfig, StepRule};
use crate::steps::navigation::{
    accessible_steps, completion_percentage, get_rule, get_step, get_step_by_component,
    is_complete, next_accessible_step, optional_steps, previous_accessible_step, required_steps,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureResponse {
    #[serde(flatten)]
    pub structure: DocumentStructure,
    pub rules: &'static [StepRule],
    pub required_steps: Vec<&'static str>,
    pub optional_steps: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct StepDetail {
    pub step: &'static StepConfig,
    pub rule: Option<&'static StepRule>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub current_step: Option<String>,
    #[serde(default)]
    pub completed_steps: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub document_type: DocumentType,
    pub accessible_steps: Vec<&'static str>,
    pub next_step: Option<&'static StepConfig>,
    pub previous_step: Option<&'static StepConfig>,
    pub completion_percentage: u8,
    pub complete: bool,
    /// Required steps not yet in the completed set, in wizard order.
    pub remaining_required: Vec<&'static str>,
}

pub(crate) fn parse_document_type(raw: &str) -> Result<DocumentType, AppError> {
    raw.parse::<DocumentType>().map_err(AppError::Validation)
}

/// GET /api/v1/steps/:document_type
pub async fn handle_get_structure(
    Path(document_type): Path<String>,
) -> Result<Json<StructureResponse>, AppError> {
    let document_type = parse_document_type(&document_type)?;
    Ok(Json(StructureResponse {
        structure: document_structure(document_type),
        rules: step_rules(document_type),
        required_steps: required_steps(document_type),
        optional_steps: optional_steps(document_type),
    }))
}

/// GET /api/v1/steps/:document_type/components/:component
/// Resolves the step a client-side component renders.
pub async fn handle_get_step_by_component(
    Path((document_type, component)): Path<(String, String)>,
) -> Result<Json<StepDetail>, AppError> {
    let document_type = parse_document_type(&document_type)?;
    let step = get_step_by_component(document_type, &component).ok_or_else(|| {
        AppError::NotFound(format!(
            "No {} step uses component '{component}'",
            document_type.label()
        ))
    })?;
    Ok(Json(StepDetail {
        step,
        rule: get_rule(document_type, step.id),
    }))
}

/// POST /api/v1/steps/:document_type/progress
///
/// Given the steps the client has finished, reports what is open, where to go next,
/// and how far along the wizard is.
pub async fn handle_progress(
    Path(document_type): Path<String>,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<ProgressResponse>, AppError> {
    let document_type = parse_document_type(&document_type)?;
    let completed: HashSet<String> = req.completed_steps.into_iter().collect();

    let (next_step, previous_step) = match req.current_step.as_deref() {
        Some(current) => {
            if get_step(document_type, current).is_none() {
                return Err(AppError::NotFound(format!(
                    "Step '{current}' does not exist for {}",
                    document_type.label()
                )));
            }
            (
                next_accessible_step(document_type, current, &completed),
                previous_accessible_step(document_type, current, &completed),
            )
        }
        None => (None, None),
    };

    Ok(Json(ProgressResponse {
        document_type,
        accessible_steps: accessible_steps(document_type, &completed),
        next_step,
        previous_step,
        completion_percentage: completion_percentage(document_type, &completed),
        complete: is_complete(document_type, &completed),
        remaining_required: required_steps(document_type)
            .into_iter()
            .filter(|id| !completed.contains(*id))
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_structure_rejects_unknown_type() {
        let result = handle_get_structure(Path("letter".to_string())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_progress_reports_next_and_percentage() {
        let Json(resp) = handle_progress(
            Path("resume".to_string()),
            Json(ProgressRequest {
                current_step: Some("personal-info".to_string()),
                completed_steps: vec!["personal-info".to_string()],
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.completion_percentage, 20);
        assert_eq!(resp.next_step.map(|s| s.id), Some("experience"));
        assert!(resp.previous_step.is_none());
        assert!(!resp.complete);
        assert_eq!(resp.remaining_required, vec!["experience", "education", "review"]);
    }

    #[tokio::test]
    async fn test_structure_lists_required_and_optional() {
        let Json(resp) = handle_get_structure(Path("cv".to_string())).await.unwrap();
        assert_eq!(resp.structure.steps.len(), 8);
        assert_eq!(resp.rules.len(), 8);
        assert!(resp.optional_steps.contains(&"publications"));
        assert!(resp.required_steps.contains(&"review"));
        assert_eq!(resp.required_steps.len() + resp.optional_steps.len(), 8);
    }

    #[tokio::test]
    async fn test_step_by_component() {
        let Json(detail) = handle_get_step_by_component(Path((
            "biodata".to_string(),
            "FamilyStep".to_string(),
        )))
        .await
        .unwrap();
        assert_eq!(detail.step.id, "family");
        assert!(detail.rule.is_some_and(|r| r.required));

        let missing = handle_get_step_by_component(Path((
            "resume".to_string(),
            "FamilyStep".to_string(),
        )))
        .await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_progress_unknown_current_step() {
        let result = handle_progress(
            Path("cv".to_string()),
            Json(ProgressRequest {
                current_step: Some("family".to_string()),
                completed_steps: vec![],
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
