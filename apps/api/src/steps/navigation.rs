//! Queries over the step tables: lookup, dependency checks, next/previous and progress.
//!
//! Step ids are plain strings coming from the client, so every query tolerates ids
//! that are not in the table (they are never accessible and never count as progress).

use std::collections::HashSet;

use crate::models::document::DocumentType;
use crate::steps::config::{step_rules, steps_for, StepConfig, StepRule};

pub fn get_step(document_type: DocumentType, step_id: &str) -> Option<&'static StepConfig> {
    steps_for(document_type).iter().find(|s| s.id == step_id)
}

pub fn get_step_by_component(
    document_type: DocumentType,
    component: &str,
) -> Option<&'static StepConfig> {
    steps_for(document_type)
        .iter()
        .find(|s| s.component == component)
}

pub fn get_rule(document_type: DocumentType, step_id: &str) -> Option<&'static StepRule> {
    step_rules(document_type).iter().find(|r| r.step_id == step_id)
}

pub fn required_steps(document_type: DocumentType) -> Vec<&'static str> {
    step_rules(document_type)
        .iter()
        .filter(|r| r.required)
        .map(|r| r.step_id)
        .collect()
}

pub fn optional_steps(document_type: DocumentType) -> Vec<&'static str> {
    step_rules(document_type)
        .iter()
        .filter(|r| !r.required)
        .map(|r| r.step_id)
        .collect()
}

/// A step is accessible iff every prerequisite is in `completed`.
pub fn is_step_accessible(
    document_type: DocumentType,
    step_id: &str,
    completed: &HashSet<String>,
) -> bool {
    match get_rule(document_type, step_id) {
        Some(rule) => rule.depends_on.iter().all(|d| completed.contains(*d)),
        None => false,
    }
}

/// Ids of every step currently open to the user, in wizard order.
pub fn accessible_steps(document_type: DocumentType, completed: &HashSet<String>) -> Vec<&'static str> {
    steps_for(document_type)
        .iter()
        .filter(|s| is_step_accessible(document_type, s.id, completed))
        .map(|s| s.id)
        .collect()
}

/// First accessible step after `current`. `None` when `current` is unknown or last.
pub fn next_accessible_step(
    document_type: DocumentType,
    current: &str,
    completed: &HashSet<String>,
) -> Option<&'static StepConfig> {
    let steps = steps_for(document_type);
    let idx = steps.iter().position(|s| s.id == current)?;
    steps[idx + 1..]
        .iter()
        .find(|s| is_step_accessible(document_type, s.id, completed))
}

/// Nearest accessible step before `current`.
pub fn previous_accessible_step(
    document_type: DocumentType,
    current: &str,
    completed: &HashSet<String>,
) -> Option<&'static StepConfig> {
    let steps = steps_for(document_type);
    let idx = steps.iter().position(|s| s.id == current)?;
    steps[..idx]
        .iter()
        .rev()
        .find(|s| is_step_accessible(document_type, s.id, completed))
}

/// Completed steps over total steps, as a rounded percentage.
pub fn completion_percentage(document_type: DocumentType, completed: &HashSet<String>) -> u8 {
    let steps = steps_for(document_type);
    if steps.is_empty() {
        return 0;
    }
    let done = steps.iter().filter(|s| completed.contains(s.id)).count();
    ((done as f64 / steps.len() as f64) * 100.0).round() as u8
}

/// True once every required step is completed.
pub fn is_complete(document_type: DocumentType, completed: &HashSet<String>) -> bool {
    required_steps(document_type)
        .iter()
        .all(|id| completed.contains(*id))
}
