//! Suggestion proxy: builds a prompt per (mode, feature), forwards it, and cleans up the reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::prompts::NO_FABRICATION_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::document::DocumentType;
use crate::suggestions::prompts::{SUGGESTION_PROMPT_TEMPLATE, SUGGESTION_SYSTEM};

pub const MAX_TEXT_CHARS: usize = 2000;
pub const MAX_CONTEXT_CHARS: usize = 2000;
pub const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionMode {
    Generate,
    Improve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureType {
    Summary,
    Experience,
    Skills,
    Education,
    Research,
    Publication,
    Achievement,
    Hobbies,
}

impl FeatureType {
    fn subject(&self) -> &'static str {
        match self {
            FeatureType::Summary => "a professional summary",
            FeatureType::Experience => "a job description with achievement bullet points",
            FeatureType::Skills => "a list of relevant skills",
            FeatureType::Education => "a short description of an education entry",
            FeatureType::Research => "a description of a research position or project",
            FeatureType::Publication => "a one-line publication description",
            FeatureType::Achievement => "a description of an award or academic achievement",
            FeatureType::Hobbies => "a list of hobbies and interests",
        }
    }

    fn length_rule(&self) -> &'static str {
        match self {
            FeatureType::Summary => "Each suggestion is 2-4 sentences, under 80 words.",
            FeatureType::Experience | FeatureType::Research => {
                "Each suggestion is 2-4 bullet-style sentences separated by newlines, each starting with a strong action verb."
            }
            FeatureType::Skills | FeatureType::Hobbies => {
                "Each suggestion is a single item of 1-4 words."
            }
            FeatureType::Education | FeatureType::Publication | FeatureType::Achievement => {
                "Each suggestion is one sentence, under 30 words."
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub mode: SuggestionMode,
    pub feature_type: FeatureType,
    #[serde(default)]
    pub text: String,
    pub context: Option<String>,
    pub document_type: Option<DocumentType>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

/// The outbound completion backend. Carried in `AppState` as `Arc<dyn SuggestionBackend>`.
#[async_trait]
pub trait SuggestionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<Value, LlmError>;
}

/// Default backend: the shared LLM client.
pub struct LlmSuggestionBackend {
    pub llm: LlmClient,
}

#[async_trait]
impl SuggestionBackend for LlmSuggestionBackend {
    async fn complete(&self, prompt: &str, system: &str) -> Result<Value, LlmError> {
        self.llm.call_json::<Value>(prompt, system).await
    }
}

pub fn validate_request(req: &SuggestionRequest) -> Result<(), AppError> {
    if req.mode == SuggestionMode::Improve && req.text.trim().is_empty() {
        return Err(AppError::InvalidField {
            field: "text".to_string(),
            message: "Text is required to improve".to_string(),
        });
    }
    if req.text.chars().count() > MAX_TEXT_CHARS {
        return Err(AppError::InvalidField {
            field: "text".to_string(),
            message: format!("Text must be at most {MAX_TEXT_CHARS} characters"),
        });
    }
    if let Some(ctx) = &req.context {
        if ctx.chars().count() > MAX_CONTEXT_CHARS {
            return Err(AppError::InvalidField {
                field: "context".to_string(),
                message: format!("Context must be at most {MAX_CONTEXT_CHARS} characters"),
            });
        }
    }
    Ok(())
}

pub fn build_prompt(req: &SuggestionRequest) -> String {
    let task = match req.mode {
        SuggestionMode::Generate => format!("Write {} for the person described below.", req.feature_type.subject()),
        SuggestionMode::Improve => format!(
            "Rewrite the user's text below as {}. Keep every fact, fix grammar, tighten wording and make the impact clearer.",
            req.feature_type.subject()
        ),
    };
    let document_type = req
        .document_type
        .map(|d| d.label())
        .unwrap_or("Resume");
    let context = req
        .context
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("(none)");
    let text = match req.text.trim() {
        "" => "(none)",
        t => t,
    };

    fill_placeholders(
        SUGGESTION_PROMPT_TEMPLATE,
        &[
            ("{task}", task.as_str()),
            ("{document_type}", document_type),
            ("{length_rule}", req.feature_type.length_rule()),
            ("{no_fabrication}", NO_FABRICATION_INSTRUCTION),
            ("{context}", context),
            ("{text}", text),
        ],
    )
}

/// Substitutes every placeholder in a single left-to-right scan of `template`.
/// Inserted values are never rescanned, so user text containing `{text}` stays literal.
fn fill_placeholders(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = fields
            .iter()
            .filter_map(|(key, value)| rest.find(key).map(|at| (at, *key, *value)))
            .min_by_key(|(at, _, _)| *at);
        match next {
            Some((at, key, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + key.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Pulls suggestion strings out of whatever shape the model replied with:
/// `{"suggestions": [...]}`, a bare array, or items that are `{"text": ...}` objects.
pub fn extract_suggestions(value: &Value) -> Vec<String> {
    let items = match value {
        Value::Object(map) => map.get("suggestions").and_then(Value::as_array),
        Value::Array(arr) => Some(arr),
        _ => None,
    };
    let Some(items) = items else {
        return Vec::new();
    };

    let mut out: Vec<String> = Vec::new();
    for item in items {
        let text = match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(o) => o.get("text").and_then(Value::as_str),
            _ => None,
        };
        if let Some(t) = text.map(str::trim).filter(|t| !t.is_empty()) {
            if !out.iter().any(|s| s.eq_ignore_ascii_case(t)) {
                out.push(t.to_string());
            }
        }
        if out.len() == MAX_SUGGESTIONS {
            break;
        }
    }
    out
}

pub async fn suggest(
    backend: &dyn SuggestionBackend,
    req: &SuggestionRequest,
) -> Result<SuggestionResponse, AppError> {
    validate_request(req)?;
    let prompt = build_prompt(req);

    let reply = backend.complete(&prompt, SUGGESTION_SYSTEM).await.map_err(|e| {
        warn!("Suggestion call failed: {e}");
        AppError::Llm("Failed to generate suggestions. Please try again.".to_string())
    })?;

    let suggestions = extract_suggestions(&reply);
    if suggestions.is_empty() {
        warn!("Suggestion reply had no usable suggestions: {reply}");
        return Err(AppError::Llm(
            "The AI service returned no usable suggestions".to_string(),
        ));
    }

    info!(
        "Generated {} suggestions ({:?}/{:?})",
        suggestions.len(),
        req.mode,
        req.feature_type
    );
    Ok(SuggestionResponse { suggestions })
}
