//! Static step tables, one per document type.
//!
//! Order in each table is the wizard order. The rules table runs parallel to the
//! step table: same ids, same order.

use serde::Serialize;

use crate::models::document::DocumentType;

/// One page of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepConfig {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub required: bool,
    /// Name of the client component that renders this step.
    pub component: &'static str,
}

/// Validation rule for a step: required flag and prerequisite step ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRule {
    pub step_id: &'static str,
    pub required: bool,
    pub depends_on: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStructure {
    pub document_type: DocumentType,
    pub steps: &'static [StepConfig],
    pub min_steps: usize,
    pub max_steps: usize,
}

pub const PERSONAL_INFO: &str = "personal-info";
pub const REVIEW: &str = "review";

const fn step(
    id: &'static str,
    title: &'static str,
    icon: &'static str,
    description: &'static str,
    required: bool,
    component: &'static str,
) -> StepConfig {
    StepConfig {
        id,
        title,
        icon,
        description,
        required,
        component,
    }
}

const fn rule(step_id: &'static str, required: bool, depends_on: &'static [&'static str]) -> StepRule {
    StepRule {
        step_id,
        required,
        depends_on,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

static RESUME_STEPS: [StepConfig; 5] = [
    step(PERSONAL_INFO, "Personal Info", "user", "Your name and contact details", true, "PersonalInfoStep"),
    step("experience", "Experience", "briefcase", "Jobs and internships", true, "ExperienceStep"),
    step("education", "Education", "graduation-cap", "Degrees and schools", true, "EducationStep"),
    step("skills", "Skills", "star", "Tools, languages and strengths", false, "SkillsStep"),
    step(REVIEW, "Review", "check-circle", "Check everything and pick a template", true, "ReviewStep"),
];

static RESUME_RULES: [StepRule; 5] = [
    rule(PERSONAL_INFO, true, &[]),
    rule("experience", true, &[PERSONAL_INFO]),
    rule("education", true, &[PERSONAL_INFO]),
    rule("skills", false, &[PERSONAL_INFO]),
    rule(REVIEW, true, &[PERSONAL_INFO, "experience", "education"]),
];

// ────────────────────────────────────────────────────────────────────────────
// CV
// ────────────────────────────────────────────────────────────────────────────

static CV_STEPS: [StepConfig; 8] = [
    step(PERSONAL_INFO, "Personal Info", "user", "Your name and contact details", true, "PersonalInfoStep"),
    step("education", "Education", "graduation-cap", "Degrees and schools", true, "EducationStep"),
    step("research", "Research", "flask", "Research positions and projects", false, "ResearchStep"),
    step("publications", "Publications", "book-open", "Papers, articles and books", false, "PublicationsStep"),
    step("experience", "Experience", "briefcase", "Academic and industry positions", true, "ExperienceStep"),
    step("skills", "Skills", "star", "Methods, tools and languages", false, "SkillsStep"),
    step("achievements", "Achievements", "award", "Awards, grants and honours", false, "AchievementsStep"),
    step(REVIEW, "Review", "check-circle", "Check everything and pick a template", true, "ReviewStep"),
];

static CV_RULES: [StepRule; 8] = [
    rule(PERSONAL_INFO, true, &[]),
    rule("education", true, &[PERSONAL_INFO]),
    rule("research", false, &[PERSONAL_INFO]),
    rule("publications", false, &[PERSONAL_INFO]),
    rule("experience", true, &[PERSONAL_INFO]),
    rule("skills", false, &[PERSONAL_INFO]),
    rule("achievements", false, &[PERSONAL_INFO]),
    rule(REVIEW, true, &[PERSONAL_INFO, "education", "experience"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Biodata
// ────────────────────────────────────────────────────────────────────────────

static BIODATA_STEPS: [StepConfig; 7] = [
    step(PERSONAL_INFO, "Personal Info", "user", "Your name and contact details", true, "PersonalInfoStep"),
    step("personal-details", "Personal Details", "id-card", "Date of birth, religion, height and more", true, "PersonalDetailsStep"),
    step("family", "Family", "users", "Parents, siblings and relatives", true, "FamilyStep"),
    step("education", "Education", "graduation-cap", "Degrees and schools", true, "EducationStep"),
    step("experience", "Experience", "briefcase", "Current and past occupation", false, "ExperienceStep"),
    step("skills", "Skills & Hobbies", "heart", "What you are good at and enjoy", false, "SkillsStep"),
    step(REVIEW, "Review", "check-circle", "Check everything and pick a template", true, "ReviewStep"),
];

static BIODATA_RULES: [StepRule; 7] = [
    rule(PERSONAL_INFO, true, &[]),
    rule("personal-details", true, &[PERSONAL_INFO]),
    rule("family", true, &[PERSONAL_INFO]),
    rule("education", true, &[PERSONAL_INFO]),
    rule("experience", false, &[PERSONAL_INFO]),
    rule("skills", false, &[PERSONAL_INFO]),
    rule(REVIEW, true, &[PERSONAL_INFO, "personal-details", "family", "education"]),
];

/// Ordered steps for a document type.
pub fn steps_for(document_type: DocumentType) -> &'static [StepConfig] {
    match document_type {
        DocumentType::Resume => &RESUME_STEPS,
        DocumentType::Cv => &CV_STEPS,
        DocumentType::Biodata => &BIODATA_STEPS,
    }
}

/// Rules table, parallel to [`steps_for`].
pub fn step_rules(document_type: DocumentType) -> &'static [StepRule] {
    match document_type {
        DocumentType::Resume => &RESUME_RULES,
        DocumentType::Cv => &CV_RULES,
        DocumentType::Biodata => &BIODATA_RULES,
    }
}

pub fn document_structure(document_type: DocumentType) -> DocumentStructure {
    let steps = steps_for(document_type);
    DocumentStructure {
        document_type,
        steps,
        min_steps: steps.iter().filter(|s| s.required).count(),
        max_steps: steps.len(),
    }
}
