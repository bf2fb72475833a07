//! Per-document-type schema checks.
//!
//! One synchronous pass over the payload. The first violation wins and is reported
//! with a dotted field path (`experience[2].company`) the form can focus.

use crate::errors::AppError;
use crate::models::document::{
    AcademicAchievement, BiodataData, CvData, DocumentData, Education, Experience, FamilyMember,
    PersonalDetail, PersonalInfo, Publication, ResearchExperience, ResumeData, Skill,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<FieldError> for AppError {
    fn from(e: FieldError) -> Self {
        AppError::InvalidField {
            field: e.field,
            message: e.message,
        }
    }
}

pub type FieldResult = Result<(), FieldError>;

/// Array caps and text limits for one document type.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub max_experience: usize,
    pub max_education: usize,
    pub max_skills: usize,
    pub max_summary: usize,
}

pub const RESUME_LIMITS: Limits = Limits {
    max_experience: 10,
    max_education: 10,
    max_skills: 30,
    max_summary: 1000,
};

pub const CV_LIMITS: Limits = Limits {
    max_experience: 15,
    max_education: 10,
    max_skills: 50,
    max_summary: 2000,
};

pub const BIODATA_LIMITS: Limits = Limits {
    max_experience: 10,
    max_education: 15,
    max_skills: 20,
    max_summary: 1000,
};

pub const MAX_PUBLICATIONS: usize = 50;
pub const MAX_RESEARCH: usize = 15;
pub const MAX_ACHIEVEMENTS: usize = 20;
pub const MAX_FAMILY: usize = 20;
pub const MAX_HOBBIES: usize = 20;
/// Profile images arrive inline as data URLs.
const MAX_PROFILE_IMAGE: usize = 700_000;

// ────────────────────────────────────────────────────────────────────────────
// Primitive checks
// ────────────────────────────────────────────────────────────────────────────

pub fn required(field: &str, value: &str, label: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(FieldError::new(field, format!("{label} is required")));
    }
    Ok(())
}

pub fn max_len(field: &str, value: &str, max: usize, label: &str) -> FieldResult {
    if value.chars().count() > max {
        return Err(FieldError::new(
            field,
            format!("{label} must be at most {max} characters"),
        ));
    }
    Ok(())
}

pub fn min_len(field: &str, value: &str, min: usize, label: &str) -> FieldResult {
    if value.trim().chars().count() < min {
        return Err(FieldError::new(
            field,
            format!("{label} must be at least {min} characters"),
        ));
    }
    Ok(())
}

pub fn opt_max_len(field: &str, value: &Option<String>, max: usize, label: &str) -> FieldResult {
    match value {
        Some(v) => max_len(field, v, max, label),
        None => Ok(()),
    }
}

pub fn max_items(field: &str, len: usize, max: usize, label: &str) -> FieldResult {
    if len > max {
        return Err(FieldError::new(
            field,
            format!("You can add at most {max} {label}"),
        ));
    }
    Ok(())
}

pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.len() > 254 || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

pub fn email(field: &str, value: &str) -> FieldResult {
    required(field, value, "Email")?;
    if !is_valid_email(value) {
        return Err(FieldError::new(field, "Please enter a valid email address"));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

fn validate_personal_info(info: &PersonalInfo, limits: &Limits) -> FieldResult {
    required("personalInfo.fullName", &info.full_name, "Full name")?;
    max_len("personalInfo.fullName", &info.full_name, 100, "Full name")?;
    email("personalInfo.email", &info.email)?;
    opt_max_len("personalInfo.phone", &info.phone, 30, "Phone")?;
    opt_max_len("personalInfo.address", &info.address, 200, "Address")?;
    opt_max_len("personalInfo.linkedin", &info.linkedin, 200, "LinkedIn URL")?;
    opt_max_len("personalInfo.website", &info.website, 200, "Website")?;
    opt_max_len("personalInfo.summary", &info.summary, limits.max_summary, "Summary")?;
    opt_max_len("personalInfo.profileImage", &info.profile_image, MAX_PROFILE_IMAGE, "Profile image")?;
    Ok(())
}

fn validate_experience(items: &[Experience], max: usize) -> FieldResult {
    max_items("experience", items.len(), max, "experience entries")?;
    for (i, e) in items.iter().enumerate() {
        let f = |name: &str| format!("experience[{i}].{name}");
        required(&f("company"), &e.company, "Company")?;
        max_len(&f("company"), &e.company, 100, "Company")?;
        required(&f("position"), &e.position, "Position")?;
        max_len(&f("position"), &e.position, 100, "Position")?;
        opt_max_len(&f("location"), &e.location, 100, "Location")?;
        required(&f("startDate"), &e.start_date, "Start date")?;
        max_len(&f("startDate"), &e.start_date, 20, "Start date")?;
        opt_max_len(&f("endDate"), &e.end_date, 20, "End date")?;
        opt_max_len(&f("description"), &e.description, 2000, "Description")?;
    }
    Ok(())
}

fn validate_education(items: &[Education], max: usize) -> FieldResult {
    max_items("education", items.len(), max, "education entries")?;
    for (i, e) in items.iter().enumerate() {
        let f = |name: &str| format!("education[{i}].{name}");
        required(&f("institution"), &e.institution, "Institution")?;
        max_len(&f("institution"), &e.institution, 150, "Institution")?;
        required(&f("degree"), &e.degree, "Degree")?;
        max_len(&f("degree"), &e.degree, 100, "Degree")?;
        opt_max_len(&f("fieldOfStudy"), &e.field_of_study, 100, "Field of study")?;
        opt_max_len(&f("startDate"), &e.start_date, 20, "Start date")?;
        opt_max_len(&f("endDate"), &e.end_date, 20, "End date")?;
        opt_max_len(&f("grade"), &e.grade, 20, "Grade")?;
        opt_max_len(&f("description"), &e.description, 1000, "Description")?;
    }
    Ok(())
}

fn validate_skills(items: &[Skill], max: usize) -> FieldResult {
    max_items("skills", items.len(), max, "skills")?;
    for (i, s) in items.iter().enumerate() {
        let f = |name: &str| format!("skills[{i}].{name}");
        required(&f("name"), &s.name, "Skill name")?;
        max_len(&f("name"), &s.name, 50, "Skill name")?;
        opt_max_len(&f("level"), &s.level, 30, "Skill level")?;
    }
    Ok(())
}

fn validate_publications(items: &[Publication]) -> FieldResult {
    max_items("publications", items.len(), MAX_PUBLICATIONS, "publications")?;
    for (i, p) in items.iter().enumerate() {
        let f = |name: &str| format!("publications[{i}].{name}");
        required(&f("title"), &p.title, "Title")?;
        max_len(&f("title"), &p.title, 300, "Title")?;
        opt_max_len(&f("authors"), &p.authors, 500, "Authors")?;
        opt_max_len(&f("venue"), &p.venue, 200, "Venue")?;
        opt_max_len(&f("year"), &p.year, 10, "Year")?;
        opt_max_len(&f("url"), &p.url, 300, "URL")?;
    }
    Ok(())
}

fn validate_research(items: &[ResearchExperience]) -> FieldResult {
    max_items("research", items.len(), MAX_RESEARCH, "research entries")?;
    for (i, r) in items.iter().enumerate() {
        let f = |name: &str| format!("research[{i}].{name}");
        required(&f("title"), &r.title, "Title")?;
        max_len(&f("title"), &r.title, 200, "Title")?;
        required(&f("institution"), &r.institution, "Institution")?;
        max_len(&f("institution"), &r.institution, 150, "Institution")?;
        opt_max_len(&f("supervisor"), &r.supervisor, 100, "Supervisor")?;
        opt_max_len(&f("description"), &r.description, 2000, "Description")?;
    }
    Ok(())
}

fn validate_achievements(items: &[AcademicAchievement]) -> FieldResult {
    max_items("achievements", items.len(), MAX_ACHIEVEMENTS, "achievements")?;
    for (i, a) in items.iter().enumerate() {
        let f = |name: &str| format!("achievements[{i}].{name}");
        required(&f("title"), &a.title, "Title")?;
        max_len(&f("title"), &a.title, 200, "Title")?;
        opt_max_len(&f("issuer"), &a.issuer, 150, "Issuer")?;
        opt_max_len(&f("year"), &a.year, 10, "Year")?;
        opt_max_len(&f("description"), &a.description, 1000, "Description")?;
    }
    Ok(())
}

fn validate_family(items: &[FamilyMember]) -> FieldResult {
    max_items("family", items.len(), MAX_FAMILY, "family members")?;
    for (i, m) in items.iter().enumerate() {
        let f = |name: &str| format!("family[{i}].{name}");
        required(&f("name"), &m.name, "Name")?;
        max_len(&f("name"), &m.name, 100, "Name")?;
        required(&f("relation"), &m.relation, "Relation")?;
        max_len(&f("relation"), &m.relation, 50, "Relation")?;
        opt_max_len(&f("occupation"), &m.occupation, 100, "Occupation")?;
    }
    Ok(())
}

fn validate_personal_details(d: &PersonalDetail) -> FieldResult {
    let fields = [
        ("personalDetails.dateOfBirth", &d.date_of_birth, "Date of birth"),
        ("personalDetails.gender", &d.gender, "Gender"),
        ("personalDetails.religion", &d.religion, "Religion"),
        ("personalDetails.nationality", &d.nationality, "Nationality"),
        ("personalDetails.maritalStatus", &d.marital_status, "Marital status"),
        ("personalDetails.height", &d.height, "Height"),
        ("personalDetails.complexion", &d.complexion, "Complexion"),
        ("personalDetails.languages", &d.languages, "Languages"),
    ];
    for (field, value, label) in fields {
        opt_max_len(field, value, 100, label)?;
    }
    Ok(())
}

fn validate_hobbies(items: &[String]) -> FieldResult {
    max_items("hobbies", items.len(), MAX_HOBBIES, "hobbies")?;
    for (i, h) in items.iter().enumerate() {
        let field = format!("hobbies[{i}]");
        required(&field, h, "Hobby")?;
        max_len(&field, h, 50, "Hobby")?;
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Documents
// ────────────────────────────────────────────────────────────────────────────

pub fn validate_resume(data: &ResumeData) -> FieldResult {
    let limits = RESUME_LIMITS;
    validate_personal_info(&data.personal_info, &limits)?;
    validate_experience(&data.experience, limits.max_experience)?;
    validate_education(&data.education, limits.max_education)?;
    validate_skills(&data.skills, limits.max_skills)?;
    Ok(())
}

pub fn validate_cv(data: &CvData) -> FieldResult {
    let limits = CV_LIMITS;
    validate_personal_info(&data.personal_info, &limits)?;
    validate_education(&data.education, limits.max_education)?;
    validate_research(&data.research)?;
    validate_publications(&data.publications)?;
    validate_experience(&data.experience, limits.max_experience)?;
    validate_skills(&data.skills, limits.max_skills)?;
    validate_achievements(&data.achievements)?;
    Ok(())
}

pub fn validate_biodata(data: &BiodataData) -> FieldResult {
    let limits = BIODATA_LIMITS;
    validate_personal_info(&data.personal_info, &limits)?;
    validate_personal_details(&data.personal_details)?;
    validate_family(&data.family)?;
    validate_education(&data.education, limits.max_education)?;
    validate_experience(&data.experience, limits.max_experience)?;
    validate_skills(&data.skills, limits.max_skills)?;
    validate_hobbies(&data.hobbies)?;
    Ok(())
}

pub fn validate_document(data: &DocumentData) -> FieldResult {
    match data {
        DocumentData::Resume(d) => validate_resume(d),
        DocumentData::Cv(d) => validate_cv(d),
        DocumentData::Biodata(d) => validate_biodata(d),
    }
}
