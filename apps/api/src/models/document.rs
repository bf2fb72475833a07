//! Document payloads for the three supported document types.
//!
//! Every record is a flat bag of strings; the wizard fills them in step by step and the
//! whole aggregate is saved at once. Wire names are camelCase to match the form fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Document type
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Resume,
    Cv,
    Biodata,
}

impl DocumentType {
    pub const ALL: [DocumentType; 3] = [DocumentType::Resume, DocumentType::Cv, DocumentType::Biodata];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Resume => "resume",
            DocumentType::Cv => "cv",
            DocumentType::Biodata => "biodata",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Resume => "Resume",
            DocumentType::Cv => "CV",
            DocumentType::Biodata => "Biodata",
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "resume" => Ok(DocumentType::Resume),
            "cv" => Ok(DocumentType::Cv),
            "biodata" => Ok(DocumentType::Biodata),
            other => Err(format!("Unknown document type '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: Option<String>,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: String,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub id: Option<String>,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub grade: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Skill {
    pub id: Option<String>,
    pub name: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    pub id: Option<String>,
    pub title: String,
    pub authors: Option<String>,
    pub venue: Option<String>,
    pub year: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResearchExperience {
    pub id: Option<String>,
    pub title: String,
    pub institution: String,
    pub supervisor: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademicAchievement {
    pub id: Option<String>,
    pub title: String,
    pub issuer: Option<String>,
    pub year: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FamilyMember {
    pub id: Option<String>,
    pub name: String,
    pub relation: String,
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetail {
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub religion: Option<String>,
    pub nationality: Option<String>,
    pub marital_status: Option<String>,
    pub height: Option<String>,
    pub complexion: Option<String>,
    pub languages: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub publications: Vec<Publication>,
    pub research: Vec<ResearchExperience>,
    pub achievements: Vec<AcademicAchievement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BiodataData {
    pub personal_info: PersonalInfo,
    pub personal_details: PersonalDetail,
    pub family: Vec<FamilyMember>,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub hobbies: Vec<String>,
}

/// A complete document body, tagged by its type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "documentType", rename_all = "snake_case")]
pub enum DocumentData {
    Resume(ResumeData),
    Cv(CvData),
    Biodata(BiodataData),
}

impl DocumentData {
    pub fn document_type(&self) -> DocumentType {
        match self {
            DocumentData::Resume(_) => DocumentType::Resume,
            DocumentData::Cv(_) => DocumentType::Cv,
            DocumentData::Biodata(_) => DocumentType::Biodata,
        }
    }

    pub fn personal_info(&self) -> &PersonalInfo {
        match self {
            DocumentData::Resume(d) => &d.personal_info,
            DocumentData::Cv(d) => &d.personal_info,
            DocumentData::Biodata(d) => &d.personal_info,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persistence
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub document_type: String,
    pub title: String,
    pub template_id: Option<String>,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_type_from_str() {
        assert_eq!("CV".parse::<DocumentType>(), Ok(DocumentType::Cv));
        assert_eq!(" biodata ".parse::<DocumentType>(), Ok(DocumentType::Biodata));
        assert!("letter".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_document_data_tagged_by_document_type() {
        let data: DocumentData = serde_json::from_value(json!({
            "documentType": "resume",
            "personalInfo": { "fullName": "Ada Lovelace", "email": "ada@example.com" },
            "experience": [{ "company": "Analytical Engines", "position": "Engineer", "startDate": "1842-01" }]
        }))
        .unwrap();

        assert_eq!(data.document_type(), DocumentType::Resume);
        assert_eq!(data.personal_info().full_name, "Ada Lovelace");
        match data {
            DocumentData::Resume(r) => {
                assert_eq!(r.experience.len(), 1);
                assert!(r.skills.is_empty());
                assert!(!r.experience[0].current);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_biodata_serializes_camel_case() {
        let data = DocumentData::Biodata(BiodataData {
            personal_details: PersonalDetail {
                marital_status: Some("Single".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["documentType"], "biodata");
        assert_eq!(value["personalDetails"]["maritalStatus"], "Single");
    }
}
