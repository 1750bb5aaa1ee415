//! Document types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{DocumentId, PrincipalId, SubjectId};

/// Kind of uploaded document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    QuestionPaper,
    Syllabus,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::QuestionPaper => "qp",
            DocumentKind::Syllabus => "syllabus",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "qp" => Ok(DocumentKind::QuestionPaper),
            "syllabus" => Ok(DocumentKind::Syllabus),
            _ => Err(format!("invalid document kind: {}", s)),
        }
    }
}

impl Default for DocumentKind {
    fn default() -> Self {
        DocumentKind::QuestionPaper
    }
}

/// Document record.
#[derive(Clone, Debug)]
pub struct Document {
    pub id: DocumentId,
    pub filename: String,
    pub original_filename: String,
    pub custom_filename: String,
    pub course_type: String,
    pub department: String,
    pub semester: String,
    pub category: String,
    pub subject_id: Option<SubjectId>,
    pub subject_name: Option<String>, // Legacy uploads carry only the name
    pub kind: DocumentKind,
    pub size: Option<String>,
    pub storage_path: String,
    pub uploader: Option<PrincipalId>, // None for legacy/anonymous uploads

    // Moderation state
    pub verified: bool,
    pub verified_by: Option<PrincipalId>,
    pub verified_at: Option<DateTime<Utc>>,

    pub uploaded_at: DateTime<Utc>,
}

/// Parameters for creating a document
#[derive(Clone, Debug)]
pub struct CreateDocumentParams {
    pub filename: String,
    pub original_filename: String,
    pub custom_filename: String,
    pub course_type: String,
    pub department: String,
    pub semester: String,
    pub category: String,
    pub subject_id: Option<SubjectId>,
    pub subject_name: Option<String>,
    pub kind: DocumentKind,
    pub size: Option<String>,
    pub storage_path: String,
    pub uploader: Option<PrincipalId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_kind_roundtrip() {
        for kind in [DocumentKind::QuestionPaper, DocumentKind::Syllabus] {
            let parsed: DocumentKind = kind.as_str().parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_document_kind_parse_invalid() {
        assert!("notes".parse::<DocumentKind>().is_err());
        assert!("QP".parse::<DocumentKind>().is_err()); // Case sensitive
    }

    #[test]
    fn test_document_kind_default_is_question_paper() {
        assert_eq!(DocumentKind::default(), DocumentKind::QuestionPaper);
    }
}
