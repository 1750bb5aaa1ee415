//! Subject catalog types.

use chrono::{DateTime, Utc};

use super::SubjectId;

/// Subject record (the classification catalog documents attach to).
#[derive(Clone, Debug)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String, // Unique, e.g. "CS8501"
    pub name: String,
    pub course_type: String, // UG, PG, MBA
    pub department: String,
    pub semester: String,
    pub category: String, // CAT, ESE, SAT, Practical
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parameters for creating a subject
#[derive(Clone, Debug)]
pub struct CreateSubjectParams {
    pub code: String,
    pub name: String,
    pub course_type: String,
    pub department: String,
    pub semester: String,
    pub category: String,
}
