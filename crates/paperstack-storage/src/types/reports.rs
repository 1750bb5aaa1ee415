//! Report types and their review lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{DocumentId, PrincipalId, ReportId};

/// Review state of a report. Reports are born `Pending` and leave that state
/// exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Reviewed,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Reviewed => "reviewed",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "reviewed" => Ok(ReportStatus::Reviewed),
            "dismissed" => Ok(ReportStatus::Dismissed),
            _ => Err(format!("invalid report status: {}", s)),
        }
    }
}

/// Terminal outcome an admin can assign to a pending report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewOutcome {
    Reviewed,
    Dismissed,
}

impl ReviewOutcome {
    pub fn as_status(&self) -> ReportStatus {
        match self {
            ReviewOutcome::Reviewed => ReportStatus::Reviewed,
            ReviewOutcome::Dismissed => ReportStatus::Dismissed,
        }
    }
}

/// Report record.
#[derive(Clone, Debug)]
pub struct Report {
    pub id: ReportId,
    pub document_id: DocumentId,
    pub reporter_id: PrincipalId,
    pub reason: String,
    pub status: ReportStatus,
    pub reviewed_by: Option<PrincipalId>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a report
#[derive(Clone, Debug)]
pub struct CreateReportParams {
    pub document_id: DocumentId,
    pub reporter_id: PrincipalId,
    pub reason: String,
}

/// Parameters for resolving a pending report
#[derive(Clone, Debug)]
pub struct ResolveReportParams {
    pub outcome: ReviewOutcome,
    pub reviewer: PrincipalId,
    pub notes: Option<String>,
    pub at: DateTime<Utc>,
}
