//! In-memory [`Store`] implementation.
//!
//! This implementation is suitable for:
//! - Development and testing
//! - Single-process demos
//!
//! All state lives behind one mutex, which gives every mutator the
//! per-record atomicity the storage contract requires: no two transitions
//! for the same principal can interleave between read and write. Deployments
//! that need durability implement [`Store`] against a real database instead.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use paperstack_storage::*;

#[derive(Default)]
struct State {
    principals: HashMap<PrincipalId, Principal>,
    documents: HashMap<DocumentId, Document>,
    reports: HashMap<ReportId, Report>,
    subjects: HashMap<SubjectId, Subject>,
}

/// In-memory store. Cheap to construct, nothing survives drop.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A poisoned lock means a panic mid-mutation in this process; the
        // test-oriented backend has no recovery story beyond propagating.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    // ───────────────────────────────────── Principals ─────────────────────────────────────

    async fn create_principal(
        &self,
        params: &CreatePrincipalParams,
    ) -> Result<PrincipalId, StoreError> {
        let mut state = self.lock();
        let email = params.email.to_lowercase();
        if state.principals.values().any(|p| p.email == email) {
            return Err(StoreError::AlreadyExists);
        }
        let id = PrincipalId(Uuid::new_v4());
        state.principals.insert(
            id,
            Principal {
                id,
                display_name: params.display_name.clone(),
                email,
                role: Role::Guest,
                otp_hash: None,
                otp_email: None,
                otp_expires_at: None,
                otp_attempts: 0,
                otp_lockout_until: None,
                verified_email: None,
                last_login_at: None,
                last_verified_at: None,
                reverify_interval_days: DEFAULT_REVERIFY_INTERVAL_DAYS,
                session_epoch: 1,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get_principal(&self, principal_id: &PrincipalId) -> Result<Principal, StoreError> {
        self.lock()
            .principals
            .get(principal_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_principal_by_email(&self, email: &str) -> Result<Principal, StoreError> {
        let email = email.to_lowercase();
        self.lock()
            .principals
            .values()
            .find(|p| p.email == email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    // ───────────────────────────────────── OTP state ──────────────────────────────────────

    async fn set_otp(
        &self,
        principal_id: &PrincipalId,
        params: &SetOtpParams,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.otp_hash = Some(params.code_hash.clone());
        principal.otp_email = Some(params.email.to_lowercase());
        principal.otp_expires_at = Some(params.expires_at);
        principal.otp_attempts = 0;
        principal.otp_lockout_until = None;
        Ok(())
    }

    async fn clear_otp(&self, principal_id: &PrincipalId) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.otp_hash = None;
        principal.otp_email = None;
        principal.otp_expires_at = None;
        principal.otp_attempts = 0;
        principal.otp_lockout_until = None;
        Ok(())
    }

    async fn increment_otp_attempts(
        &self,
        principal_id: &PrincipalId,
    ) -> Result<i32, StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.otp_attempts += 1;
        Ok(principal.otp_attempts)
    }

    async fn set_otp_lockout(
        &self,
        principal_id: &PrincipalId,
        until: chrono::DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.otp_lockout_until = Some(until);
        Ok(())
    }

    async fn reset_otp_attempts(&self, principal_id: &PrincipalId) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.otp_attempts = 0;
        principal.otp_lockout_until = None;
        Ok(())
    }

    // ───────────────────────────────────── Trust state ────────────────────────────────────

    async fn mark_principal_verified(
        &self,
        principal_id: &PrincipalId,
        params: &MarkVerifiedParams,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let email = params.verified_email.to_lowercase();
        if state
            .principals
            .values()
            .any(|p| p.id != *principal_id && p.verified_email.as_deref() == Some(email.as_str()))
        {
            return Err(StoreError::AlreadyExists);
        }
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.role = params.role;
        principal.verified_email = Some(email);
        principal.last_verified_at = Some(params.at);
        principal.last_login_at = Some(params.at);
        principal.otp_hash = None;
        principal.otp_email = None;
        principal.otp_expires_at = None;
        principal.otp_attempts = 0;
        principal.otp_lockout_until = None;
        Ok(())
    }

    async fn touch_login(
        &self,
        principal_id: &PrincipalId,
        at: chrono::DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.last_login_at = Some(at);
        Ok(())
    }

    async fn bump_session_epoch(&self, principal_id: &PrincipalId) -> Result<i64, StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.session_epoch += 1;
        Ok(principal.session_epoch)
    }

    async fn set_role(&self, principal_id: &PrincipalId, role: Role) -> Result<(), StoreError> {
        let mut state = self.lock();
        let principal = state
            .principals
            .get_mut(principal_id)
            .ok_or(StoreError::NotFound)?;
        principal.role = role;
        Ok(())
    }

    // ───────────────────────────────────── Documents ──────────────────────────────────────

    async fn create_document(
        &self,
        params: &CreateDocumentParams,
    ) -> Result<DocumentId, StoreError> {
        let mut state = self.lock();
        let id = DocumentId(Uuid::new_v4());
        state.documents.insert(
            id,
            Document {
                id,
                filename: params.filename.clone(),
                original_filename: params.original_filename.clone(),
                custom_filename: params.custom_filename.clone(),
                course_type: params.course_type.clone(),
                department: params.department.clone(),
                semester: params.semester.clone(),
                category: params.category.clone(),
                subject_id: params.subject_id,
                subject_name: params.subject_name.clone(),
                kind: params.kind,
                size: params.size.clone(),
                storage_path: params.storage_path.clone(),
                uploader: params.uploader,
                verified: false,
                verified_by: None,
                verified_at: None,
                uploaded_at: Utc::now(),
            },
        );
        Ok(id)
    }

    async fn get_document(&self, document_id: &DocumentId) -> Result<Document, StoreError> {
        self.lock()
            .documents
            .get(document_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, StoreError> {
        let mut docs: Vec<Document> = self.lock().documents.values().cloned().collect();
        docs.sort_by_key(|d| d.uploaded_at);
        Ok(docs)
    }

    async fn mark_document_verified(
        &self,
        document_id: &DocumentId,
        verifier: &PrincipalId,
        at: chrono::DateTime<Utc>,
    ) -> Result<Document, StoreError> {
        let mut state = self.lock();
        let document = state
            .documents
            .get_mut(document_id)
            .ok_or(StoreError::NotFound)?;
        document.verified = true;
        document.verified_by = Some(*verifier);
        document.verified_at = Some(at);
        Ok(document.clone())
    }

    // ───────────────────────────────────── Reports ────────────────────────────────────────

    async fn create_report(&self, params: &CreateReportParams) -> Result<Report, StoreError> {
        let mut state = self.lock();
        if !state.documents.contains_key(&params.document_id) {
            return Err(StoreError::NotFound);
        }
        let id = ReportId(Uuid::new_v4());
        let report = Report {
            id,
            document_id: params.document_id,
            reporter_id: params.reporter_id,
            reason: params.reason.clone(),
            status: ReportStatus::Pending,
            reviewed_by: None,
            reviewed_at: None,
            notes: None,
            created_at: Utc::now(),
        };
        state.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn get_report(&self, report_id: &ReportId) -> Result<Report, StoreError> {
        self.lock()
            .reports
            .get(report_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_reports_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .lock()
            .reports
            .values()
            .filter(|r| r.document_id == *document_id)
            .cloned()
            .collect();
        reports.sort_by_key(|r| r.created_at);
        Ok(reports)
    }

    async fn list_pending_reports(&self) -> Result<Vec<Report>, StoreError> {
        let mut reports: Vec<Report> = self
            .lock()
            .reports
            .values()
            .filter(|r| r.status == ReportStatus::Pending)
            .cloned()
            .collect();
        reports.sort_by_key(|r| r.created_at);
        Ok(reports)
    }

    async fn resolve_report(
        &self,
        report_id: &ReportId,
        params: &ResolveReportParams,
    ) -> Result<Report, StoreError> {
        let mut state = self.lock();
        let report = state
            .reports
            .get_mut(report_id)
            .ok_or(StoreError::NotFound)?;
        if report.status != ReportStatus::Pending {
            return Err(StoreError::Conflict);
        }
        report.status = params.outcome.as_status();
        report.reviewed_by = Some(params.reviewer);
        report.reviewed_at = Some(params.at);
        report.notes = params.notes.clone();
        Ok(report.clone())
    }

    // ───────────────────────────────────── Subjects ───────────────────────────────────────

    async fn create_subject(&self, params: &CreateSubjectParams) -> Result<SubjectId, StoreError> {
        let mut state = self.lock();
        if state.subjects.values().any(|s| s.code == params.code) {
            return Err(StoreError::AlreadyExists);
        }
        let id = SubjectId(Uuid::new_v4());
        let now = Utc::now();
        state.subjects.insert(
            id,
            Subject {
                id,
                code: params.code.clone(),
                name: params.name.clone(),
                course_type: params.course_type.clone(),
                department: params.department.clone(),
                semester: params.semester.clone(),
                category: params.category.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn get_subject_by_code(&self, code: &str) -> Result<Subject, StoreError> {
        self.lock()
            .subjects
            .values()
            .find(|s| s.code == code)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, StoreError> {
        let mut subjects: Vec<Subject> = self.lock().subjects.values().cloned().collect();
        subjects.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(subjects)
    }
}
