//! The Store trait that backends implement.

use crate::types::*;
use crate::StoreError;

/// The storage trait `paperstack-core` depends on.
///
/// Every mutator is atomic for the record it touches: between the read and
/// the write of one principal's OTP/lockout/session state, no other mutation
/// of that principal may interleave (row-level locking or equivalent).
/// Counters are incremented server-side for the same reason: two racing
/// failed verifications must not lose an update.
#[cfg_attr(feature = "test-support", mockall::automock)]
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    // ───────────────────────────────────── Principals ─────────────────────────────────────

    /// Create a new principal (returns generated ID). The primary email is
    /// unique; a duplicate fails with `AlreadyExists`.
    async fn create_principal(
        &self,
        params: &CreatePrincipalParams,
    ) -> Result<PrincipalId, StoreError>;

    /// Get principal by ID.
    async fn get_principal(&self, principal_id: &PrincipalId) -> Result<Principal, StoreError>;

    /// Get principal by primary email.
    async fn get_principal_by_email(&self, email: &str) -> Result<Principal, StoreError>;

    // ───────────────────────────────────── OTP state ──────────────────────────────────────

    /// Store a freshly issued OTP (hash + target address + expiry), resetting
    /// attempt and lockout state. Silently replaces any outstanding code.
    async fn set_otp(
        &self,
        principal_id: &PrincipalId,
        params: &SetOtpParams,
    ) -> Result<(), StoreError>;

    /// Wipe hash, target address, and expiry; reset attempt/lockout state.
    async fn clear_otp(&self, principal_id: &PrincipalId) -> Result<(), StoreError>;

    /// Increment the failed-attempt counter.
    /// Returns the new attempt count.
    async fn increment_otp_attempts(&self, principal_id: &PrincipalId)
        -> Result<i32, StoreError>;

    /// Arm the lockout window.
    async fn set_otp_lockout(
        &self,
        principal_id: &PrincipalId,
        until: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError>;

    /// Reset the failed-attempt counter and disarm the lockout.
    async fn reset_otp_attempts(&self, principal_id: &PrincipalId) -> Result<(), StoreError>;

    // ───────────────────────────────────── Trust state ────────────────────────────────────

    /// Apply the verified transition in one write: role, verified address,
    /// `last_verified_at`/`last_login_at`, and the OTP wipe. Fails with
    /// `AlreadyExists` if the address is already bound to another principal.
    async fn mark_principal_verified(
        &self,
        principal_id: &PrincipalId,
        params: &MarkVerifiedParams,
    ) -> Result<(), StoreError>;

    /// Stamp `last_login_at`.
    async fn touch_login(
        &self,
        principal_id: &PrincipalId,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError>;

    /// Increment the session epoch.
    /// Returns the new epoch.
    async fn bump_session_epoch(&self, principal_id: &PrincipalId) -> Result<i64, StoreError>;

    /// Overwrite the role (out-of-band admin grants and explicit demotions).
    async fn set_role(&self, principal_id: &PrincipalId, role: Role) -> Result<(), StoreError>;

    // ───────────────────────────────────── Documents ──────────────────────────────────────

    /// Create a document (returns generated ID).
    async fn create_document(
        &self,
        params: &CreateDocumentParams,
    ) -> Result<DocumentId, StoreError>;

    /// Get document by ID.
    async fn get_document(&self, document_id: &DocumentId) -> Result<Document, StoreError>;

    /// List all documents.
    async fn list_documents(&self) -> Result<Vec<Document>, StoreError>;

    /// Set the verified flag and stamp verifier identity and time.
    /// Returns the updated document.
    async fn mark_document_verified(
        &self,
        document_id: &DocumentId,
        verifier: &PrincipalId,
        at: chrono::DateTime<chrono::Utc>,
    ) -> Result<Document, StoreError>;

    // ───────────────────────────────────── Reports ────────────────────────────────────────

    /// Create a report (always starts pending).
    async fn create_report(&self, params: &CreateReportParams) -> Result<Report, StoreError>;

    /// Get report by ID.
    async fn get_report(&self, report_id: &ReportId) -> Result<Report, StoreError>;

    /// List all reports filed against a document.
    async fn list_reports_for_document(
        &self,
        document_id: &DocumentId,
    ) -> Result<Vec<Report>, StoreError>;

    /// List all reports awaiting review.
    async fn list_pending_reports(&self) -> Result<Vec<Report>, StoreError>;

    /// Move a pending report to its terminal status, stamping reviewer and
    /// time. Fails with `Conflict` if the report is no longer pending.
    /// Returns the updated report.
    async fn resolve_report(
        &self,
        report_id: &ReportId,
        params: &ResolveReportParams,
    ) -> Result<Report, StoreError>;

    // ───────────────────────────────────── Subjects ───────────────────────────────────────

    /// Create a subject (returns generated ID). The subject code is unique;
    /// a duplicate fails with `AlreadyExists`.
    async fn create_subject(&self, params: &CreateSubjectParams) -> Result<SubjectId, StoreError>;

    /// Get subject by code.
    async fn get_subject_by_code(&self, code: &str) -> Result<Subject, StoreError>;

    /// List all subjects.
    async fn list_subjects(&self) -> Result<Vec<Subject>, StoreError>;
}
