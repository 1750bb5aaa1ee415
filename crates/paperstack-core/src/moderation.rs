//! Moderation workflow: document verification and the report lifecycle.
//!
//! Independent of the OTP machinery except for reading the acting
//! principal's current role, which is always loaded fresh from the store,
//! never trusted from the caller.

use paperstack_storage::{
    CreateReportParams, Document, DocumentId, PrincipalId, Report, ReportId, ResolveReportParams,
    ReviewOutcome, StoreError,
};

use crate::{CoreError, PortalCore};

impl PortalCore {
    /// File a report against a document. Any principal may report; the
    /// report always starts pending.
    pub async fn submit_report(
        &self,
        document_id: &DocumentId,
        reporter_id: &PrincipalId,
        reason: &str,
    ) -> Result<Report, CoreError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(CoreError::InvalidArgument("reason is required"));
        }

        // The reporter must exist; the store checks the document.
        self.store.get_principal(reporter_id).await?;

        let report = self
            .store
            .create_report(&CreateReportParams {
                document_id: *document_id,
                reporter_id: *reporter_id,
                reason: reason.to_string(),
            })
            .await?;

        tracing::info!(report = ?report.id, document = ?document_id, "report submitted");
        Ok(report)
    }

    /// Resolve a pending report. Admin only; stamps reviewer identity and
    /// time. A report that already left pending cannot be re-reviewed:
    /// that's an [`CoreError::IllegalTransition`], not a silent overwrite.
    pub async fn review_report(
        &self,
        report_id: &ReportId,
        reviewer_id: &PrincipalId,
        outcome: ReviewOutcome,
        notes: Option<String>,
    ) -> Result<Report, CoreError> {
        let reviewer = self.store.get_principal(reviewer_id).await?;
        if !reviewer.role.can_moderate() {
            return Err(CoreError::Forbidden);
        }

        let params = ResolveReportParams {
            outcome,
            reviewer: *reviewer_id,
            notes,
            at: self.clock.now(),
        };
        match self.store.resolve_report(report_id, &params).await {
            Ok(report) => {
                tracing::info!(
                    report = ?report.id,
                    status = report.status.as_str(),
                    "report reviewed"
                );
                Ok(report)
            }
            Err(StoreError::Conflict) => {
                Err(CoreError::IllegalTransition("report already reviewed"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Mark a document as verified, stamping verifier identity and time.
    /// Admin only. Re-verifying restamps; there is no unverify transition.
    pub async fn verify_document(
        &self,
        document_id: &DocumentId,
        verifier_id: &PrincipalId,
    ) -> Result<Document, CoreError> {
        let verifier = self.store.get_principal(verifier_id).await?;
        if !verifier.role.can_moderate() {
            return Err(CoreError::Forbidden);
        }

        let document = self
            .store
            .mark_document_verified(document_id, verifier_id, self.clock.now())
            .await?;

        tracing::info!(document = ?document.id, "document verified");
        Ok(document)
    }

    /// The review queue: all reports still pending.
    pub async fn pending_reports(&self) -> Result<Vec<Report>, CoreError> {
        Ok(self.store.list_pending_reports().await?)
    }
}
