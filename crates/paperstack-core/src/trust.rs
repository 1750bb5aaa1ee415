//! Trust state machine: role promotion, re-verification decay, session
//! invalidation.
//!
//! Re-verification decay bounds the lifetime of a compromised-but-unrevoked
//! grant: contributors must periodically re-prove control of their verified
//! address. Session epochs invalidate outstanding sessions without a session
//! store purge: validators compare the epoch embedded in a token against the
//! principal's current one on every request.

use chrono::{DateTime, Duration, Utc};

use paperstack_storage::{MarkVerifiedParams, Principal, PrincipalId, Role, StoreError};

use crate::{CoreError, PortalCore};

/// True if the principal has never verified, or the last verification is
/// older than their re-verification interval.
pub fn is_verification_expired(principal: &Principal, now: DateTime<Utc>) -> bool {
    match principal.last_verified_at {
        None => true,
        Some(at) => now > at + Duration::days(principal.reverify_interval_days),
    }
}

/// Whole days until re-verification is required; 0 if never verified or
/// already expired, never negative.
pub fn days_until_reverify(principal: &Principal, now: DateTime<Utc>) -> i64 {
    match principal.last_verified_at {
        None => 0,
        Some(at) => {
            let expiry = at + Duration::days(principal.reverify_interval_days);
            (expiry - now).num_days().max(0)
        }
    }
}

/// Session validity contract: a token is valid iff it embeds the principal's
/// current epoch.
pub fn session_valid(principal: &Principal, token_epoch: i64) -> bool {
    principal.session_epoch == token_epoch
}

impl PortalCore {
    /// The single transition into elevated trust: set the role, bind the
    /// proven address, stamp `last_verified_at`/`last_login_at`, and wipe
    /// the OTP, all in one store write.
    ///
    /// `target_role` exists so re-verification of an admin doesn't demote
    /// them to contributor; it can never be `Guest` (demotion is its own
    /// explicit operation). An address already bound to another principal
    /// surfaces as [`CoreError::EmailTaken`].
    pub async fn mark_verified(
        &self,
        principal_id: &PrincipalId,
        proven_email: &str,
        target_role: Role,
    ) -> Result<Principal, CoreError> {
        if target_role == Role::Guest {
            return Err(CoreError::IllegalTransition(
                "verification cannot demote to guest",
            ));
        }

        let params = MarkVerifiedParams {
            verified_email: proven_email.trim().to_lowercase(),
            role: target_role,
            at: self.clock.now(),
        };
        match self
            .store
            .mark_principal_verified(principal_id, &params)
            .await
        {
            Ok(()) => {}
            Err(StoreError::AlreadyExists) => return Err(CoreError::EmailTaken),
            Err(e) => return Err(e.into()),
        }

        let principal = self.store.get_principal(principal_id).await?;
        tracing::info!(
            principal = %principal.email,
            role = principal.role.as_str(),
            "verification completed"
        );
        Ok(principal)
    }

    /// Stamp `last_login_at`. Called on every successful session
    /// establishment, independent of OTP state.
    pub async fn mark_login(&self, principal_id: &PrincipalId) -> Result<(), CoreError> {
        self.store
            .touch_login(principal_id, self.clock.now())
            .await?;
        Ok(())
    }

    /// Invalidate every outstanding session by bumping the epoch.
    /// Returns the new epoch.
    pub async fn invalidate_sessions(&self, principal_id: &PrincipalId) -> Result<i64, CoreError> {
        let epoch = self.store.bump_session_epoch(principal_id).await?;
        tracing::info!(?principal_id, epoch, "sessions invalidated");
        Ok(epoch)
    }

    /// Out-of-band admin grant. Not reachable through OTP verification.
    pub async fn promote_to_admin(&self, principal_id: &PrincipalId) -> Result<(), CoreError> {
        self.store.set_role(principal_id, Role::Admin).await?;
        tracing::info!(?principal_id, "promoted to admin");
        Ok(())
    }

    /// Explicit demotion back to guest. Also invalidates outstanding
    /// sessions: a downgraded principal must not keep riding an elevated
    /// session.
    pub async fn demote_to_guest(&self, principal_id: &PrincipalId) -> Result<(), CoreError> {
        self.store.set_role(principal_id, Role::Guest).await?;
        self.store.bump_session_epoch(principal_id).await?;
        tracing::info!(?principal_id, "demoted to guest");
        Ok(())
    }
}
