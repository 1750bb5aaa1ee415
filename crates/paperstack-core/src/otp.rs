//! One-time passcode engine: issuance, verification, lockout, delivery.

use chrono::Duration;
use rand::Rng;

use paperstack_crypto::{argon2_hash, digests_match};
use paperstack_email::EmailContent;
use paperstack_storage::{Principal, PrincipalId, Role, SetOtpParams};

use crate::{CoreError, PortalCore};

/// Digits in a verification code.
pub const OTP_CODE_LEN: usize = 6;

/// Minutes a code stays verifiable after issuance.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Consecutive failures before the lockout arms.
pub const MAX_OTP_ATTEMPTS: i32 = 5;

/// Minutes a lockout lasts, measured from the failure that armed it.
pub const LOCKOUT_MINUTES: i64 = 15;

/// Upper bound on one delivery attempt.
pub(crate) const DELIVERY_TIMEOUT_SECS: u64 = 30;

/// Generate a verification code from the given RNG.
///
/// Each digit is drawn independently, so leading zeros are as likely as any
/// other digit.
pub fn generate_code_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..OTP_CODE_LEN)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generate a verification code from the thread-local CSPRNG.
pub fn generate_code() -> String {
    let mut rng = rand::rng();
    generate_code_with(&mut rng)
}

impl PortalCore {
    /// Issue a fresh code for `principal_id`, to be proven against
    /// `target_email`.
    ///
    /// Stores only the digest (salted by the lowercased address) plus expiry,
    /// resetting attempt and lockout state. Any outstanding code is silently
    /// replaced and becomes permanently unverifiable. Returns the plaintext
    /// for out-of-band delivery; the plaintext is never persisted.
    pub async fn issue_otp(
        &self,
        principal_id: &PrincipalId,
        target_email: &str,
    ) -> Result<String, CoreError> {
        let email = target_email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(CoreError::InvalidArgument("target email"));
        }

        let principal = self.store.get_principal(principal_id).await?;

        let code = generate_code();
        let code_hash = argon2_hash(code.as_bytes(), email.as_bytes())?;
        let expires_at = self.clock.now() + Duration::minutes(OTP_TTL_MINUTES);

        self.store
            .set_otp(
                principal_id,
                &SetOtpParams {
                    code_hash,
                    email,
                    expires_at,
                },
            )
            .await?;

        tracing::info!(principal = %principal.email, "issued verification code");
        Ok(code)
    }

    /// Issue a code and email it to the target address.
    ///
    /// A delivery failure surfaces as [`CoreError::DeliveryFailed`] but does
    /// NOT invalidate the stored code: it is unreachable, not leaked, and the
    /// caller may simply re-request (which replaces it).
    pub async fn begin_email_verification(
        &self,
        principal_id: &PrincipalId,
        target_email: &str,
    ) -> Result<(), CoreError> {
        let principal = self.store.get_principal(principal_id).await?;
        let code = self.issue_otp(principal_id, target_email).await?;

        let content = EmailContent::otp_code(&principal.display_name, &code);
        self.deliver(&target_email.trim().to_lowercase(), &content)
            .await
    }

    /// Check a candidate code against the outstanding one.
    ///
    /// Ordering matters and none of the early exits consumes an attempt:
    /// no outstanding code, then lockout (checked before expiry), then
    /// expiry. Only a hash mismatch against a live code counts as a failure;
    /// the failure that reaches the attempt cap arms the lockout. On success
    /// the attempt state resets but the code is left in place; the caller
    /// clears it (or completes the verified transition, which clears it).
    pub async fn verify_otp(
        &self,
        principal_id: &PrincipalId,
        candidate: &str,
    ) -> Result<(), CoreError> {
        let principal = self.store.get_principal(principal_id).await?;

        let (Some(stored_hash), Some(expires_at), Some(otp_email)) = (
            principal.otp_hash.as_deref(),
            principal.otp_expires_at,
            principal.otp_email.as_deref(),
        ) else {
            return Err(CoreError::NotAuthenticated);
        };

        let now = self.clock.now();

        if let Some(until) = principal.otp_lockout_until {
            if now < until {
                return Err(CoreError::LockedOut { retry_after: until });
            }
        }

        if now > expires_at {
            return Err(CoreError::Expired);
        }

        let candidate_hash = argon2_hash(candidate.as_bytes(), otp_email.as_bytes())?;
        if digests_match(&candidate_hash, stored_hash) {
            self.store.reset_otp_attempts(principal_id).await?;
            return Ok(());
        }

        let attempts = self.store.increment_otp_attempts(principal_id).await?;
        let locked_out = attempts >= MAX_OTP_ATTEMPTS;
        if locked_out {
            let until = now + Duration::minutes(LOCKOUT_MINUTES);
            self.store.set_otp_lockout(principal_id, until).await?;
            tracing::warn!(
                principal = %principal.email,
                attempts,
                "verification locked out until {}",
                until
            );
        }

        Err(CoreError::Mismatch {
            attempts_remaining: (MAX_OTP_ATTEMPTS - attempts).max(0),
            locked_out,
        })
    }

    /// Wipe the outstanding code and reset attempt state. Called after a
    /// verification flow completes so the code cannot be replayed.
    pub async fn clear_otp(&self, principal_id: &PrincipalId) -> Result<(), CoreError> {
        self.store.clear_otp(principal_id).await?;
        Ok(())
    }

    /// Verify a candidate code and, on success, complete the whole flow:
    /// promote the principal, bind the address the code was sent to, and
    /// send a best-effort confirmation email (its failure is logged, not
    /// surfaced; the trust transition already happened).
    pub async fn complete_email_verification(
        &self,
        principal_id: &PrincipalId,
        candidate: &str,
    ) -> Result<Principal, CoreError> {
        let principal = self.store.get_principal(principal_id).await?;
        let Some(proven_email) = principal.otp_email.clone() else {
            return Err(CoreError::NotAuthenticated);
        };

        self.verify_otp(principal_id, candidate).await?;

        // Re-verification must not demote an admin back to contributor.
        let target_role = if principal.role == Role::Admin {
            Role::Admin
        } else {
            Role::Contributor
        };
        let updated = self
            .mark_verified(principal_id, &proven_email, target_role)
            .await?;

        let content = EmailContent::access_granted(&updated.display_name);
        if let Err(e) = self.deliver(&proven_email, &content).await {
            tracing::warn!(error = %e, "verification succeeded but confirmation email failed");
        }

        Ok(updated)
    }

    /// Bounded-time delivery through the notification gateway.
    pub(crate) async fn deliver(
        &self,
        to: &str,
        content: &EmailContent,
    ) -> Result<(), CoreError> {
        let send = self.mailer.send(to, content);
        match tokio::time::timeout(std::time::Duration::from_secs(DELIVERY_TIMEOUT_SECS), send)
            .await
        {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "failed to send email to {}", to);
                Err(CoreError::DeliveryFailed(e.to_string()))
            }
            Err(_) => {
                tracing::warn!("email delivery to {} timed out", to);
                Err(CoreError::DeliveryFailed("delivery timed out".to_string()))
            }
        }
    }
}
