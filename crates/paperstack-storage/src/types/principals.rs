//! Principal (portal account) types.

use chrono::{DateTime, Utc};

use super::{PrincipalId, Role};

/// Days a verification stays fresh before the principal must re-prove
/// control of their verified address.
pub const DEFAULT_REVERIFY_INTERVAL_DAYS: i64 = 90;

/// Principal record.
///
/// The OTP fields describe at most one outstanding code: issuing a new code
/// overwrites all of them, so a replaced code is permanently unverifiable.
#[derive(Clone, Debug)]
pub struct Principal {
    pub id: PrincipalId,
    pub display_name: String,
    pub email: String, // Primary login address (lowercased, unique)
    pub role: Role,

    // OTP verification state
    pub otp_hash: Option<String>, // Hex Argon2id digest of the outstanding code
    pub otp_email: Option<String>, // Address the code was sent to (also the hash salt)
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub otp_attempts: i32, // Consecutive failures since issuance or last success
    pub otp_lockout_until: Option<DateTime<Utc>>,

    // Trust state
    pub verified_email: Option<String>, // Proven secondary address (unique once set)
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_verified_at: Option<DateTime<Utc>>,
    pub reverify_interval_days: i64,
    pub session_epoch: i64, // Bumping this invalidates every outstanding session

    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a principal
#[derive(Clone, Debug)]
pub struct CreatePrincipalParams {
    pub display_name: String,
    pub email: String, // Stored lowercased
}

/// Parameters for storing a freshly issued OTP.
///
/// Backends must apply these as one write: hash, target address, and expiry
/// land together, and the attempt/lockout counters reset.
#[derive(Clone, Debug)]
pub struct SetOtpParams {
    pub code_hash: String,
    pub email: String, // Address the code was delivered to
    pub expires_at: DateTime<Utc>,
}

/// Parameters for the single transition into elevated trust.
///
/// Backends apply role, verified address, both timestamps, and the OTP wipe
/// atomically; a `verified_email` collision fails the whole transition.
#[derive(Clone, Debug)]
pub struct MarkVerifiedParams {
    pub verified_email: String,
    pub role: Role,
    pub at: DateTime<Utc>,
}
