//! Access-control core for the PaperStack document portal.
//!
//! Three state machines live here:
//!
//! - the **OTP engine** ([`otp`]): issue, verify, expire, and rate-limit
//!   one-time codes proving control of an email address;
//! - the **trust state machine** ([`trust`]): role promotion on successful
//!   verification, re-verification decay, session invalidation by epoch;
//! - the **moderation workflow** ([`moderation`]): per-document verification
//!   and the report review lifecycle.
//!
//! Persistence, email delivery, and the clock are collaborators injected at
//! construction; every transition is a request-scoped read-modify-write
//! against the [`Store`].

use std::sync::Arc;

use thiserror::Error;

use paperstack_crypto::KdfError;
use paperstack_email::EmailProvider;
use paperstack_storage::{Store, StoreError};

pub mod clock;
pub mod moderation;
pub mod otp;
pub mod trust;

pub use clock::{Clock, ManualClock, SystemClock};

/// Recoverable, caller-visible outcomes of core operations.
///
/// None of these is process-fatal; the only fail-fast path is email
/// configuration validation, which happens before a [`PortalCore`] exists.
#[derive(Debug, Error)]
pub enum CoreError {
    /// OTP verify called with no outstanding code.
    #[error("no verification code outstanding")]
    NotAuthenticated,

    /// Verify attempted during the lockout window.
    #[error("too many failed attempts; locked out until {retry_after}")]
    LockedOut {
        retry_after: chrono::DateTime<chrono::Utc>,
    },

    /// A code is outstanding but past its expiry.
    #[error("verification code expired")]
    Expired,

    /// Wrong code. `locked_out` reports whether this failure armed the
    /// lockout window.
    #[error("wrong verification code ({attempts_remaining} attempts remaining)")]
    Mismatch {
        attempts_remaining: i32,
        locked_out: bool,
    },

    /// The address is already bound to another principal.
    #[error("email address already verified by another account")]
    EmailTaken,

    /// A lifecycle transition that isn't legal from the current state.
    #[error("illegal transition: {0}")]
    IllegalTransition(&'static str),

    /// The acting principal's role doesn't permit the action.
    #[error("action requires an administrator")]
    Forbidden,

    /// The notification gateway failed or timed out. An already-issued code
    /// stays valid; the caller decides whether to re-request.
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("hash failure: {0}")]
    Hash(#[from] KdfError),
}

/// The portal core service: store + clock + notification gateway.
///
/// Cheap to clone; all collaborators are shared.
#[derive(Clone)]
pub struct PortalCore {
    pub(crate) store: Arc<dyn Store>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) mailer: Arc<dyn EmailProvider>,
}

impl PortalCore {
    pub fn new(
        store: Arc<dyn Store>,
        clock: Arc<dyn Clock>,
        mailer: Arc<dyn EmailProvider>,
    ) -> Self {
        Self {
            store,
            clock,
            mailer,
        }
    }

    /// The backing store, for callers that need read access beyond the
    /// transition API (listing documents, loading a principal for display).
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }
}
