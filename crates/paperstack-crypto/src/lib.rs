//! Code hashing for the PaperStack portal core.
//!
//! One-time codes are persisted only as Argon2id digests keyed by the address
//! being proven; the plaintext never reaches storage. Digest comparison is
//! constant-time.

use subtle::ConstantTimeEq;
use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error)]
pub enum KdfError {
    #[error("invalid kdf parameters")]
    InvalidParams(argon2::Error),
    #[error("key derivation failed")]
    DerivationFailed(argon2::Error),
}

const MIB: u32 = 1024;
const MEMORY_COST_KIB: u32 = 64 * MIB;

/// Hash data using Argon2id with a salt.
/// Returns hex-encoded 32-byte hash.
///
/// Argon2id rejects salts shorter than 8 bytes; callers salt verification
/// codes with the full lowercased email address.
pub fn argon2_hash(data: &[u8], salt: &[u8]) -> Result<String, KdfError> {
    let params =
        argon2::Params::new(MEMORY_COST_KIB, 3, 1, Some(32)).map_err(KdfError::InvalidParams)?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut hash = Zeroizing::new([0u8; 32]);

    argon2
        .hash_password_into(data, salt, hash.as_mut())
        .map_err(KdfError::DerivationFailed)?;

    Ok(hex::encode(hash.as_ref()))
}

/// Constant-time comparison of two hex-encoded digests.
pub fn digests_match(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
