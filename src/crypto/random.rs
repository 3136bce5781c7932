//! Secure random byte source
//!
//! Thin wrapper over the operating system CSPRNG. A failure here means the
//! platform cannot provide entropy, which is an environment fault.

use crate::error::{AegisError, AegisResult};

/// Fill a fixed-size array with cryptographically secure random bytes
pub fn random_bytes<const N: usize>() -> AegisResult<[u8; N]> {
    let mut buf = [0u8; N];
    getrandom::getrandom(&mut buf)
        .map_err(|e| AegisError::Environment(format!("Secure random source unavailable: {}", e)))?;
    Ok(buf)
}
