//! Time-stepped dynamic key generation and verification
//!
//! Keys are HMAC-SHA256 digests over the current time interval
//! (`unix_time / time_step`), encoded as URL-safe base64. Verification
//! accepts keys from adjacent intervals within a configurable tolerance to
//! absorb clock drift between peers. Without replay tracking, a key remains
//! valid for the whole accepted window.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Default time-step length in seconds
pub const DEFAULT_TIME_STEP: u64 = 10;

/// Default number of adjacent intervals accepted on either side
pub const DEFAULT_TOLERANCE: u64 = 1;

fn current_interval(time_step: u64) -> Result<i64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| Error::Other(format!("system clock before unix epoch: {e}")))?;
    Ok((now.as_secs() / time_step.max(1)) as i64)
}

fn key_for_interval(secret: &str, interval: i64) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| Error::Other(format!("invalid HMAC key: {e}")))?;
    mac.update(interval.to_string().as_bytes());
    Ok(URL_SAFE.encode(mac.finalize().into_bytes()))
}

/// Generate a dynamic key for the current time interval
///
/// # Errors
/// Returns error if the system clock is unusable.
pub fn generate_key(secret: &str, time_step: u64) -> Result<String> {
    key_for_interval(secret, current_interval(time_step)?)
}

/// Verify a received dynamic key against the accepted time window
///
/// The key is accepted if it matches any interval within `tolerance` steps of
/// the current one. Comparison is constant-time via the HMAC implementation.
///
/// # Errors
/// Returns `Error::InvalidKey` if the key is not valid base64 or does not
/// match any interval in the window.
pub fn verify_key(secret: &str, received: &str, time_step: u64, tolerance: u64) -> Result<()> {
    let received = URL_SAFE.decode(received).map_err(|_| Error::InvalidKey)?;
    let current = current_interval(time_step)?;
    let tolerance = tolerance as i64;

    for offset in -tolerance..=tolerance {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|e| Error::Other(format!("invalid HMAC key: {e}")))?;
        mac.update((current + offset).to_string().as_bytes());
        if mac.verify_slice(&received).is_ok() {
            return Ok(());
        }
    }

    Err(Error::InvalidKey)
}
