//! Time-based one-time codes (RFC 6238).
//!
//! HMAC-SHA1 over the 30 second time step, truncated to 6 digits. The shared
//! secret is RFC 4648 base32, as issued by authenticator app enrollment.

use crate::error::{PublishError, Result};
use base32::Alphabet;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Seconds per code window
pub const PERIOD_SECS: u64 = 30;

/// Code length
pub const DIGITS: u32 = 6;

/// Generate the code for the current time window.
pub fn generate_now(secret: &str) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let now = u64::try_from(now).map_err(|_| PublishError::Credentials {
        reason: "system clock is before the Unix epoch".to_string(),
    })?;
    generate_at(secret, now)
}

/// Generate the code for the window containing `unix_secs`.
pub fn generate_at(secret: &str, unix_secs: u64) -> Result<String> {
    let key = decode_secret(secret)?;
    let counter = unix_secs / PERIOD_SECS;

    let mut mac = HmacSha1::new_from_slice(&key).map_err(|e| PublishError::Credentials {
        reason: format!("unusable one-time password secret: {}", e),
    })?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    // dynamic truncation
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);

    let code = binary % 10u32.pow(DIGITS);
    Ok(format!("{:0width$}", code, width = DIGITS as usize))
}

fn decode_secret(secret: &str) -> Result<Vec<u8>> {
    let normalized: String = secret
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if normalized.is_empty() {
        return Err(PublishError::Credentials {
            reason: "one-time password secret is empty".to_string(),
        });
    }

    base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized).ok_or_else(|| {
        PublishError::Credentials {
            reason: "one-time password secret is not valid base32".to_string(),
        }
    })
}
