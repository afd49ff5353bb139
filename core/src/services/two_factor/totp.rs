//! Time-based one-time password primitives.
//!
//! Standard TOTP: SHA-1, 30-second step, 6 digits, one step of clock-skew
//! tolerance either side. Secrets are presented base32-encoded (RFC 4648,
//! no padding) so authenticator apps can import them.

use base32::Alphabet;
use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use rand::RngCore;
use totp_lite::{totp_custom, Sha1};

/// TOTP time step in seconds
pub const STEP_SECONDS: u64 = 30;

/// Number of code digits
pub const CODE_DIGITS: u32 = 6;

/// Secret length in bytes before encoding
pub const SECRET_BYTES: usize = 20;

const ALPHABET: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Generates a fresh base32-encoded secret.
pub fn generate_secret() -> String {
    let mut bytes = [0u8; SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    base32::encode(ALPHABET, &bytes)
}

/// Builds the otpauth provisioning URL encoded into setup QR codes.
pub fn provisioning_url(issuer: &str, account: &str, secret: &str) -> String {
    format!(
        "otpauth://totp/{}:{}?secret={}&issuer={}",
        urlencoding::encode(issuer),
        urlencoding::encode(account),
        secret,
        urlencoding::encode(issuer),
    )
}

/// The code for `secret` at the step containing `now`.
///
/// Returns `None` when the secret does not decode.
pub fn code(secret: &str, now: DateTime<Utc>) -> Option<String> {
    let ts = u64::try_from(now.timestamp()).ok()?;
    let bytes = base32::decode(ALPHABET, secret)?;
    Some(totp_custom::<Sha1>(STEP_SECONDS, CODE_DIGITS, &bytes, ts))
}

/// Verifies a code against a secret at `now`, tolerating one step of skew.
///
/// Empty codes, malformed codes, and undecodable secrets are all reported
/// uniformly as invalid; nothing reveals which check failed.
pub fn verify_code(secret: &str, code: &str, now: DateTime<Utc>) -> bool {
    if code.len() != CODE_DIGITS as usize || !code.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let bytes = match base32::decode(ALPHABET, secret) {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return false,
    };

    let ts = now.timestamp();
    let step = STEP_SECONDS as i64;

    let mut matched = false;
    for offset in [-step, 0, step] {
        let t = ts + offset;
        if t < 0 {
            continue;
        }
        let candidate = totp_custom::<Sha1>(STEP_SECONDS, CODE_DIGITS, &bytes, t as u64);
        if constant_time_eq(candidate.as_bytes(), code.as_bytes()) {
            matched = true;
        }
    }
    matched
}
