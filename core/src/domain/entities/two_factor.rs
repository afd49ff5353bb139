//! Pending two-factor setup entity.

use serde::{Deserialize, Serialize};

/// A generated-but-not-yet-trusted TOTP secret.
///
/// Lives in the pending store under a short TTL until the user proves
/// possession of the secret by submitting a valid code, at which point the
/// secret is committed to the user record and this entry is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactorSetup {
    /// Base32-encoded TOTP secret
    pub secret: String,

    /// otpauth:// provisioning URL for authenticator apps
    pub otp_url: String,
}

impl TwoFactorSetup {
    pub fn new(secret: impl Into<String>, otp_url: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            otp_url: otp_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_round_trips_through_json() {
        let setup = TwoFactorSetup::new("JBSWY3DP", "otpauth://totp/KeyGate:user?secret=JBSWY3DP");

        let json = serde_json::to_string(&setup).unwrap();
        let back: TwoFactorSetup = serde_json::from_str(&json).unwrap();

        assert_eq!(setup, back);
    }
}
