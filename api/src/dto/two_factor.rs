use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TwoFactorCodeRequest {
    /// 6-digit TOTP code
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwoFactorSetupResponse {
    pub secret: String,
    pub otp_url: String,
}

impl From<kg_core::domain::entities::two_factor::TwoFactorSetup> for TwoFactorSetupResponse {
    fn from(setup: kg_core::domain::entities::two_factor::TwoFactorSetup) -> Self {
        Self {
            secret: setup.secret,
            otp_url: setup.otp_url,
        }
    }
}
