mod email;
mod images;

pub use email::*;
pub use images::*;

use crate::models::Secret;

/// Expiry configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct ExpiryConfig {
    /// How long reset codes should last for (in seconds)
    pub expire_reset_code: i64,
    /// How long identity tokens should last for (in seconds)
    pub expire_identity_token: i64,
}

impl Default for ExpiryConfig {
    fn default() -> ExpiryConfig {
        ExpiryConfig {
            expire_reset_code: 600,
            expire_identity_token: 3600 * 24,
        }
    }
}

/// Gatekeep configuration
#[derive(Default, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Secret used to sign identity tokens
    pub token_secret: Secret,

    /// Email delivery
    pub email_delivery: EmailConfig,

    /// Profile image hosting
    pub image_host: ImageHost,

    /// Expiry settings
    pub expiry: ExpiryConfig,
}
