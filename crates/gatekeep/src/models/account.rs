use iso8601_timestamp::Timestamp;

/// Password reset information
///
/// Fingerprint and expiry are set together when a code is issued and
/// cleared together when the code is consumed or invalidated.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PasswordReset {
    /// One-way fingerprint of the code required to continue the reset
    pub code_fingerprint: String,
    /// Time at which this code expires
    pub expiry: Timestamp,
}

/// Account model
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    /// Unique Id
    #[serde(rename = "_id")]
    pub id: String,

    /// Unique username
    pub username: String,

    /// User's email
    pub email: String,

    /// Argon2 hashed password
    pub password: String,

    /// Externally hosted profile image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,

    /// Active password reset, if any
    pub password_reset: Option<PasswordReset>,

    /// Whether the active reset has passed code verification
    #[serde(default)]
    pub otp_verified: bool,
}
