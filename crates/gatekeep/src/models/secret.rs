/// Secret model
#[derive(Serialize, Deserialize, Clone)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &*self.0
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Secret {
        Secret(value)
    }
}

impl Default for Secret {
    fn default() -> Secret {
        Secret(nanoid!(64))
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secret: String = std::iter::repeat('X').take(self.0.len()).collect();

        f.debug_tuple("Secret").field(&secret).finish()
    }
}

/// Claims carried by a signed identity token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IdentityClaims {
    /// Internal account id
    pub id: String,
    /// Username at time of issue
    pub username: String,
    /// Expiry as a unix timestamp
    pub exp: i64,
}
