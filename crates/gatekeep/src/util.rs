use base64::{
    alphabet::URL_SAFE,
    engine::{general_purpose::NO_PAD, GeneralPurpose},
    Engine,
};
use rand::Rng;
use regex::Regex;
use sha2::{Digest, Sha256};

use crate::{Error, Result, Success};

lazy_static! {
    static ref ARGON_CONFIG: argon2::Config<'static> = argon2::Config::default();
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap();
}

/// Symbols which count towards password complexity
pub static PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:'\",.<>/?`~";

/// Hash a password using argon2
pub fn hash_password(plaintext_password: String) -> Result<String> {
    argon2::hash_encoded(
        plaintext_password.as_bytes(),
        nanoid::nanoid!(24).as_bytes(),
        &ARGON_CONFIG,
    )
    .map_err(|_| Error::InternalError)
}

/// Check that a username is usable
pub fn validate_username(username: &str) -> Success {
    if username.trim().len() < 3 {
        return Err(Error::IncorrectData { with: "username" });
    }

    Ok(())
}

/// Check that an email has a `local@domain.tld` shape
pub fn validate_email(email: &str) -> Success {
    if email.is_empty() || !EMAIL_RE.is_match(email) {
        return Err(Error::IncorrectData { with: "email" });
    }

    Ok(())
}

/// Enforce password complexity
///
/// Eight characters minimum, at least one lowercase letter, one
/// uppercase letter, one digit and one symbol from [`PASSWORD_SYMBOLS`].
pub fn validate_password(password: &str) -> Success {
    if password.len() < 8 {
        return Err(Error::ShortPassword);
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(Error::WeakPassword {
            missing: "lowercase",
        });
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(Error::WeakPassword {
            missing: "uppercase",
        });
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(Error::WeakPassword { missing: "digit" });
    }

    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(Error::WeakPassword { missing: "symbol" });
    }

    Ok(())
}

/// Draw a uniformly random six digit reset code
pub fn generate_reset_code() -> String {
    rand::thread_rng().gen_range(100_000..1_000_000).to_string()
}

/// Compute the one-way fingerprint of a reset code
pub fn fingerprint_code(code: &str) -> String {
    let engine = GeneralPurpose::new(&URL_SAFE, NO_PAD);

    engine.encode(Sha256::digest(code.as_bytes()))
}

/// Derive display names for the client browser and operating system
/// from a User-Agent header value
pub fn parse_user_agent(user_agent: &str) -> (&'static str, &'static str) {
    let browser = if user_agent.contains("Firefox/") {
        "Firefox"
    } else if user_agent.contains("Edg/") {
        "Edge"
    } else if user_agent.contains("OPR/") || user_agent.contains("Opera/") {
        "Opera"
    } else if user_agent.contains("Chrome/") {
        "Chrome"
    } else if user_agent.contains("Safari/") {
        "Safari"
    } else {
        "Unknown"
    };

    // Android carries "Linux" in its platform token, check it first
    let os = if user_agent.contains("Android") {
        "Android"
    } else if user_agent.contains("iPhone") || user_agent.contains("iPad") {
        "iOS"
    } else if user_agent.contains("Windows") {
        "Windows"
    } else if user_agent.contains("Mac OS X") || user_agent.contains("Macintosh") {
        "macOS"
    } else if user_agent.contains("Linux") {
        "Linux"
    } else {
        "Unknown"
    };

    (browser, os)
}
