//! Create a new account
//! POST /create
use base64::{engine::general_purpose::STANDARD, Engine};
use gatekeep::models::Account;
use gatekeep::util::{validate_email, validate_password, validate_username};
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Account Data
#[derive(Serialize, Deserialize)]
pub struct DataCreateAccount {
    /// Unique username
    pub username: Option<String>,
    /// Password
    pub password: Option<String>,
    /// Valid email address
    pub email: Option<String>,
    /// Base64 encoded profile image
    pub file: Option<String>,
}

/// # Created Account
#[derive(Serialize, Deserialize)]
pub struct ResponseCreateAccount {
    pub message: String,
    /// Signed identity token
    pub token: String,
}

/// # Create Account
///
/// Create a new account and receive an identity token.
#[post("/create", data = "<data>")]
pub async fn create_account(
    gatekeep: &State<Gatekeep>,
    data: Json<DataCreateAccount>,
) -> Result<Json<ResponseCreateAccount>> {
    let data = data.into_inner();

    let username = data.username.unwrap_or_default();
    let password = data.password.unwrap_or_default();
    let email = data.email.unwrap_or_default();

    // Validate all fields before touching the database
    validate_username(&username)?;
    validate_email(&email)?;
    validate_password(&password)?;

    // Two independent existence checks; the store's unique indexes
    // remain the backstop if concurrent registrations race past them.
    if gatekeep
        .database
        .find_account_by_username(&username)
        .await?
        .is_some()
    {
        return Err(Error::AlreadyInUse { with: "username" });
    }

    if gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .is_some()
    {
        return Err(Error::AlreadyInUse { with: "email" });
    }

    // The upload happens before the account save; a failed save below
    // leaves the image unreferenced on the host.
    let avatar_url = if let Some(file) = data.file {
        let bytes = STANDARD
            .decode(file.as_bytes())
            .map_err(|_| Error::IncorrectData { with: "file" })?;

        gatekeep.config.image_host.upload(&bytes).await?
    } else {
        None
    };

    let account = Account::new(gatekeep, username, email, password, avatar_url).await?;
    let token = account.issue_identity_token(gatekeep);

    Ok(Json(ResponseCreateAccount {
        message: "Account created.".into(),
        token,
    }))
}
