//! Login to an account
//! POST /login
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

/// # Login Data
#[derive(Serialize, Deserialize)]
pub struct DataLogin {
    /// Email
    pub email: Option<String>,
    /// Password
    pub password: Option<String>,
}

/// # Login Response
#[derive(Serialize, Deserialize)]
pub struct ResponseLogin {
    pub message: String,
    /// Signed identity token
    pub token: String,
}

/// # Login
///
/// Login to an account.
#[post("/login", data = "<data>")]
pub async fn login(gatekeep: &State<Gatekeep>, data: Json<DataLogin>) -> Result<Json<ResponseLogin>> {
    let data = data.into_inner();

    let email = data
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::IncorrectData { with: "email" })?;

    let password = data
        .password
        .filter(|password| !password.is_empty())
        .ok_or(Error::IncorrectData { with: "password" })?;

    let account = gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .ok_or(Error::UnknownUser)?;

    // Verify the password is correct.
    account.verify_password(&password)?;

    Ok(Json(ResponseLogin {
        message: "Login successful.".into(),
        token: account.issue_identity_token(gatekeep),
    }))
}
