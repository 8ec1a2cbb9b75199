//! Confirm a password reset.
//! PATCH /reset_password
use gatekeep::util::validate_password;
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::routes::ResponseMessage;

/// # Password Reset
#[derive(Serialize, Deserialize)]
pub struct DataPasswordReset {
    /// Email associated with the account
    pub email: Option<String>,
    /// New password
    pub new_password: Option<String>,
}

/// # Password Reset
///
/// Change the password after a verified reset code.
#[patch("/reset_password", data = "<data>")]
pub async fn password_reset(
    gatekeep: &State<Gatekeep>,
    data: Json<DataPasswordReset>,
) -> Result<Json<ResponseMessage>> {
    let data = data.into_inner();

    let email = data
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::IncorrectData { with: "email" })?;

    let new_password = data
        .new_password
        .filter(|password| !password.is_empty())
        .ok_or(Error::IncorrectData {
            with: "new_password",
        })?;

    let mut account = gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .ok_or(Error::UnknownUser)?;

    // The replacement password faces the same complexity rule
    validate_password(&new_password)?;

    account
        .complete_password_reset(gatekeep, new_password)
        .await?;

    Ok(Json(ResponseMessage {
        message: "Password changed successfully.".into(),
    }))
}
