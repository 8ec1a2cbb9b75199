//! Send a password reset code
//! POST /reset_password
use gatekeep::derive::rocket::UserAgent;
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::routes::ResponseMessage;

/// # Reset Information
#[derive(Serialize, Deserialize)]
pub struct DataSendPasswordReset {
    /// Email associated with the account
    pub email: Option<String>,
}

/// # Send Password Reset
///
/// Email a one-time reset code to the account's address. The code is
/// never echoed back in the response.
#[post("/reset_password", data = "<data>")]
pub async fn send_password_reset(
    gatekeep: &State<Gatekeep>,
    data: Json<DataSendPasswordReset>,
    user_agent: UserAgent,
) -> Result<Json<ResponseMessage>> {
    let email = data
        .into_inner()
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::IncorrectData { with: "email" })?;

    let mut account = gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .ok_or(Error::UnknownUser)?;

    account
        .start_password_reset(gatekeep, &user_agent.0)
        .await?;

    Ok(Json(ResponseMessage {
        message: "Reset code sent to your email.".into(),
    }))
}
