//! Fetch your own account
//! GET /
use gatekeep::models::{Account, IdentityClaims};
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

/// Public projection of an account
///
/// Credential and reset state never leave the server.
#[derive(Serialize, Deserialize)]
pub struct AccountInfo {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<Account> for AccountInfo {
    fn from(item: Account) -> Self {
        AccountInfo {
            username: item.username,
            email: item.email,
            avatar_url: item.avatar_url,
        }
    }
}

/// # Fetched Account
#[derive(Serialize, Deserialize)]
pub struct ResponseFetchAccount {
    pub user: AccountInfo,
    pub message: String,
}

/// # Fetch Account
///
/// Fetch account information for the holder of an identity token.
#[get("/")]
pub async fn fetch_account(
    gatekeep: &State<Gatekeep>,
    identity: IdentityClaims,
) -> Result<Json<ResponseFetchAccount>> {
    if identity.username.is_empty() {
        return Err(Error::IncorrectData { with: "username" });
    }

    let account = gatekeep
        .database
        .find_account_by_username(&identity.username)
        .await?
        .ok_or(Error::UnknownUser)?;

    Ok(Json(ResponseFetchAccount {
        user: account.into(),
        message: "User found.".into(),
    }))
}
