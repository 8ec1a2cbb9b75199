//! Look up an account's public profile by email
//! POST /lookup
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

use super::fetch_account::AccountInfo;

/// # Lookup Data
#[derive(Serialize, Deserialize)]
pub struct DataLookupAccount {
    /// Email associated with the account
    pub email: Option<String>,
}

/// # Lookup Response
#[derive(Serialize, Deserialize)]
pub struct ResponseLookupAccount {
    pub user: AccountInfo,
}

/// # Lookup Account
///
/// Fetch the public profile of the account matching an email.
#[post("/lookup", data = "<data>")]
pub async fn lookup_account(
    gatekeep: &State<Gatekeep>,
    data: Json<DataLookupAccount>,
) -> Result<Json<ResponseLookupAccount>> {
    let email = data
        .into_inner()
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::IncorrectData { with: "email" })?;

    let account = gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .ok_or(Error::UnknownUser)?;

    Ok(Json(ResponseLookupAccount {
        user: account.into(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test::*;

    #[async_std::test]
    async fn success() {
        let (gatekeep, _) = for_test();

        register_test_account(&gatekeep).await;

        let client = bootstrap_rocket_with_auth(
            gatekeep,
            routes![crate::routes::account::lookup_account::lookup_account],
        )
        .await;

        let res = client
            .post("/lookup")
            .header(ContentType::JSON)
            .body(json!({ "email": "tester@validemail.com" }).to_string())
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);

        let body = res.into_string().await.unwrap();
        let response: crate::routes::account::lookup_account::ResponseLookupAccount =
            serde_json::from_str(&body).expect("`ResponseLookupAccount`");

        assert_eq!(response.user.username, "tester");
        assert!(!body.contains("password"));
    }

    #[async_std::test]
    async fn fail_missing_email() {
        let (client, _, _) = bootstrap_rocket(routes![
            crate::routes::account::lookup_account::lookup_account
        ])
        .await;

        let res = client
            .post("/lookup")
            .header(ContentType::JSON)
            .body(json!({}).to_string())
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"IncorrectData\",\"with\":\"email\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_unknown_email() {
        let (client, _, _) = bootstrap_rocket(routes![
            crate::routes::account::lookup_account::lookup_account
        ])
        .await;

        let res = client
            .post("/lookup")
            .header(ContentType::JSON)
            .body(json!({ "email": "nobody@validemail.com" }).to_string())
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::NotFound);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"UnknownUser\"}".into())
        );
    }
}
