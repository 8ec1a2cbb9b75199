//! Verify a password reset code
//! POST /reset_password/verify
use gatekeep::{Error, Gatekeep, Result};
use rocket::serde::json::Json;
use rocket::State;

use crate::routes::ResponseMessage;

/// # Verification Data
#[derive(Serialize, Deserialize)]
pub struct DataVerifyPasswordReset {
    /// Email associated with the account
    pub email: Option<String>,
    /// Code received by email
    pub otp: Option<String>,
}

/// # Verify Reset Code
///
/// Confirm the code delivered by email, unlocking the password reset.
#[post("/reset_password/verify", data = "<data>")]
pub async fn verify_password_reset(
    gatekeep: &State<Gatekeep>,
    data: Json<DataVerifyPasswordReset>,
) -> Result<Json<ResponseMessage>> {
    let data = data.into_inner();

    let email = data
        .email
        .filter(|email| !email.is_empty())
        .ok_or(Error::IncorrectData { with: "email" })?;

    let otp = data
        .otp
        .filter(|otp| !otp.is_empty())
        .ok_or(Error::IncorrectData { with: "otp" })?;

    let mut account = gatekeep
        .database
        .find_account_by_email(&email)
        .await?
        .ok_or(Error::UnknownUser)?;

    account.verify_reset_code(gatekeep, &otp).await?;

    Ok(Json(ResponseMessage {
        message: "Code verified, you may now reset your password.".into(),
    }))
}

#[cfg(test)]
mod tests {
    use iso8601_timestamp::Timestamp;

    use crate::test::*;

    #[async_std::test]
    async fn success() {
        let (gatekeep, outbox) = for_test();

        let mut account = register_test_account(&gatekeep).await;
        account.start_password_reset(&gatekeep, "").await.unwrap();

        let code = captured_reset_code(&outbox, "tester@validemail.com").await;

        let client = bootstrap_rocket_with_auth(
            gatekeep.clone(),
            routes![crate::routes::account::verify_password_reset::verify_password_reset],
        )
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "tester@validemail.com",
                    "otp": code
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);

        let account = gatekeep
            .database
            .find_account_by_email("tester@validemail.com")
            .await
            .unwrap()
            .unwrap();

        assert!(account.otp_verified);
        assert!(account.password_reset.is_none());
    }

    #[async_std::test]
    async fn fail_wrong_code() {
        let (gatekeep, outbox) = for_test();

        let mut account = register_test_account(&gatekeep).await;
        account.start_password_reset(&gatekeep, "").await.unwrap();

        let code = captured_reset_code(&outbox, "tester@validemail.com").await;
        let wrong = if code == "123456" { "654321" } else { "123456" };

        let client = bootstrap_rocket_with_auth(
            gatekeep.clone(),
            routes![crate::routes::account::verify_password_reset::verify_password_reset],
        )
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "tester@validemail.com",
                    "otp": wrong
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"InvalidOrExpiredCode\"}".into())
        );

        // The issued code stays active for another attempt
        let account = gatekeep
            .database
            .find_account_by_email("tester@validemail.com")
            .await
            .unwrap()
            .unwrap();

        assert!(!account.otp_verified);
        assert!(account.password_reset.is_some());
    }

    #[async_std::test]
    async fn fail_expired_code() {
        let (gatekeep, outbox) = for_test();

        let mut account = register_test_account(&gatekeep).await;
        account.start_password_reset(&gatekeep, "").await.unwrap();

        let code = captured_reset_code(&outbox, "tester@validemail.com").await;

        // Backdate the expiry past the ten minute window
        account.password_reset = Some(PasswordReset {
            code_fingerprint: fingerprint_code(&code),
            expiry: Timestamp::UNIX_EPOCH,
        });
        account.save(&gatekeep).await.unwrap();

        let client = bootstrap_rocket_with_auth(
            gatekeep,
            routes![crate::routes::account::verify_password_reset::verify_password_reset],
        )
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "tester@validemail.com",
                    "otp": code
                })
                .to_string(),
            )
            .dispatch()
            .await;

        // Expired and wrong codes are indistinguishable
        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"InvalidOrExpiredCode\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_first_code_after_reissue() {
        let (gatekeep, outbox) = for_test();

        let mut account = register_test_account(&gatekeep).await;

        account.start_password_reset(&gatekeep, "").await.unwrap();
        let first = captured_reset_code(&outbox, "tester@validemail.com").await;

        account.start_password_reset(&gatekeep, "").await.unwrap();
        let second = captured_reset_code(&outbox, "tester@validemail.com").await;

        if first == second {
            // One in nine hundred thousand; nothing to assert
            return;
        }

        let client = bootstrap_rocket_with_auth(
            gatekeep,
            routes![crate::routes::account::verify_password_reset::verify_password_reset],
        )
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "tester@validemail.com",
                    "otp": first
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "tester@validemail.com",
                    "otp": second
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::Ok);
    }

    #[async_std::test]
    async fn fail_missing_fields() {
        let (client, _, _) = bootstrap_rocket(routes![
            crate::routes::account::verify_password_reset::verify_password_reset
        ])
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(json!({ "email": "tester@validemail.com" }).to_string())
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::BadRequest);
        assert_eq!(
            res.into_string().await,
            Some("{\"type\":\"IncorrectData\",\"with\":\"otp\"}".into())
        );
    }

    #[async_std::test]
    async fn fail_unknown_email() {
        let (client, _, _) = bootstrap_rocket(routes![
            crate::routes::account::verify_password_reset::verify_password_reset
        ])
        .await;

        let res = client
            .post("/reset_password/verify")
            .header(ContentType::JSON)
            .body(
                json!({
                    "email": "nobody@validemail.com",
                    "otp": "123456"
                })
                .to_string(),
            )
            .dispatch()
            .await;

        assert_eq!(res.status(), Status::NotFound);
    }
}
