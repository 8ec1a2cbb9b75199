use chrono::Duration;
use iso8601_timestamp::Timestamp;

use crate::{
    config::EmailConfig,
    models::{Account, IdentityClaims, PasswordReset},
    util::{fingerprint_code, generate_reset_code, hash_password, parse_user_agent},
    Error, Gatekeep, Result, Success,
};

impl Account {
    /// Create and persist a new account
    ///
    /// The caller is responsible for validation and uniqueness checks.
    pub async fn new(
        gatekeep: &Gatekeep,
        username: String,
        email: String,
        plaintext_password: String,
        avatar_url: Option<String>,
    ) -> Result<Account> {
        // Hash the user's password
        let password = hash_password(plaintext_password)?;

        let account = Account {
            id: ulid::Ulid::new().to_string(),

            username,
            email,
            password,
            avatar_url,

            password_reset: None,
            otp_verified: false,
        };

        gatekeep.database.save_account(&account).await?;

        Ok(account)
    }

    /// Commit the account to the database
    pub async fn save(&self, gatekeep: &Gatekeep) -> Success {
        gatekeep.database.save_account(self).await
    }

    /// Verify a user's password is correct
    pub fn verify_password(&self, plaintext_password: &str) -> Success {
        argon2::verify_encoded(&self.password, plaintext_password.as_bytes())
            .map(|v| {
                if v {
                    Ok(())
                } else {
                    Err(Error::InvalidCredentials)
                }
            })
            // A corrupt hash reads the same as a wrong password.
            .map_err(|_| Error::InvalidCredentials)?
    }

    /// Issue a signed identity token for this account
    pub fn issue_identity_token(&self, gatekeep: &Gatekeep) -> String {
        let claims = IdentityClaims {
            id: self.id.clone(),
            username: self.username.clone(),
            exp: chrono::Utc::now()
                .checked_add_signed(Duration::seconds(
                    gatekeep.config.expiry.expire_identity_token,
                ))
                .expect("failed to checked_add_signed")
                .timestamp(),
        };

        gatekeep.config.token_secret.sign_claims(&claims)
    }

    /// Issue a reset code and email it to the account's address
    ///
    /// A newly issued code overwrites any previous one. If the code
    /// cannot be delivered, the reset state is cleared again so an
    /// undelivered code never stays active.
    pub async fn start_password_reset(&mut self, gatekeep: &Gatekeep, user_agent: &str) -> Success {
        let code = generate_reset_code();

        self.password_reset = Some(PasswordReset {
            code_fingerprint: fingerprint_code(&code),
            expiry: Timestamp::from_unix_timestamp_ms(
                chrono::Utc::now()
                    .checked_add_signed(Duration::seconds(
                        gatekeep.config.expiry.expire_reset_code,
                    ))
                    .expect("failed to checked_add_signed")
                    .timestamp_millis(),
            ),
        });
        self.otp_verified = false;

        gatekeep.database.save_account(self).await?;

        if let Err(err) = self.deliver_reset_code(gatekeep, &code, user_agent).await {
            self.password_reset = None;

            if let Err(err) = gatekeep.database.save_account(self).await {
                error!(
                    "Failed to clear reset state after delivery failure: {:?}",
                    err
                );
            }

            return Err(err);
        }

        Ok(())
    }

    /// Render the reset email and hand it to the configured transport
    async fn deliver_reset_code(
        &self,
        gatekeep: &Gatekeep,
        code: &str,
        user_agent: &str,
    ) -> Success {
        let (browser, os) = parse_user_agent(user_agent);

        let variables = json!({
            "username": self.username,
            "otp": code,
            "browser": browser,
            "os": os,
        });

        match &gatekeep.config.email_delivery {
            EmailConfig::Smtp {
                settings,
                templates,
            } => {
                let (text, html) = templates.reset.render(&variables)?;

                settings.send(&self.email, &templates.reset.title, text, html)
            }
            EmailConfig::Dummy { outbox, templates } => {
                let (text, _) = templates.reset.render(&variables)?;

                outbox
                    .push(crate::config::OutboundEmail {
                        to: self.email.clone(),
                        subject: templates.reset.title.clone(),
                        text,
                    })
                    .await;

                Ok(())
            }
            EmailConfig::Disabled => Err(Error::EmailFailed),
        }
    }

    /// Verify a submitted reset code against the stored fingerprint
    ///
    /// Wrong and expired codes are deliberately indistinguishable to
    /// the caller. A successful match consumes the code and marks the
    /// reset as verified.
    pub async fn verify_reset_code(&mut self, gatekeep: &Gatekeep, code: &str) -> Success {
        match &self.password_reset {
            Some(reset)
                if reset.code_fingerprint == fingerprint_code(code)
                    && reset.expiry > Timestamp::now_utc() =>
            {
                self.password_reset = None;
                self.otp_verified = true;

                gatekeep.database.save_account(self).await
            }
            _ => Err(Error::InvalidOrExpiredCode),
        }
    }

    /// Replace the account's password after a verified reset
    pub async fn complete_password_reset(
        &mut self,
        gatekeep: &Gatekeep,
        new_password: String,
    ) -> Success {
        if !self.otp_verified {
            return Err(Error::ResetNotVerified);
        }

        self.password = hash_password(new_password)?;
        self.password_reset = None;
        self.otp_verified = false;

        gatekeep.database.save_account(self).await
    }
}
