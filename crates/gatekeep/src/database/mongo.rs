use bson::{to_document, Document};
use mongodb::options::{Collation, CollationStrength, FindOneOptions, UpdateOptions};
use std::ops::Deref;

use crate::{models::Account, Error, Result, Success};

use super::{definition::AbstractDatabase, Migration};

#[derive(Clone)]
pub struct MongoDb(pub mongodb::Database);

impl Deref for MongoDb {
    type Target = mongodb::Database;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn case_insensitive() -> FindOneOptions {
    FindOneOptions::builder()
        .collation(
            Collation::builder()
                .locale("en")
                .strength(CollationStrength::Secondary)
                .build(),
        )
        .build()
}

#[async_trait]
impl AbstractDatabase for MongoDb {
    /// Run a database migration
    async fn run_migration(&self, migration: Migration) -> Success {
        match migration {
            #[cfg(debug_assertions)]
            Migration::WipeAll => {
                // Drop the entire database
                self.drop().await.unwrap();
            }
            Migration::M2026_03_01EnsureIndexes => {
                if self
                    .collection::<Document>("accounts")
                    .list_index_names()
                    .await
                    .unwrap_or_default()
                    .contains(&"email".to_owned())
                {
                    return Ok(());
                }

                // Make sure the collection exists
                let list = self.list_collection_names().await.unwrap();
                if !list.contains(&"accounts".to_string()) {
                    self.create_collection("accounts").await.unwrap();
                }

                // Unique username and email are the backstop for the
                // non-atomic existence checks made at registration.
                let col = self.collection::<Document>("accounts");
                col.drop_indexes().await.unwrap();

                self.run_command(doc! {
                    "createIndexes": "accounts",
                    "indexes": [
                        {
                            "key": {
                                "username": 1
                            },
                            "name": "username",
                            "unique": true,
                            "collation": {
                                "locale": "en",
                                "strength": 2
                            }
                        },
                        {
                            "key": {
                                "email": 1
                            },
                            "name": "email",
                            "unique": true,
                            "collation": {
                                "locale": "en",
                                "strength": 2
                            }
                        }
                    ]
                })
                .await
                .unwrap();
            }
        }

        Ok(())
    }

    /// Find account by id
    async fn find_account(&self, id: &str) -> Result<Account> {
        self.collection("accounts")
            .find_one(doc! {
                "_id": id
            })
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "account",
            })?
            .ok_or(Error::UnknownUser)
    }

    /// Find account by username
    async fn find_account_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.collection("accounts")
            .find_one(doc! {
                "username": username
            })
            .with_options(case_insensitive())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "account",
            })
    }

    /// Find account by email
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.collection("accounts")
            .find_one(doc! {
                "email": email
            })
            .with_options(case_insensitive())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "find_one",
                with: "account",
            })
    }

    /// Save account
    async fn save_account(&self, account: &Account) -> Success {
        self.collection::<Account>("accounts")
            .update_one(
                doc! {
                    "_id": &account.id
                },
                doc! {
                    "$set": to_document(account).map_err(|_| Error::DatabaseError {
                        operation: "to_document",
                        with: "account",
                    })?
                },
            )
            .with_options(UpdateOptions::builder().upsert(true).build())
            .await
            .map_err(|_| Error::DatabaseError {
                operation: "upsert_one",
                with: "account",
            })
            .map(|_| ())
    }
}
