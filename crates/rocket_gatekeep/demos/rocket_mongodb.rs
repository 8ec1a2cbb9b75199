//! Run example with `cargo run --example rocket_mongodb --features example`

#[macro_use]
extern crate rocket;

#[cfg(feature = "example")]
#[launch]
async fn rocket() -> _ {
    use gatekeep::database::MongoDb;
    use gatekeep::Migration;
    use mongodb::{options::ClientOptions, Client};

    let client_options = ClientOptions::parse("mongodb://localhost:27017")
        .await
        .expect("Valid connection URL");

    let client = Client::with_options(client_options).expect("MongoDB server");
    let database = gatekeep::Database::MongoDb(MongoDb(client.database("gatekeep")));

    for migration in [Migration::WipeAll, Migration::M2026_03_01EnsureIndexes] {
        database.run_migration(migration).await.unwrap();
    }

    let gatekeep = gatekeep::Gatekeep {
        database,
        ..Default::default()
    };

    rocket::build()
        .manage(gatekeep)
        .mount("/auth/account", rocket_gatekeep::routes::account::routes())
        .mount("/auth/session", rocket_gatekeep::routes::session::routes())
}

#[cfg(not(feature = "example"))]
fn main() {
    panic!("Enable `example` feature to run this example!");
}
