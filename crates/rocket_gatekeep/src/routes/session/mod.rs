use rocket::Route;

pub mod login;

pub fn routes() -> Vec<Route> {
    routes![login::login]
}
