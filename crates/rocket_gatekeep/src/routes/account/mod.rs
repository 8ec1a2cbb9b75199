use rocket::Route;

pub mod create_account;
pub mod fetch_account;
pub mod lookup_account;
pub mod password_reset;
pub mod send_password_reset;
pub mod verify_password_reset;

pub fn routes() -> Vec<Route> {
    routes![
        create_account::create_account,
        fetch_account::fetch_account,
        lookup_account::lookup_account,
        send_password_reset::send_password_reset,
        verify_password_reset::verify_password_reset,
        password_reset::password_reset,
    ]
}
