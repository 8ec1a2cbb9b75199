pub mod account;
pub mod session;

/// Generic acknowledgement carrying a human readable message
#[derive(Serialize, Deserialize)]
pub struct ResponseMessage {
    pub message: String,
}
