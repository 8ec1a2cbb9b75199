mod account;
mod secret;
