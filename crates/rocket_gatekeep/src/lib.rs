#[macro_use]
extern crate serde;
#[macro_use]
extern crate rocket;
#[cfg(any(test, feature = "test"))]
#[macro_use]
extern crate serde_json;

pub mod routes;
