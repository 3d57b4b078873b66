//! HTTP surface: the public job listing endpoint and the admin dashboard API.

pub mod routes;

pub use routes::{api_router, AppState};
