//! Job board service: entity store, job query engine, listing controller,
//! and the admin dashboard surface.

pub mod admin;
pub mod config;
pub mod error;
pub mod http;
pub mod jobs;
pub mod store;
pub mod telemetry;
