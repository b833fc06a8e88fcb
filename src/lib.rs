//! Student administration service: a REST backend with token-gated student
//! records, and the client that drives it.

pub mod auth;
pub mod client;
pub mod configuration;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod schema;
pub mod security;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod validators;
