//! Async client for the illustration catalog REST API.
//!
//! [`Client`] attaches the stored bearer token to every request, maps error
//! responses onto [`ApiError`] and keeps a short-lived cache of GET
//! responses that any mutation clears.

mod api;
mod auth;
mod cache;
mod client;
mod config;
mod error;
pub mod query;

pub use api::default_fuel_types;
pub use auth::ACCESS_TOKEN_ENV_VAR;
pub use auth::Session;
pub use auth::StoredCredentials;
pub use auth::get_auth_file;
pub use cache::CacheStats;
pub use client::Client;
pub use config::ClientConfig;
pub use error::ApiError;
pub use error::FieldErrors;
pub use error::NON_FIELD_ERRORS;
pub use error::Result;
pub use illustra_backend_models::models;
