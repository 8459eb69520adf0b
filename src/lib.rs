//! # Monta Partner API client
//!
//! Typed access to charges, charge points and wallet transactions, with a
//! token manager that issues, caches and refreshes the bearer credential
//! shared by every call of a [`Client`].
//!
//! Modules:
//! - `cache` — credential type and the single-flight token manager
//! - `sources` — issuance / refresh operations producing credentials
//! - `client` — request envelope, query encoding and resource operations
//! - `model` — resource and pagination types
//! - `config` — YAML configuration for the command line tool

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod model;
pub mod observability;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::credential::{Credential, CredentialState};
pub use crate::cache::token_manager::{ClientIdentity, TokenManager};
pub use crate::client::{Client, ClientBuilder};
pub use crate::error::{Error, ErrorBody, Result, StatusError};
pub use tokio_util::sync::CancellationToken;
