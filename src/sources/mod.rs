//! Token sources
//!
//! The two remote operations that produce a [`Credential`]: issuance from a
//! client ID / secret pair and refresh from a refresh token.

use std::fmt;
use std::future::Future;

use serde::Serialize;

use crate::cache::credential::Credential;
use crate::error::Result;

pub mod http;

pub use http::HttpTokenSource;

pub trait TokenSource: Send + Sync {
    /// Exchange client ID and secret for a new credential.
    fn create_token(
        &self,
        request: &CreateTokenRequest,
    ) -> impl Future<Output = Result<Credential>> + Send;

    /// Exchange a refresh token for a new credential.
    fn refresh_token(
        &self,
        request: &RefreshTokenRequest,
    ) -> impl Future<Output = Result<Credential>> + Send;
}

/// Body of `POST /v1/auth/token`.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for CreateTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateTokenRequest")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Body of `POST /v1/auth/refresh`.
#[derive(Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

impl fmt::Debug for RefreshTokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshTokenRequest")
            .field("refresh_token", &"***")
            .finish()
    }
}
