use tokio_util::sync::CancellationToken;

use crate::cache::credential::Credential;
use crate::client::Client;
use crate::error::{Error, Result};
use crate::sources::{CreateTokenRequest, RefreshTokenRequest, TokenSource};

impl Client {
    /// A credential whose access token is valid now, from cache or freshly
    /// issued / refreshed.
    pub async fn acquire_credential(&self, cancel: &CancellationToken) -> Result<Credential> {
        self.tokens.acquire(cancel).await
    }

    /// `Authorization` header value for callers building their own requests.
    pub async fn authorization(&self, cancel: &CancellationToken) -> Result<String> {
        Ok(self.acquire_credential(cancel).await?.bearer())
    }

    /// Obtains a new credential from a client ID and secret.
    ///
    /// Does not touch the client's cached credential.
    pub async fn create_token(&self, request: &CreateTokenRequest, cancel: &CancellationToken) -> Result<Credential> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.tokens.source().create_token(request) => result,
        }
    }

    /// Exchanges a refresh token for a new credential.
    ///
    /// Does not touch the client's cached credential.
    pub async fn refresh_token(&self, request: &RefreshTokenRequest, cancel: &CancellationToken) -> Result<Credential> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = self.tokens.source().refresh_token(request) => result,
        }
    }
}
