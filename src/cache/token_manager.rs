use std::fmt;
use std::future::Future;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::credential::{Credential, CredentialState};
use crate::error::{Error, Result};
use crate::helpers::time::now;
use crate::observability::metrics::{
    get_metrics, OUTCOME_CACHE_HIT, OUTCOME_CANCELLED, OUTCOME_ERROR, OUTCOME_ISSUED, OUTCOME_REFRESHED,
};
use crate::sources::{CreateTokenRequest, RefreshTokenRequest, TokenSource};

/// Client ID and secret used for token issuance.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientIdentity {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Both halves must be non-empty for issuance.
    pub fn is_complete(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    fn to_request(&self) -> CreateTokenRequest {
        CreateTokenRequest {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        }
    }
}

impl fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

/// Caches one credential and hands out valid access tokens.
///
/// The cached credential sits behind a single async mutex. A caller holds it
/// for the whole decide / issue / refresh / replace sequence, so concurrent
/// callers that find the token expired queue up behind one in-flight
/// acquisition and then observe its result as a cache hit.
pub struct TokenManager<S> {
    source: S,
    identity: Option<ClientIdentity>,
    current: Mutex<Option<Credential>>,
}

impl<S: TokenSource> TokenManager<S> {
    pub fn new(source: S, identity: Option<ClientIdentity>, credential: Option<Credential>) -> Self {
        Self {
            source,
            identity,
            current: Mutex::new(credential),
        }
    }

    /// Returns a credential whose access token is valid now, issuing or
    /// refreshing it first when needed.
    ///
    /// A refresh failure is returned as is; it never falls back to issuance.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<Credential> {
        let metrics = get_metrics().await;
        match self.acquire_locked(cancel).await {
            Ok((credential, outcome)) => {
                metrics.token_acquisitions.with_label_values(&[outcome]).inc();
                metrics
                    .token_expiry_unix
                    .set(credential.access_token_expiration_date.timestamp());
                Ok(credential)
            }
            Err(err) => {
                let outcome = if err.is_cancelled() { OUTCOME_CANCELLED } else { OUTCOME_ERROR };
                metrics.token_acquisitions.with_label_values(&[outcome]).inc();
                Err(Error::get_token(err))
            }
        }
    }

    async fn acquire_locked(&self, cancel: &CancellationToken) -> Result<(Credential, &'static str)> {
        let mut current = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("cancelled while waiting for token gate");
                return Err(Error::Cancelled);
            }
            guard = self.current.lock() => guard,
        };

        if let Some(credential) = current.as_ref() {
            match credential.state_at(now()) {
                CredentialState::Fresh => {
                    debug!("using cached access token");
                    return Ok((credential.clone(), OUTCOME_CACHE_HIT));
                }
                CredentialState::Refreshable => {
                    info!("access token expired, refreshing");
                    let request = RefreshTokenRequest {
                        refresh_token: credential.refresh_token.clone(),
                    };
                    let refreshed = with_cancel(cancel, self.source.refresh_token(&request))
                        .await
                        .inspect_err(|err| warn!(error = %err, "token refresh failed"))?;
                    *current = Some(refreshed.clone());
                    return Ok((refreshed, OUTCOME_REFRESHED));
                }
                CredentialState::Expired => {
                    info!("cached credential fully expired");
                }
            }
        }

        let identity = self
            .identity
            .as_ref()
            .filter(|identity| identity.is_complete())
            .ok_or(Error::MissingClientCredentials)?;
        info!(client_id = %identity.client_id, "issuing new token");
        let created = with_cancel(cancel, self.source.create_token(&identity.to_request()))
            .await
            .inspect_err(|err| warn!(error = %err, "token issuance failed"))?;
        *current = Some(created.clone());
        Ok((created, OUTCOME_ISSUED))
    }

    /// Snapshot of the cached credential, e.g. for persisting it between runs.
    pub async fn current(&self) -> Option<Credential> {
        self.current.lock().await.clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

async fn with_cancel<T>(
    cancel: &CancellationToken,
    operation: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(Error::Cancelled),
        result = operation => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::error::StatusError;

    /// Counts calls and answers with a fresh credential per call.
    #[derive(Default)]
    struct FakeSource {
        created: AtomicUsize,
        refreshed: AtomicUsize,
        refresh_tokens: std::sync::Mutex<Vec<String>>,
        fail_refresh: bool,
        delay_ms: u64,
    }

    impl FakeSource {
        fn credential(prefix: &str, n: usize) -> Credential {
            let now = now();
            Credential::new(
                format!("{prefix}-access-{n}"),
                now + Duration::minutes(10),
                format!("{prefix}-refresh-{n}"),
                now + Duration::hours(1),
            )
        }
    }

    impl TokenSource for FakeSource {
        async fn create_token(&self, request: &CreateTokenRequest) -> Result<Credential> {
            assert_eq!(request.client_id, "id");
            let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            Ok(Self::credential("issued", n))
        }

        async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<Credential> {
            let n = self.refreshed.fetch_add(1, Ordering::SeqCst) + 1;
            self.refresh_tokens.lock().unwrap().push(request.refresh_token.clone());
            if self.fail_refresh {
                return Err(Error::Status(StatusError::from_body(
                    StatusCode::UNAUTHORIZED,
                    r#"{"message":"refresh token revoked"}"#.to_owned(),
                )));
            }
            Ok(Self::credential("refreshed", n))
        }
    }

    fn identity() -> Option<ClientIdentity> {
        Some(ClientIdentity::new("id", "secret"))
    }

    fn cached(access_in: Duration, refresh_in: Duration) -> Credential {
        let now = now();
        Credential::new("cached-access", now + access_in, "cached-refresh", now + refresh_in)
    }

    #[tokio::test]
    async fn cache_hit_makes_no_source_call() {
        let credential = cached(Duration::minutes(5), Duration::hours(1));
        let manager = TokenManager::new(FakeSource::default(), identity(), Some(credential.clone()));

        let got = manager.acquire(&CancellationToken::new()).await.unwrap();

        assert_eq!(got, credential);
        assert_eq!(manager.source().created.load(Ordering::SeqCst), 0);
        assert_eq!(manager.source().refreshed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn expired_access_token_is_refreshed_once() {
        let credential = cached(-Duration::seconds(1), Duration::hours(1));
        let manager = TokenManager::new(FakeSource::default(), identity(), Some(credential.clone()));
        let cancel = CancellationToken::new();

        let first = manager.acquire(&cancel).await.unwrap();
        let second = manager.acquire(&cancel).await.unwrap();

        assert_eq!(first.access_token, "refreshed-access-1");
        assert_eq!(second, first);
        assert_ne!(second, credential);
        assert_eq!(manager.source().refreshed.load(Ordering::SeqCst), 1);
        assert_eq!(manager.source().created.load(Ordering::SeqCst), 0);
        assert_eq!(*manager.source().refresh_tokens.lock().unwrap(), vec!["cached-refresh".to_owned()]);
    }

    #[tokio::test]
    async fn empty_cache_issues_and_caches() {
        let manager = TokenManager::new(FakeSource::default(), identity(), None);
        let cancel = CancellationToken::new();

        let first = manager.acquire(&cancel).await.unwrap();
        let second = manager.acquire(&cancel).await.unwrap();

        assert_eq!(first.access_token, "issued-access-1");
        assert_eq!(second, first);
        assert_eq!(manager.current().await, Some(first));
        assert_eq!(manager.source().created.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn fully_expired_credential_is_reissued() {
        let credential = cached(-Duration::hours(2), -Duration::hours(1));
        let manager = TokenManager::new(FakeSource::default(), identity(), Some(credential));

        let got = manager.acquire(&CancellationToken::new()).await.unwrap();

        assert_eq!(got.access_token, "issued-access-1");
        assert_eq!(manager.source().refreshed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_identity_fails_without_source_call() {
        for identity in [None, Some(ClientIdentity::new("", "secret")), Some(ClientIdentity::new("id", ""))] {
            let manager = TokenManager::new(FakeSource::default(), identity, None);

            let err = manager.acquire(&CancellationToken::new()).await.unwrap_err();

            assert!(err.is_missing_client_credentials(), "unexpected error: {err}");
            assert!(err.to_string().starts_with("get token: "));
            assert_eq!(manager.source().created.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn refresh_failure_does_not_fall_back_to_issuance() {
        let source = FakeSource {
            fail_refresh: true,
            ..Default::default()
        };
        let credential = cached(-Duration::seconds(1), Duration::hours(1));
        let manager = TokenManager::new(source, identity(), Some(credential.clone()));

        let err = manager.acquire(&CancellationToken::new()).await.unwrap_err();

        assert_eq!(err.status_error().map(|s| s.status), Some(StatusCode::UNAUTHORIZED));
        assert!(err.to_string().starts_with("get token: "));
        assert_eq!(manager.source().created.load(Ordering::SeqCst), 0);
        assert_eq!(manager.current().await, Some(credential));
    }

    #[tokio::test]
    async fn cancelled_caller_leaves_cache_untouched() {
        let manager = TokenManager::new(FakeSource::default(), identity(), None);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = manager.acquire(&cancel).await.unwrap_err();

        assert!(matches!(err, Error::Cancelled));
        assert_eq!(manager.current().await, None);
        assert_eq!(manager.source().created.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn waiting_caller_can_be_cancelled_without_affecting_holder() {
        let source = FakeSource {
            delay_ms: 300,
            ..Default::default()
        };
        let manager = Arc::new(TokenManager::new(source, identity(), None));

        let holder = tokio::spawn({
            let manager = manager.clone();
            async move { manager.acquire(&CancellationToken::new()).await }
        });
        // let the holder enter the gate
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        let cancel = CancellationToken::new();
        let waiter = tokio::spawn({
            let manager = manager.clone();
            let cancel = cancel.clone();
            async move { manager.acquire(&cancel).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        cancel.cancel();

        assert!(waiter.await.unwrap().unwrap_err().is_cancelled());
        let issued = holder.await.unwrap().unwrap();
        assert_eq!(issued.access_token, "issued-access-1");
        assert_eq!(manager.current().await, Some(issued));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_share_one_issuance() {
        let source = FakeSource {
            delay_ms: 100,
            ..Default::default()
        };
        let manager = Arc::new(TokenManager::new(source, identity(), None));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let manager = manager.clone();
                tokio::spawn(async move { manager.acquire(&CancellationToken::new()).await })
            })
            .collect();

        let mut tokens = Vec::new();
        for handle in handles {
            tokens.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(manager.source().created.load(Ordering::SeqCst), 1);
        assert!(tokens.iter().all(|t| *t == tokens[0]));
    }
}
