//! Partner API client
//!
//! [`Client`] owns the HTTP client, the base URL and the token manager. All
//! resource operations go through [`Client::execute`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as HttpClient;
use url::Url;

use crate::cache::credential::Credential;
use crate::cache::token_manager::{ClientIdentity, TokenManager};
use crate::error::Result;
use crate::sources::HttpTokenSource;
use crate::utils::constants::{DEFAULT_API_HOST, DEFAULT_HTTP_TIMEOUT_MS};

pub mod auth;
pub mod charge_points;
pub mod charges;
pub mod envelope;
pub mod query;
pub mod wallet_transactions;

pub use charge_points::ListChargePointsRequest;
pub use charges::ListChargesRequest;
pub use envelope::ApiRequest;
pub use query::{DateRange, PageRequest, ToQuery};
pub use wallet_transactions::ListWalletTransactionsRequest;

/// Client to the Monta Partner API. Cheap to clone; clones share one token
/// cache.
#[derive(Clone)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: Url,
    pub(crate) tokens: Arc<TokenManager<HttpTokenSource>>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Snapshot of the cached credential.
    pub async fn credential(&self) -> Option<Credential> {
        self.tokens.current().await
    }
}

/// Configuration supplied once, when the [`Client`] is built.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    identity: Option<ClientIdentity>,
    credential: Option<Credential>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<HttpClient>,
}

impl ClientBuilder {
    /// Authenticate with a client ID and secret.
    pub fn client_id_and_secret(mut self, client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        self.identity = Some(ClientIdentity::new(client_id, client_secret));
        self
    }

    /// Start from an existing credential, e.g. one persisted by a previous run.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Request timeout of the default HTTP client. Ignored with [`Self::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn http_client(mut self, http_client: HttpClient) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_API_HOST))?;
        let http = match self.http_client {
            Some(http) => http,
            None => HttpClient::builder()
                .timeout(self.timeout.unwrap_or(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS)))
                .build()?,
        };
        let source = HttpTokenSource::new(http.clone(), base_url.clone());
        let tokens = TokenManager::new(source, self.identity, self.credential);

        Ok(Client {
            http,
            base_url,
            tokens: Arc::new(tokens),
        })
    }
}
