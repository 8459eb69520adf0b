use http::Method;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::cache::credential::Credential;
use crate::client::envelope::{endpoint_url, send_and_decode};
use crate::error::{Error, Result};
use crate::helpers::time::get_instant;
use crate::observability::metrics::get_metrics;
use crate::sources::{CreateTokenRequest, RefreshTokenRequest, TokenSource};
use crate::utils::constants::{PATH_AUTH_REFRESH, PATH_AUTH_TOKEN};

/// Token source backed by the Partner API auth endpoints.
///
/// Auth calls carry no `Authorization` header.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    client: Client,
    base_url: Url,
}

impl HttpTokenSource {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &'static str, body: &B) -> Result<Credential> {
        let metrics = get_metrics().await;
        let start = get_instant();
        debug!(path, "requesting credential");

        let result = match endpoint_url(&self.base_url, path) {
            Ok(url) => send_and_decode::<Credential>(self.client.post(url).json(body)).await,
            Err(err) => Err(err),
        };

        let status_class = match &result {
            Ok(_) => "2xx".to_owned(),
            Err(err) => {
                warn!(path, error = %err, "auth request failed");
                err.status_class()
            }
        };
        metrics.observe_api_request(Method::POST.as_str(), path, &status_class, start.elapsed().as_secs_f64());

        result.map_err(|err| Error::operation(Method::POST, path, err))
    }
}

impl TokenSource for HttpTokenSource {
    async fn create_token(&self, request: &CreateTokenRequest) -> Result<Credential> {
        self.post(PATH_AUTH_TOKEN, request).await
    }

    async fn refresh_token(&self, request: &RefreshTokenRequest) -> Result<Credential> {
        self.post(PATH_AUTH_REFRESH, request).await
    }
}
