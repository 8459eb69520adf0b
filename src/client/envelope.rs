use http::Method;
use reqwest::{header::AUTHORIZATION, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use url::Url;

use crate::client::query::QueryPairs;
use crate::client::Client;
use crate::error::{Error, Result, StatusError};
use crate::helpers::time::get_instant;
use crate::observability::metrics::{get_metrics, STATUS_TOKEN_ERROR};

/// One typed call against the Partner API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path template used as metrics label, e.g. `/v1/charges/{id}`.
    pub route: &'static str,
    pub path: String,
    pub query: QueryPairs,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, route: &'static str, path: impl Into<String>) -> Self {
        Self {
            method,
            route,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(route: &'static str, path: impl Into<String>) -> Self {
        Self::new(Method::GET, route, path)
    }

    pub fn with_query(mut self, query: QueryPairs) -> Self {
        self.query = query;
        self
    }

    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body).map_err(Error::Encode)?);
        Ok(self)
    }
}

/// Base URL joined with an absolute API path, keeping the base's own path
/// (`https://host/api` + `/v1/charges` = `https://host/api/v1/charges`).
pub(crate) fn endpoint_url(base_url: &Url, path: &str) -> Result<Url> {
    let joined = format!("{}{}", base_url.as_str().trim_end_matches('/'), path);
    Ok(Url::parse(&joined)?)
}

/// URL with the non-empty query pairs appended. No `?` is added when there
/// are none.
pub(crate) fn request_url(base_url: &Url, path: &str, query: &QueryPairs) -> Result<Url> {
    let mut url = endpoint_url(base_url, path)?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
    }
    Ok(url)
}

pub(crate) async fn send_and_decode<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
    let response = builder.send().await?;
    decode_response(response).await
}

/// Decodes either a `StatusError` or `T`.
///
/// The status of a non-success response is kept even when its body cannot be
/// read; the body is then treated as empty.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let raw = response.text().await.unwrap_or_default();
        return Err(StatusError::from_body(status, raw).into());
    }
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(Error::Decode)
}

impl Client {
    /// Executes `request` with a bearer token from the token manager.
    ///
    /// No network call is made when acquiring the token fails. Errors carry
    /// `"<METHOD> <path>: "` context.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let metrics = get_metrics().await;
        let start = get_instant();
        let method = request.method.clone();
        let route = request.route;
        let path = request.path.clone();

        let result = self.execute_inner(request, cancel).await;

        let status_class = match &result {
            Ok(_) => "2xx".to_owned(),
            Err(err) => {
                warn!(%method, %path, error = %err, "api request failed");
                match err {
                    Error::GetToken(_) => STATUS_TOKEN_ERROR.to_owned(),
                    other => other.status_class(),
                }
            }
        };
        metrics.observe_api_request(method.as_str(), route, &status_class, start.elapsed().as_secs_f64());

        result.map_err(|err| Error::operation(method, path, err))
    }

    async fn execute_inner<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        cancel: &CancellationToken,
    ) -> Result<T> {
        let url = request_url(&self.base_url, &request.path, &request.query)?;
        let credential = self.tokens.acquire(cancel).await?;

        debug!(method = %request.method, %url, "sending api request");
        let mut builder = self
            .http
            .request(request.method, url)
            .header(AUTHORIZATION, credential.bearer());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Error::Cancelled),
            result = send_and_decode::<T>(builder) => result,
        }
    }
}
