use std::fmt;

use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by every public client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// Issuance was required but no client ID / secret pair was configured.
    #[error("unable to create token - missing client ID and client secret")]
    MissingClientCredentials,

    /// The caller's cancellation token fired while waiting for the token gate
    /// or for the network call.
    #[error("operation cancelled")]
    Cancelled,

    /// Issuance or refresh failed inside the token manager.
    #[error("get token: {0}")]
    GetToken(Box<Error>),

    /// The API answered with a non-success status.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A success response whose body could not be decoded.
    #[error("decode response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Context added at the operation boundary, e.g. `GET /v1/charges: ...`.
    #[error("{method} {path}: {source}")]
    Operation {
        method: Method,
        path: String,
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn get_token(err: Error) -> Self {
        match err {
            // cancellation is propagated unchanged
            Error::Cancelled => Error::Cancelled,
            other => Error::GetToken(Box::new(other)),
        }
    }

    pub(crate) fn operation(method: Method, path: impl Into<String>, err: Error) -> Self {
        Error::Operation {
            method,
            path: path.into(),
            source: Box::new(err),
        }
    }

    /// Innermost error below any `get token` / operation context.
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            Error::GetToken(source) => source.root(),
            other => other,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Error::Cancelled)
    }

    pub fn is_missing_client_credentials(&self) -> bool {
        matches!(self.root(), Error::MissingClientCredentials)
    }

    pub fn is_decode(&self) -> bool {
        matches!(self.root(), Error::Decode(_))
    }

    /// Metrics label: `4xx` / `5xx` for status errors, `error` otherwise.
    pub fn status_class(&self) -> String {
        match self.status_error() {
            Some(status) => format!("{}xx", status.status.as_u16() / 100),
            None => "error".to_owned(),
        }
    }

    /// The structured status error, if this error (or its cause) is one.
    pub fn status_error(&self) -> Option<&StatusError> {
        match self.root() {
            Error::Status(status) => Some(status),
            _ => None,
        }
    }
}

/// Machine readable part of an API error response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

/// A non-success HTTP response, decoded from the response body.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusError {
    pub status: StatusCode,
    /// Decoded body, `None` when the body was not the documented JSON shape.
    pub body: Option<ErrorBody>,
    /// Raw response body as received.
    pub raw: String,
}

impl StatusError {
    pub fn from_body(status: StatusCode, raw: String) -> Self {
        let body = serde_json::from_str::<ErrorBody>(&raw).ok();
        Self { status, body, raw }
    }

    /// Human readable reason: the API message, falling back to the raw body
    /// and then to the canonical status text.
    pub fn reason(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|body| body.message.as_deref())
            .or_else(|| Some(self.raw.trim()).filter(|raw| !raw.is_empty()))
            .or_else(|| self.status.canonical_reason())
            .unwrap_or("unknown error")
    }

    pub fn error_code(&self) -> Option<&str> {
        self.body.as_ref().and_then(|body| body.error_code.as_deref())
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_code() {
            Some(code) => write!(f, "status {} ({}): {}", self.status.as_u16(), code, self.reason()),
            None => write!(f, "status {}: {}", self.status.as_u16(), self.reason()),
        }
    }
}

impl std::error::Error for StatusError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_prefers_api_message() {
        let raw = r#"{"status":"NOT_FOUND","message":"Charge not found","errorCode":"RESOURCE_NOT_FOUND"}"#;
        let err = StatusError::from_body(StatusCode::NOT_FOUND, raw.to_owned());
        assert_eq!(err.reason(), "Charge not found");
        assert_eq!(err.error_code(), Some("RESOURCE_NOT_FOUND"));
        assert_eq!(err.to_string(), "status 404 (RESOURCE_NOT_FOUND): Charge not found");
    }

    #[test]
    fn status_error_falls_back_to_raw_body_then_status_text() {
        let err = StatusError::from_body(StatusCode::BAD_GATEWAY, "upstream down".to_owned());
        assert!(err.body.is_none());
        assert_eq!(err.reason(), "upstream down");

        let err = StatusError::from_body(StatusCode::BAD_GATEWAY, String::new());
        assert_eq!(err.reason(), "Bad Gateway");
    }

    #[test]
    fn root_sees_through_context() {
        let err = Error::operation(
            Method::GET,
            "/v1/charges",
            Error::get_token(Error::MissingClientCredentials),
        );
        assert!(err.is_missing_client_credentials());
        assert_eq!(
            err.to_string(),
            "GET /v1/charges: get token: unable to create token - missing client ID and client secret"
        );
    }

    #[test]
    fn cancellation_is_not_wrapped() {
        assert!(matches!(Error::get_token(Error::Cancelled), Error::Cancelled));
    }
}
