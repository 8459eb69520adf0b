// src/tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::cache::credential::Credential;
use crate::client::Client;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Auth endpoint response body for a credential valid for the next hour.
pub fn credential_json(access_token: &str, refresh_token: &str) -> Value {
    let now = Utc::now();
    json!({
        "accessToken": access_token,
        "accessTokenExpirationDate": now + Duration::hours(1),
        "refreshToken": refresh_token,
        "refreshTokenExpirationDate": now + Duration::days(1),
    })
}

/// Credential with an expired access token and a valid refresh token.
pub fn refreshable_credential(refresh_token: &str) -> Credential {
    let now = Utc::now();
    Credential::new("stale-access", now - Duration::minutes(1), refresh_token, now + Duration::hours(1))
}

pub fn empty_page() -> Value {
    json!({
        "data": [],
        "meta": {"currentPage": 1, "perPage": 10, "totalPageCount": 1, "totalItemCount": 0}
    })
}

pub fn client_with_identity(base_url: &str) -> Client {
    Client::builder()
        .base_url(base_url)
        .client_id_and_secret("test-client", "test-secret")
        .build()
        .expect("client")
}
