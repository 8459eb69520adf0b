use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::helpers::time::now;

/// Access / refresh token pair as issued by the auth endpoints.
///
/// A credential is never updated in place: every issuance or refresh yields a
/// new value that replaces the cached one.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub access_token: String,
    pub access_token_expiration_date: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_token_expiration_date: DateTime<Utc>,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"***")
            .field("access_token_expiration_date", &self.access_token_expiration_date)
            .field("refresh_token", &"***")
            .field("refresh_token_expiration_date", &self.refresh_token_expiration_date)
            .finish()
    }
}

/// Where a credential stands relative to a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialState {
    /// Access token still valid.
    Fresh,
    /// Access token expired, refresh token still valid.
    Refreshable,
    /// Both tokens expired.
    Expired,
}

impl Credential {
    pub fn new(
        access_token: impl Into<String>,
        access_token_expiration_date: DateTime<Utc>,
        refresh_token: impl Into<String>,
        refresh_token_expiration_date: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            access_token_expiration_date,
            refresh_token: refresh_token.into(),
            refresh_token_expiration_date,
        }
    }

    pub fn state_at(&self, at: DateTime<Utc>) -> CredentialState {
        if at < self.access_token_expiration_date {
            CredentialState::Fresh
        } else if at < self.refresh_token_expiration_date {
            CredentialState::Refreshable
        } else {
            CredentialState::Expired
        }
    }

    pub fn state(&self) -> CredentialState {
        self.state_at(now())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn credential(access_in: i64, refresh_in: i64) -> Credential {
        let now = now();
        Credential::new(
            "access",
            now + Duration::seconds(access_in),
            "refresh",
            now + Duration::seconds(refresh_in),
        )
    }

    #[test]
    fn states_are_exclusive() {
        let at = now();
        assert_eq!(credential(60, 3600).state_at(at), CredentialState::Fresh);
        assert_eq!(credential(-60, 3600).state_at(at), CredentialState::Refreshable);
        assert_eq!(credential(-60, -1).state_at(at), CredentialState::Expired);
    }

    #[test]
    fn expiry_instant_counts_as_expired() {
        let c = credential(0, 0);
        assert_eq!(c.state_at(c.access_token_expiration_date), CredentialState::Expired);
    }

    #[test]
    fn decodes_auth_response() {
        let json = r#"{
            "accessToken": "a-1",
            "accessTokenExpirationDate": "2022-05-12T15:56:45.999189Z",
            "refreshToken": "r-1",
            "refreshTokenExpirationDate": "2022-05-13T15:56:45Z"
        }"#;
        let c: Credential = serde_json::from_str(json).unwrap();
        assert_eq!(c.access_token, "a-1");
        assert_eq!(c.refresh_token, "r-1");
        assert_eq!(c.bearer(), "Bearer a-1");
        assert!(c.access_token_expiration_date < c.refresh_token_expiration_date);
    }

    #[test]
    fn debug_output_hides_tokens() {
        let now = now();
        let c = Credential::new("at-secret-1", now, "rt-secret-1", now);
        let printed = format!("{c:?}");
        assert!(!printed.contains("at-secret-1"), "{printed}");
        assert!(!printed.contains("rt-secret-1"), "{printed}");
        assert!(printed.contains("access_token_expiration_date"));
    }
}
