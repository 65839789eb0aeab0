//! Session and login payloads. The access token is kept behind
//! `SecretString` so `Debug` output and tracing fields never print it.

use crate::features::auth::role::Role;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Public profile of the signed-in user, persisted next to the credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub role: Role,
}

/// Authenticated identity plus the bearer credential used by the transport.
#[derive(Clone, Debug)]
pub struct Session {
    pub user: UserProfile,
    access_token: SecretString,
}

impl Session {
    #[must_use]
    pub fn new(user: UserProfile, access_token: impl Into<String>) -> Self {
        Self {
            user,
            access_token: SecretString::from(access_token.into()),
        }
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// Raw token for the `Authorization` header and persisted storage only.
    #[must_use]
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        self.user == other.user && self.access_token() == other.access_token()
    }
}

impl Eq for Session {}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
    pub password: String,
}

/// Login answer from the API; converted into a [`Session`] before it reaches
/// the session store.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserProfile,
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.user, response.access_token)
    }
}
