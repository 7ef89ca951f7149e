//! Persisted session state.

use crate::client::Session;
use serde::{Deserialize, Serialize};

/// The auth slice of application state.
///
/// Absence of `token` means unauthenticated. `roles` is always present,
/// defaulting to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    /// Bearer token, if logged in.
    pub token: Option<String>,
    /// User ID.
    pub id: Option<String>,
    /// Display username.
    pub username: Option<String>,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl AuthState {
    /// Parse persisted state.
    ///
    /// Stored state is either `{"auth": {...}}` or the flat fields at top
    /// level; both shapes are accepted. Malformed input falls back to
    /// defaults instead of failing.
    pub fn from_persisted(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(err) => {
                log::warn!("ignoring malformed persisted auth state: {}", err);
                return Self::default();
            }
        };

        let slice = value.get("auth").unwrap_or(&value);
        serde_json::from_value(slice.clone()).unwrap_or_else(|err| {
            log::warn!("ignoring unreadable persisted auth state: {}", err);
            Self::default()
        })
    }

    /// Check if this state carries a token.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build a client session, if authenticated.
    pub fn to_session(&self) -> Option<Session> {
        let token = self.token.clone()?;
        Some(
            Session::new(token, self.id.clone().unwrap_or_default())
                .with_username(self.username.clone().unwrap_or_default())
                .with_roles(self.roles.clone()),
        )
    }
}

impl From<&Session> for AuthState {
    fn from(session: &Session) -> Self {
        Self {
            token: Some(session.token.clone()),
            id: Some(session.id.clone()),
            username: Some(session.username.clone()),
            roles: session.roles.clone(),
        }
    }
}
