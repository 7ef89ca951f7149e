//! Auth API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{CatalogClientInner, Session};
use crate::error::Result;

/// Login endpoint.
const LOGIN_PATH: &str = "/api/auth/login";

/// Credentials for a login request.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Backend response to a successful login.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// User ID.
    pub id: String,
    /// Display username.
    pub username: String,
    /// Granted roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Session::new(resp.token, resp.id)
            .with_username(resp.username)
            .with_roles(resp.roles)
    }
}

/// API for authentication operations.
pub struct AuthApi {
    client: Arc<CatalogClientInner>,
}

impl AuthApi {
    pub(crate) fn new(client: Arc<CatalogClientInner>) -> Self {
        Self { client }
    }

    /// Exchange credentials for a session. Does not require prior auth.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let request = LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
        };

        let response: LoginResponse = self
            .client
            .executor()
            .post(LOGIN_PATH, &request, None)
            .await?;

        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_response_to_session() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"token":"t1","id":"u1","username":"admin","roles":["ROLE_ADMIN"]}"#,
        )
        .unwrap();
        let session = Session::from(response);

        assert_eq!(session.token, "t1");
        assert_eq!(session.username, "admin");
        assert!(session.has_role("ROLE_ADMIN"));
    }

    #[test]
    fn test_login_response_roles_default() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"token":"t","id":"u","username":"x"}"#).unwrap();
        assert!(response.roles.is_empty());
    }
}
