//! HTTP client and configuration.

mod auth;
mod http;

pub use auth::Session;
pub use http::{api_error, HttpConfig, DEFAULT_BASE_URL};

use crate::api::{AuthApi, ProductsApi};
use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use http::{build_client, HttpExecutor};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating CatalogClient.
#[derive(Debug, Default)]
pub struct CatalogClientBuilder {
    session: Option<Session>,
    http_config: HttpConfig,
}

impl CatalogClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set authentication.
    pub fn auth(mut self, token: impl Into<String>, id: impl Into<String>) -> Self {
        self.session = Some(Session::new(token, id));
        self
    }

    /// Set authentication from a Session.
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Set base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.http_config.base_url = url.into();
        self
    }

    /// Set custom user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.http_config.custom_user_agent = Some(ua.into());
        self
    }

    /// Set connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.connect_timeout = timeout;
        self
    }

    /// Set read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.read_timeout = timeout;
        self
    }

    /// Build CatalogClient.
    pub fn build(self) -> Result<CatalogClient> {
        let http_client = build_client(&self.http_config)?;

        Ok(CatalogClient {
            inner: Arc::new(CatalogClientInner {
                http: http_client,
                config: self.http_config,
                session: self.session,
            }),
        })
    }
}

/// Internal client state.
pub(crate) struct CatalogClientInner {
    pub http: reqwest::Client,
    pub config: HttpConfig,
    pub session: Option<Session>,
}

impl CatalogClientInner {
    /// Get the session or error.
    pub fn require_auth(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(Error::AuthRequired)
    }

    /// Get the bearer token or error.
    pub fn bearer(&self) -> Result<&str> {
        Ok(self.require_auth()?.token.as_str())
    }

    /// Create HTTP executor.
    pub fn executor(&self) -> HttpExecutor<'_> {
        HttpExecutor::new(&self.http, &self.config)
    }
}

/// Client for the product catalog backend.
#[derive(Clone)]
pub struct CatalogClient {
    pub(crate) inner: Arc<CatalogClientInner>,
}

impl CatalogClient {
    /// Create a new client builder.
    pub fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Get the products API.
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.inner.clone())
    }

    /// Get the auth API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.inner.clone())
    }

    /// Low-level GET with the session's bearer token, decoding JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.inner.session.as_ref().map(|s| s.token.as_str());
        self.inner.executor().get(path, token).await
    }

    /// Low-level JSON POST with the session's bearer token.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.inner.session.as_ref().map(|s| s.token.as_str());
        self.inner.executor().post(path, body, token).await
    }

    /// Low-level JSON PUT with the session's bearer token.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.inner.session.as_ref().map(|s| s.token.as_str());
        self.inner.executor().put(path, body, token).await
    }

    /// Low-level DELETE with the session's bearer token.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let token = self.inner.session.as_ref().map(|s| s.token.as_str());
        self.inner.executor().delete(path, token).await
    }

    /// Check if the client is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.is_some()
    }

    /// Get the current session.
    pub fn session(&self) -> Option<&Session> {
        self.inner.session.as_ref()
    }

    /// Get the current user ID if authenticated.
    pub fn current_id(&self) -> Option<&str> {
        self.inner.session.as_ref().map(|s| s.id.as_str())
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("authenticated", &self.is_authenticated())
            .field("base_url", &self.inner.config.base_url)
            .finish()
    }
}
