//! HTTP client configuration and request execution.

use crate::error::{Error, Result, GENERIC_FAILURE};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Default catalog backend base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL for API requests.
    pub base_url: String,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout.
    pub read_timeout: Duration,
    /// Custom user agent.
    pub custom_user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(20),
            custom_user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Resolve a relative API path to a full URL.
    pub fn resolve_url(&self, path: &str) -> Result<Url> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(Error::Url);
        }

        Url::parse(&self.base_url)
            .and_then(|b| b.join(path.trim_start_matches('/')))
            .map_err(Error::Url)
    }
}

/// Build a reqwest client with the given configuration.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .read_timeout(config.read_timeout)
        .build()
        .map_err(Error::Network)
}

/// Map a non-success response body to an API error.
///
/// The backend reports failures as a JSON object with an optional `message`
/// field. When the body is not JSON, or carries no message, callers get the
/// generic fallback instead.
pub fn api_error(status: StatusCode, body: &[u8]) -> Error {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| GENERIC_FAILURE.to_owned());

    Error::api(status.as_u16(), message)
}

/// HTTP request executor.
pub struct HttpExecutor<'a> {
    client: &'a Client,
    config: &'a HttpConfig,
}

impl<'a> HttpExecutor<'a> {
    /// Create a new executor.
    pub fn new(client: &'a Client, config: &'a HttpConfig) -> Self {
        Self { client, config }
    }

    /// Build a request with common headers.
    fn build_request(&self, method: Method, url: Url, bearer: Option<&str>) -> RequestBuilder {
        let mut request = self.client.request(method, url);

        if let Some(ref ua) = self.config.custom_user_agent {
            request = request.header("User-Agent", ua.as_str());
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request
    }

    /// Execute a GET request and decode the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, bearer: Option<&str>) -> Result<T> {
        let url = self.config.resolve_url(path)?;
        let response = self
            .build_request(Method::GET, url, bearer)
            .send()
            .await
            .map_err(Error::Network)?;

        handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T> {
        let url = self.config.resolve_url(path)?;
        let response = self
            .build_request(Method::POST, url, bearer)
            .json(body)
            .send()
            .await
            .map_err(Error::Network)?;

        handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T> {
        let url = self.config.resolve_url(path)?;
        let response = self
            .build_request(Method::PUT, url, bearer)
            .json(body)
            .send()
            .await
            .map_err(Error::Network)?;

        handle_response(response).await
    }

    /// Execute a DELETE request, ignoring any response body.
    pub async fn delete(&self, path: &str, bearer: Option<&str>) -> Result<()> {
        let url = self.config.resolve_url(path)?;
        let response = self
            .build_request(Method::DELETE, url, bearer)
            .send()
            .await
            .map_err(Error::Network)?;

        expect_success(response).await
    }

    /// Execute a multipart request (POST or PUT), discarding the response
    /// body. Mutation callers re-fetch the list after a confirmed write
    /// instead of trusting the write response.
    pub async fn send_multipart(
        &self,
        method: Method,
        path: &str,
        form: Form,
        bearer: Option<&str>,
    ) -> Result<()> {
        let url = self.config.resolve_url(path)?;
        let response = self
            .build_request(method, url, bearer)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Network)?;

        expect_success(response).await
    }
}

/// Check the status and decode the JSON body.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(Error::Network)?;

    if !status.is_success() {
        log::debug!("request failed with status {}", status);
        return Err(api_error(status, &bytes));
    }

    serde_json::from_slice(&bytes).map_err(Error::Json)
}

/// Check the status and discard the body.
async fn expect_success(response: Response) -> Result<()> {
    let status = response.status();

    if !status.is_success() {
        let bytes = response.bytes().await.map_err(Error::Network)?;
        log::debug!("request failed with status {}", status);
        return Err(api_error(status, &bytes));
    }

    Ok(())
}
