//! StreamHub API client
//!
//! Single point of contact for every remote call. Builds URLs from the base
//! URL, attaches the session's bearer token, marshals JSON and turns failure
//! responses into [`ApiError`]s. There is no retry, backoff or timeout: one
//! failed attempt is one reported failure.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::endpoints::{Endpoint, HttpMethod};
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::models::to_query;
use crate::session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};

/// Per-call request descriptor
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Sent after the defaults; a header named here replaces the default of the same name
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

/// StreamHub REST API client
#[derive(Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: Session,
}

impl ApiClient {
    /// Create a client from config: resolved base URL, token in the session file
    pub fn new(config: &Config) -> Self {
        let store = FileTokenStore::new(config.resolve_token_path());
        Self::with_store(config.resolve_base_url(), store)
    }

    /// Create a client with a custom base URL and no persisted token (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_store(base_url, MemoryTokenStore::new())
    }

    /// Create a client backed by any token store
    pub fn with_store(base_url: impl Into<String>, store: impl TokenStore + 'static) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(concat!("streamhub/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            session: Session::new(store),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    /// Replace the session token (or clear it with `None`), in memory and in the store
    pub fn set_token(&self, token: Option<&str>) -> Result<()> {
        self.session.set_token(token)
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    /// Forget the session token
    pub fn logout(&self) -> Result<()> {
        self.session.set_token(None)
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    fn headers(&self, overrides: &[(String, String)]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.token() {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidRequest("session token is not a valid header value".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("header {}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::InvalidRequest(format!("header {}: {}", name.as_str(), e)))?;
            headers.insert(name, value);
        }

        Ok(headers)
    }

    /// Issue a request and return the decoded JSON body untouched
    pub async fn request_json(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let headers = self.headers(&options.headers)?;

        tracing::debug!(method = %options.method, path, "api request");

        let mut request = self
            .client
            .request(options.method.as_reqwest(), &url)
            .headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::debug!(path, error = %e, "api transport failure");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        let parsed: Option<Value> = if text.trim().is_empty() {
            Some(Value::Null)
        } else {
            serde_json::from_str(&text).ok()
        };

        if !status.is_success() {
            let err = ApiError::from_body(status.as_u16(), parsed.as_ref());
            tracing::debug!(path, status = status.as_u16(), error = %err, "api request failed");
            return Err(err);
        }

        parsed.ok_or_else(|| ApiError::Decode(format!("{} returned a non-JSON body", path)))
    }

    /// Issue a request and decode the body into `T`
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let value = self.request_json(path, options).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(format!("{}: {}", path, e)))
    }

    /// Drive one endpoint table entry through [`ApiClient::request`]
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        ids: &[u64],
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<T> {
        if endpoint.requires_auth() && !self.is_authenticated() {
            tracing::warn!(
                endpoint = endpoint.name,
                "calling an authenticated endpoint without a session token"
            );
        }
        if endpoint.body != body.is_some() {
            tracing::debug!(endpoint = endpoint.name, "body presence differs from endpoint table");
        }

        let mut options = RequestOptions::new(endpoint.method).query(query);
        options.body = body;
        self.request(&endpoint.render(ids), options).await
    }

    /// Endpoint call with no query and no body
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint, ids: &[u64]) -> Result<T> {
        self.call(endpoint, ids, Vec::new(), None).await
    }

    /// Endpoint call with query parameters
    pub(crate) async fn fetch_with<T, Q>(&self, endpoint: &Endpoint, ids: &[u64], query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize,
    {
        self.call(endpoint, ids, to_query(query)?, None).await
    }

    /// Endpoint call with a JSON body
    pub(crate) async fn send<T, B>(&self, endpoint: &Endpoint, ids: &[u64], body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let body = serde_json::to_value(body)?;
        self.call(endpoint, ids, Vec::new(), Some(body)).await
    }
}
