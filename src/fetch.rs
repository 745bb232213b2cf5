//! HTTP plumbing for the real backend.
//!
//! Every request carries the session bearer token (when present) and
//! the per-session `x-correlation-id`. Error responses are parsed into
//! the uniform [`ApiError`] body; anything unparseable maps to
//! `UNKNOWN_ERROR` with the HTTP status. A 401 clears the stored
//! session tokens.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use clickdelivery_core::{ApiError, ApiResult, SessionStore};

/// Shared state every HTTP-backed facade needs to issue a request.
#[derive(Clone)]
pub struct HttpContext {
    pub base_url: String,
    pub http_client: Client,
    pub session: Arc<SessionStore>,
    pub request_timeout: Option<Duration>,
}

impl HttpContext {
    pub fn new(
        base_url: &str,
        http_client: Client,
        session: Arc<SessionStore>,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            session,
            request_timeout,
        }
    }

    fn request(&self, method: Method, path: &str) -> FetchBuilder {
        FetchBuilder::new(self, method, format!("{}{}", self.base_url, path))
    }

    pub fn get(&self, path: &str) -> FetchBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> FetchBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> FetchBuilder {
        self.request(Method::PUT, path)
    }

    pub fn patch(&self, path: &str) -> FetchBuilder {
        self.request(Method::PATCH, path)
    }

    pub fn delete(&self, path: &str) -> FetchBuilder {
        self.request(Method::DELETE, path)
    }
}

/// Helper for building and executing a single request.
pub struct FetchBuilder {
    client: Client,
    session: Arc<SessionStore>,
    url: String,
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    timeout: Option<Duration>,
}

impl FetchBuilder {
    fn new(context: &HttpContext, method: Method, url: String) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        Self {
            client: context.http_client.clone(),
            session: context.session.clone(),
            url,
            method,
            headers,
            query_params: Vec::new(),
            body: None,
            timeout: context.request_timeout,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ApiResult<Self> {
        let json = serde_json::to_vec(body)
            .map_err(|err| ApiError::unknown(format!("Failed to encode request body: {err}"), 500))?;
        self.body = Some(json);
        Ok(self)
    }

    fn build(&self) -> ApiResult<reqwest::RequestBuilder> {
        let mut url = Url::parse(&self.url)
            .map_err(|err| ApiError::unknown(format!("Invalid request URL: {err}"), 500))?;

        if !self.query_params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.query_params {
                query_pairs.append_pair(key, value);
            }
        }

        let mut req = self.client.request(self.method.clone(), url.as_str());
        req = req.headers(self.headers.clone());
        if let Some(token) = self.session.auth_token() {
            req = req.bearer_auth(token);
        }
        req = req.header(
            "x-correlation-id",
            self.session.get_or_create_correlation_id(),
        );
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        if let Some(body) = &self.body {
            req = req.body(body.clone());
        }

        Ok(req)
    }

    async fn send(&self) -> ApiResult<reqwest::Response> {
        tracing::debug!(method = %self.method, url = %self.url, "sending request");
        let response = self.build()?.send().await.map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.session.clear_session();
        }

        let body = response.text().await.unwrap_or_default();
        Err(parse_error_body(&body, status.as_u16()))
    }

    /// Execute the request and parse the response body as JSON.
    pub async fn execute<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let response = self.send().await?;
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|err| {
            ApiError::unknown(format!("Failed to decode response body: {err}"), status)
        })
    }

    /// Execute the request, discarding any response body.
    pub async fn execute_unit(&self) -> ApiResult<()> {
        self.send().await?;
        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::unknown("Request timed out", 500)
    } else {
        ApiError::unknown(format!("Request failed: {err}"), 500)
    }
}

fn parse_error_body(body: &str, status: u16) -> ApiError {
    serde_json::from_str::<ApiError>(body)
        .unwrap_or_else(|_| ApiError::unknown("An unexpected error occurred", status))
}
