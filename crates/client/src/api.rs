//! Thin REST wrapper around the wirekit HTTP API.
//!
//! Handles URL building, the `{ "data": ... }` response envelope and the
//! mapping of status codes onto [`RemoteApiError`].

use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Errors from the REST layer.
#[derive(Debug, thiserror::Error)]
pub enum RemoteApiError {
    /// The base URL cannot carry path segments.
    #[error("invalid base URL: {0}")]
    InvalidUrl(String),

    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("remote API error ({status}): {body}")]
    Status {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl RemoteApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// HTTP client bound to one wirekit server.
#[derive(Debug, Clone)]
pub struct RemoteApi {
    client: reqwest::Client,
    base_url: Url,
}

impl RemoteApi {
    /// * `base_url` - server root, e.g. `http://host:3000`. The `/api/v1`
    ///   prefix is added per request.
    pub fn new(base_url: &str) -> Result<Self, RemoteApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, RemoteApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| RemoteApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteApiError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Root-relative URL; each segment is percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, RemoteApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL under `/api/v1`.
    fn api_url(&self, segments: &[&str]) -> Result<Url, RemoteApiError> {
        let mut all = vec!["api", "v1"];
        all.extend_from_slice(segments);
        self.url(&all)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    // ---- verbs ----

    /// `GET /health`; succeeds on any 2xx.
    pub async fn health(&self) -> Result<(), RemoteApiError> {
        let url = self.url(&["health"])?;
        let response = self.request(Method::GET, url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, RemoteApiError> {
        let url = self.api_url(segments)?;
        let response = self.request(Method::GET, url).query(query).send().await?;
        Self::parse_data(response).await
    }

    /// `GET` that maps a 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, RemoteApiError> {
        match self.get(segments, &[]).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<(), RemoteApiError> {
        let url = self.api_url(segments)?;
        let response = self.request(Method::PUT, url).json(body).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// `DELETE`; `Ok(false)` when the server answers 404.
    pub async fn delete(&self, segments: &[&str]) -> Result<bool, RemoteApiError> {
        let url = self.api_url(segments)?;
        let response = self.request(Method::DELETE, url).send().await?;
        match Self::ensure_success(response).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    // ---- private helpers ----

    async fn ensure_success(response: Response) -> Result<Response, RemoteApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RemoteApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_data<T: DeserializeOwned>(response: Response) -> Result<T, RemoteApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Envelope<T>>().await?.data)
    }
}
