//! HTTP responses.

use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Result};

/// A received response whose body has not been read yet.
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn from_reqwest(response: reqwest::Response) -> Self {
        Self { inner: response }
    }

    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// A header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// The URL the response came from, after redirects.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    /// Decode the body as JSON.
    ///
    /// The body is read in full first, so a malformed document is reported
    /// as [`NetworkError::Json`] rather than as a transport error.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Pass 2xx responses through; turn anything else into
    /// [`NetworkError::HttpStatus`] carrying the body text, if any.
    pub async fn ensure_success(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = self.text().await.ok().filter(|body| !body.trim().is_empty());
        tracing::debug!(target: "terra_select_net::http", status, ?message, "request rejected");
        Err(NetworkError::HttpStatus { status, message })
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("url", &self.url())
            .finish()
    }
}
