//! HTTP request types and builder.

use std::time::Duration;

use serde::Serialize;

use super::client::HttpClient;
use super::response::HttpResponse;
use crate::error::{NetworkError, Result};

/// HTTP request methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// The body of an HTTP request.
#[derive(Clone, Debug, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON body (serialized from a value).
    Json(serde_json::Value),
}

/// A built HTTP request ready to be sent.
#[derive(Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The request URL, without the query pairs.
    pub url: String,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
    /// Request timeout override.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// The URL with the query pairs appended.
    pub fn full_url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Builder for constructing HTTP requests.
pub struct HttpRequestBuilder {
    client: HttpClient,
    method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    body: RequestBody,
    timeout: Option<Duration>,
    body_error: Option<NetworkError>,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, method: HttpMethod, url: String) -> Self {
        Self {
            client,
            method,
            url,
            query: Vec::new(),
            body: RequestBody::None,
            timeout: None,
            body_error: None,
        }
    }

    /// Add a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body from a serializable value.
    ///
    /// A value that fails to serialize makes [`send`](Self::send) fail.
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = RequestBody::Json(value),
            Err(e) => {
                tracing::error!(target: "terra_select_net::http", "Failed to serialize JSON body: {}", e);
                self.body_error = Some(e.into());
            }
        }
        self
    }

    /// Set a timeout for this specific request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the request without sending it.
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url,
            query: self.query,
            body: self.body,
            timeout: self.timeout,
        }
    }

    /// Send the request and wait for the response.
    pub async fn send(mut self) -> Result<HttpResponse> {
        if let Some(err) = self.body_error.take() {
            return Err(err);
        }
        let client = self.client.clone();
        let request = self.build();
        let url = request.full_url()?;

        tracing::debug!(target: "terra_select_net::http", method = %request.method, %url, "sending request");

        let mut req_builder = client
            .reqwest_client()
            .request(request.method.to_reqwest(), url);

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        if let RequestBody::Json(value) = request.body {
            req_builder = req_builder.json(&value);
        }

        let response = req_builder.send().await?;
        tracing::debug!(
            target: "terra_select_net::http",
            status = response.status().as_u16(),
            "response received"
        );
        Ok(HttpResponse::from_reqwest(response))
    }
}
