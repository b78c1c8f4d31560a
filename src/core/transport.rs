// src/core/transport.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::core::errors::TransportError;

/// A single GET request issued by one of the scanners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    /// Value for the `Accept` header, when the provider needs one.
    pub accept: Option<&'static str>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self { url, accept: None }
    }

    pub fn accept(mut self, media_type: &'static str) -> Self {
        self.accept = Some(media_type);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Status line text, e.g. `503 Service Unavailable`.
    pub fn status_text(&self) -> String {
        self.status.to_string()
    }
}

/// The seam between the scanners and the network. Every external lookup goes
/// through exactly one `get` call.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request).await
    }
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().user_agent(user_agent.to_string()).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(url = %request.url, "Sending GET request.");
        let mut builder = self.client.get(request.url.clone());
        if let Some(media_type) = request.accept {
            builder = builder.header(ACCEPT, media_type);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "HTTP request failed.");
            if e.is_connect() {
                TransportError::Connect {
                    host: request.url.host_str().unwrap_or_default().to_string(),
                    reason: e.to_string(),
                }
            } else {
                TransportError::Request { url: request.url.to_string(), reason: e.to_string() }
            }
        })?;

        // Status first: `text()` consumes the response.
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(url = %request.url, error = %e, "Failed to read response body.");
            TransportError::Body { url: request.url.to_string(), reason: e.to_string() }
        })?;

        debug!(url = %request.url, status = %status, bytes = body.len(), "Received HTTP response.");
        Ok(HttpResponse { status, body })
    }
}
