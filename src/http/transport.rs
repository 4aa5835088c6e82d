//! Network transport behind the request pipeline.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use thiserror::Error;

use crate::error::Result;
use crate::http::request::{MultipartForm, PartValue, PreparedRequest, RequestBody};
use crate::models::ClientConfig;

/// A 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Why a request did not produce a 2xx response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Server answered with a non-2xx status
    #[error("HTTP status {status}")]
    Status { status: u16, body: Vec<u8> },

    /// Sent, but no response arrived (timeout, refused, reset)
    #[error("no response: {0}")]
    NoResponse(String),

    /// The request could not be built or sent at all
    #[error("request not sent: {0}")]
    Build(String),
}

/// Trait for request transports.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a prepared request and return the 2xx response.
    async fn send(&self, request: &PreparedRequest) -> std::result::Result<RawResponse, TransportError>;
}

/// Transport over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Create a transport from the client configuration.
    ///
    /// Cookies are kept between calls so the server's session cookie travels
    /// alongside the token.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout())
            .cookie_store(true)
            .build()?;
        Ok(Self::with_client(client, &config.api_base_url))
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn to_reqwest_form(form: &MultipartForm) -> Form {
    let mut out = Form::new();
    for part in &form.parts {
        out = match &part.value {
            PartValue::Text(value) => out.text(part.name.clone(), value.clone()),
            PartValue::File { file_name, bytes } => out.part(
                part.name.clone(),
                Part::bytes(bytes.clone()).file_name(file_name.clone()),
            ),
        };
    }
    out
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::Build(error.to_string())
    } else {
        TransportError::NoResponse(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, prepared: &PreparedRequest) -> std::result::Result<RawResponse, TransportError> {
        let request = &prepared.request;
        let url = self.url_for(&request.path);

        let mut builder = self.client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &prepared.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(
                serde_json::to_vec(value).map_err(|e| TransportError::Build(e.to_string()))?,
            ),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)),
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let body = response.bytes().await.map_err(classify)?.to_vec();

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
