//! The request pipeline.
//!
//! Every call runs the same linear sequence:
//!
//! 1. **Outgoing**: attach `Authorization` unless the path is allow-listed,
//!    set `Content-Type` for non-multipart bodies, mark the call as XHR.
//! 2. **Transport success**: parse the envelope and classify its code.
//! 3. **Transport failure**: map the cause to a fixed user-facing message.
//!
//! Every failure is reported once through the [`Notifier`] and returned as
//! an [`AppError`] carrying the same message. Session expiry and HTTP 401
//! also clear the credential store and send the user to the login view.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::auth::{CredentialField, CredentialStore};
use crate::error::{AppError, Result};
use crate::http::envelope::Envelope;
use crate::http::hooks::{LogNavigator, LogNotifier, Navigator, Notifier};
use crate::http::request::{ApiRequest, PreparedRequest};
use crate::http::transport::{RawResponse, ReqwestTransport, Transport, TransportError};
use crate::models::{ClientConfig, Messages};

pub const AUTHORIZATION: &str = "Authorization";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const X_REQUESTED_WITH: &str = "X-Requested-With";

const BEARER_PREFIX: &str = "Bearer ";
const JSON_MEDIA_TYPE: &str = "application/json";
const XHR_MARKER: &str = "XMLHttpRequest";

/// API client applying the request pipeline around a [`Transport`].
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    allow_list: Vec<String>,
    login_path: String,
    unauthorized_delay: Duration,
    messages: Messages,
}

impl ApiClient {
    /// Create a client that reports through the log.
    pub fn new(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
    ) -> Self {
        Self {
            transport,
            store,
            notifier: Arc::new(LogNotifier),
            navigator: Arc::new(LogNavigator),
            allow_list: config.allow_list.clone(),
            login_path: config.login_path.clone(),
            unauthorized_delay: config.unauthorized_redirect_delay(),
            messages: config.messages.clone(),
        }
    }

    /// Create a client sending over HTTP with `reqwest`.
    pub fn connect(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(config, Arc::new(transport), store))
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Replace the navigator.
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// The credential store the pipeline reads from.
    pub fn store(&self) -> &dyn CredentialStore {
        self.store.as_ref()
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Whether `path` is exempt from the Authorization header.
    pub fn is_allow_listed(&self, path: &str) -> bool {
        self.allow_list.iter().any(|entry| path.contains(entry.as_str()))
    }

    /// Run the request through the pipeline and return the success envelope.
    pub async fn execute(&self, request: ApiRequest) -> Result<Envelope> {
        let prepared = self.prepare(request);
        match self.transport.send(&prepared).await {
            Ok(raw) => self.on_response(raw).await,
            Err(error) => Err(self.on_failure(error).await),
        }
    }

    /// Run the request and deserialize the envelope's `data`.
    ///
    /// A payload that does not fit `T` is reported as a malformed response.
    pub async fn call<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let path = request.path.clone();
        self.execute(request).await?.into_data().map_err(|e| {
            log::error!("Unexpected payload from {path}: {e}");
            self.malformed()
        })
    }

    /// Run the request, ignoring any payload.
    pub async fn call_unit(&self, request: ApiRequest) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Outgoing phase: compute the headers for `request`.
    pub fn prepare(&self, request: ApiRequest) -> PreparedRequest {
        let allow_listed = self.is_allow_listed(&request.path);
        let multipart = request.body.is_multipart();
        let mut headers = Vec::with_capacity(3);

        if !allow_listed {
            if let Some(token) = self.store.get(CredentialField::Token) {
                if !token.is_empty() {
                    headers.push((AUTHORIZATION.to_string(), bearer(&token)));
                }
            }
        }
        // Multipart bodies get their boundary-carrying type from the transport.
        if !multipart {
            headers.push((CONTENT_TYPE.to_string(), JSON_MEDIA_TYPE.to_string()));
        }
        headers.push((X_REQUESTED_WITH.to_string(), XHR_MARKER.to_string()));

        log::debug!(
            "Sending request: {} {} (query: {:?}, allow-listed: {}, multipart: {})",
            request.method,
            request.path,
            request.query,
            allow_listed,
            multipart
        );

        PreparedRequest { request, headers }
    }

    /// Classify a 2xx response by its envelope.
    pub async fn on_response(&self, raw: RawResponse) -> Result<Envelope> {
        log::debug!(
            "Received response: status {} ({} bytes)",
            raw.status,
            raw.body.len()
        );

        let Some(envelope) = Envelope::parse(&raw.body) else {
            return Err(self.malformed());
        };

        if envelope.is_success() {
            return Ok(envelope);
        }

        log::warn!(
            "Business error: code={} message={:?}",
            envelope.code,
            envelope.message
        );
        if let Some(message) = &envelope.message {
            self.notifier.error(message);
        }

        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| self.messages.business_failed.clone());

        if envelope.is_session_expired() {
            self.end_session(Duration::ZERO).await;
            return Err(AppError::SessionExpired { message });
        }

        Err(AppError::Business {
            code: envelope.code,
            message,
        })
    }

    /// Classify a transport failure, notify, and return the error.
    pub async fn on_failure(&self, error: TransportError) -> AppError {
        let error = match error {
            TransportError::Status { status, body } => {
                log::error!("HTTP error: status {status}");
                let message = match self.messages.for_status(status) {
                    Some(message) => message.to_string(),
                    None => body_message(&body)
                        .unwrap_or_else(|| self.messages.request_failed(status)),
                };
                if status == 401 {
                    self.end_session(self.unauthorized_delay).await;
                }
                AppError::Status { status, message }
            }
            TransportError::NoResponse(detail) => {
                log::error!("Request timed out or connection failed: {detail}");
                AppError::Network(self.messages.network.clone())
            }
            TransportError::Build(detail) => {
                log::error!("Request configuration error: {detail}");
                AppError::Request(self.messages.request_config.clone())
            }
        };

        if let Some(message) = error.user_message() {
            self.notifier.error(message);
        }
        error
    }

    /// Notify and build the malformed-response error.
    fn malformed(&self) -> AppError {
        let message = self.messages.malformed_response.clone();
        self.notifier.error(&message);
        AppError::MalformedResponse(message)
    }

    /// Drop the stored session and send the user to the login view.
    async fn end_session(&self, delay: Duration) {
        if let Err(e) = self.store.clear_all().await {
            log::warn!("Failed to clear credentials: {e}");
        }
        self.navigator.navigate(&self.login_path, delay);
    }
}

/// Authorization header value, adding the scheme prefix only when missing.
fn bearer(token: &str) -> String {
    if token.starts_with(BEARER_PREFIX) {
        token.to_string()
    } else {
        format!("{BEARER_PREFIX}{token}")
    }
}

/// `message` of an error body, when the body is an envelope-like object.
fn body_message(body: &[u8]) -> Option<String> {
    Envelope::parse(body).and_then(|envelope| envelope.message)
}
