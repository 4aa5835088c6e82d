//! HTTP request pipeline.
//!
//! - `request`: plain-data description of an outgoing call
//! - `envelope`: the `{code, message, data}` response wrapper
//! - `transport`: the network seam (`reqwest` in production)
//! - `hooks`: notification and navigation side channels
//! - `client`: `ApiClient`, which ties them together

pub mod client;
pub mod envelope;
pub mod hooks;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use envelope::{Envelope, SESSION_EXPIRED_CODE, SUCCESS_CODE};
pub use hooks::{LogNavigator, LogNotifier, Navigator, Notifier};
pub use request::{ApiRequest, FormPart, MultipartForm, PartValue, PreparedRequest, RequestBody};
pub use transport::{RawResponse, ReqwestTransport, Transport, TransportError};
