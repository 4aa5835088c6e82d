//! Outgoing request description.
//!
//! Requests are plain data until the transport sends them, so the pipeline
//! can inspect and decorate them and tests can assert on them.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Body of an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

/// A multipart form built from text fields and file parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartForm {
    pub parts: Vec<FormPart>,
}

/// One named part of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue {
    Text(String),
    File { file_name: String, bytes: Vec<u8> },
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Append a file part.
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File {
                file_name: file_name.into(),
                bytes,
            },
        });
        self
    }

    /// Text value of the first field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }
}

/// Method, path, query, and body of an API call.
///
/// `path` is relative to the configured API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append query-string pairs.
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Use a multipart form as the payload.
    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// A request after the outgoing phase, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub request: ApiRequest,
    pub headers: Vec<(String, String)>,
}

impl PreparedRequest {
    /// Value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
