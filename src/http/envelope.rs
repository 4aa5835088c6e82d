//! The `{code, message, data}` wrapper every endpoint responds with.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Result;

/// Code of a business-successful call.
pub const SUCCESS_CODE: &str = "00000";

/// Code signalling that the login session is no longer valid.
pub const SESSION_EXPIRED_CODE: &str = "A0230";

/// Parsed response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Empty when the server omitted it
    pub code: String,
    pub message: Option<String>,
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse a response body. `None` unless the body is a JSON object.
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(body).ok()? {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    fn from_map(mut map: Map<String, Value>) -> Self {
        let code = match map.remove("code") {
            Some(Value::String(code)) => code,
            Some(Value::Number(code)) => code.to_string(),
            _ => String::new(),
        };
        let message = match map.remove("message") {
            Some(Value::String(message)) if !message.is_empty() => Some(message),
            _ => None,
        };
        let data = map.remove("data").filter(|d| !d.is_null());
        Self {
            code,
            message,
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn is_session_expired(&self) -> bool {
        self.code == SESSION_EXPIRED_CODE
    }

    /// Deserialize `data`, treating an absent payload as JSON `null`.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.data.unwrap_or(Value::Null))?)
    }
}
