//! Transport layer: endpoint paths and JSON wire-format details.

mod account;
mod reports;
mod send;

use std::fmt;

use serde_json::Value;

pub use account::{
    decode_credit_response, decode_invalid_numbers_response, encode_check_credit,
    encode_check_invalid_numbers,
};
pub use reports::{
    decode_messages_response, decode_status_response, encode_cancel_scheduled,
    encode_delivery_report, encode_recent_reports, encode_sent_messages, encode_sms_status,
};
pub use send::{encode_send_schedule, encode_send_test, encode_send_verify};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to encode JSON request body: {0}")]
    Json(#[from] serde_json::Error),
}

/// HTTP verbs accepted by the SMS.ir API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(value: HttpMethod) -> Self {
        match value {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One remote operation: verb, path relative to the base URL, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl Endpoint {
    fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }

    fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// Look up a scalar field; a missing key and an explicit `null` are both absent.
fn optional_field(response: &Value, key: &str) -> Option<Value> {
    response.get(key).filter(|value| !value.is_null()).cloned()
}

/// Look up a list field; a missing key or `null` yields an empty list.
fn list_field(response: &Value, key: &str) -> Vec<Value> {
    match response.get(key) {
        Some(Value::Array(items)) => items.clone(),
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            tracing::warn!(field = key, "expected a JSON array, got: {other}");
            Vec::new()
        }
    }
}
