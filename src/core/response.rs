//! Invocation response envelope handed back to the transport.

use serde::Serialize;

use crate::core::payload::Payload;
use crate::error::Result;

pub const STATUS_OK: i32 = 200;
pub const STATUS_ERROR: i32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: i32,
    pub message: String,
    pub payload: Payload,
}

impl Response {
    pub fn success(payload: Payload) -> Self {
        Self {
            status: STATUS_OK,
            message: String::new(),
            payload,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR,
            message: message.into(),
            payload: Payload::empty(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

impl From<Result<Payload>> for Response {
    fn from(result: Result<Payload>) -> Self {
        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => Response::error(e.to_string()),
        }
    }
}

/// JSON view of a response, with the payload rendered as text.
#[derive(Debug, Serialize)]
pub struct ResponseView {
    pub status: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub payload: String,
}

impl From<&Response> for ResponseView {
    fn from(response: &Response) -> Self {
        Self {
            status: response.status,
            message: response.message.clone(),
            payload: response.payload.to_string(),
        }
    }
}
