// src/ports/envelope.rs
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response shape handed to the UI: `success` is 1 when the call produced
/// its result, otherwise 0 with a user-facing `msg`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: u8,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn ok<T: Serialize>(data: &T) -> Self {
        match serde_json::to_value(data) {
            Ok(Value::Null) => Self::ok_empty(),
            Ok(value) => Self {
                success: 1,
                msg: String::new(),
                data: Some(value),
            },
            Err(e) => Self::failure(e.to_string()),
        }
    }

    pub fn ok_empty() -> Self {
        Self {
            success: 1,
            ..Default::default()
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            success: 0,
            msg: msg.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success == 1
    }
}

impl<T: Serialize> From<Result<T, DomainError>> for Envelope {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(value) => Self::ok(&value),
            Err(err) => Self::failure(err.to_string()),
        }
    }
}
