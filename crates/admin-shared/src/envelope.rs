//! The `{ code, message, data, total }` wrapper around every API response

use serde::de::DeserializeOwned;

use crate::const_config::envelope_code::CODE_SUCCESS;

/// Response envelope as it comes off the wire. `data` is kept as raw JSON
/// until the code has been checked so application errors with unexpected
/// payloads still decode
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct Envelope<T = serde_json::Value> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// Result of interpreting an [`Envelope`]
#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeOutcome<T> {
    Success { data: T, total: Option<u64> },
    ApplicationError {
        code: i64,
        message: String,
        data: Option<serde_json::Value>,
    },
    Malformed(String),
}

/// A page of rows for a table as consumed by the table components
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct TableData<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub success: bool,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success".to_string(),
            data: Some(data),
            total: None,
        }
    }

    pub fn success_with_total(data: T, total: u64) -> Self {
        Self {
            total: Some(total),
            ..Self::success(data)
        }
    }

    pub fn error<S: Into<String>>(code: i64, message: S) -> Self {
        debug_assert_ne!(code, CODE_SUCCESS, "error envelopes need a non zero code");
        Self {
            code,
            message: message.into(),
            data: None,
            total: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

impl Envelope<serde_json::Value> {
    /// Decodes the envelope's `data` as `T` if the code signals success.
    ///
    /// A missing `data` field is decoded as JSON `null` so unit like types
    /// (`()`, `Option<_>`) still succeed
    pub fn into_outcome<T: DeserializeOwned>(self) -> EnvelopeOutcome<T> {
        if !self.is_success() {
            return EnvelopeOutcome::ApplicationError {
                code: self.code,
                message: self.message,
                data: self.data,
            };
        }
        let data = self.data.unwrap_or(serde_json::Value::Null);
        match serde_json::from_value(data) {
            Ok(data) => EnvelopeOutcome::Success {
                data,
                total: self.total,
            },
            Err(e) => EnvelopeOutcome::Malformed(format!("failed to decode data: {e}")),
        }
    }

    /// Like [`Self::into_outcome`] but for listing endpoints that return an
    /// array in `data` and the row count in `total`. A missing `total` falls
    /// back to the number of rows returned
    pub fn into_table_outcome<T: DeserializeOwned>(self) -> EnvelopeOutcome<TableData<T>> {
        match self.into_outcome::<Vec<T>>() {
            EnvelopeOutcome::Success { data, total } => {
                let total = total.unwrap_or(data.len() as u64);
                EnvelopeOutcome::Success {
                    data: TableData {
                        items: data,
                        total,
                        success: true,
                    },
                    total: Some(total),
                }
            }
            EnvelopeOutcome::ApplicationError {
                code,
                message,
                data,
            } => EnvelopeOutcome::ApplicationError {
                code,
                message,
                data,
            },
            EnvelopeOutcome::Malformed(reason) => EnvelopeOutcome::Malformed(reason),
        }
    }
}
