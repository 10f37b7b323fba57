//! Wire envelopes returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `status == 1` means the backend accepted the request.
pub const STATUS_OK: i64 = 1;

/// Body of a list response, before normalization.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ListEnvelope {
    pub status: i64,
    #[serde(default)]
    pub payload: Option<ListPayload>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ListEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Successful paged envelope, handy for doubles and tests.
    pub fn paged(data: Vec<Value>, total: usize) -> Self {
        Self {
            status: STATUS_OK,
            payload: Some(ListPayload::Paged { data, total }),
            message: None,
        }
    }

    /// Successful bare-array envelope.
    pub fn bare(data: Vec<Value>) -> Self {
        Self {
            status: STATUS_OK,
            payload: Some(ListPayload::Bare(data)),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            payload: None,
            message: Some(message.into()),
        }
    }
}

/// The two payload shapes seen across list endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ListPayload {
    Bare(Vec<Value>),
    Paged { data: Vec<Value>, total: usize },
}

/// Body of a mutation response.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MutationEnvelope {
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
}

impl MutationEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn ok() -> Self {
        Self {
            status: STATUS_OK,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: Some(message.into()),
        }
    }
}
