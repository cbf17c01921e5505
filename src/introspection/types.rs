use serde::{Deserialize, Serialize};

pub const DEFAULT_STATUS: &str = "internal server error";

/// RFC 7662 introspection answer. Only `active` drives decisions.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct IntrospectResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<serde_json::Value>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Result of introspecting one inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectOutcome {
    pub active: bool,
    pub status_code: u16,
    pub status: String,
}

impl Default for IntrospectOutcome {
    fn default() -> Self {
        Self {
            active: false,
            status_code: 500,
            status: DEFAULT_STATUS.to_owned(),
        }
    }
}

impl IntrospectOutcome {
    pub fn failed(status_code: u16, status: impl Into<String>) -> Self {
        Self {
            active: false,
            status_code,
            status: status.into(),
        }
    }
}
