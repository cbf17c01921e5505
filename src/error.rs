//! Error types surfaced by the STS-facing operations.

use thiserror::Error;

/// Errors returned by configuration, token acquisition and request building.
#[derive(Debug, Error)]
pub enum StsError {
    /// A required identity field is empty. The message names the first one found.
    #[error("{0}")]
    ConfigurationInvalid(&'static str),

    /// Network, DNS or TLS failure, or a request that could not be built.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The STS answered with a body that is not the expected JSON shape.
    #[error("failed to decode STS response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The STS answered but did not issue a usable token.
    #[error("token rejected by STS: {0}")]
    TokenRejected(String),

    /// A caller-supplied outbound header could not be encoded.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

/// Defects of the inbound `Authorization` header.
///
/// The display strings are the status strings reported to callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthHeaderError {
    #[error("no authentication header")]
    Missing,
    #[error("invalid authentication header")]
    Malformed,
    #[error("invalid bearer token")]
    EmptyToken,
}

impl AuthHeaderError {
    pub fn status_code(&self) -> u16 {
        401
    }
}
