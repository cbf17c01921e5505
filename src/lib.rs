//! # STS Client Library
//!
//! Acquires client-credentials tokens from a security token service,
//! attaches them to outbound requests, and gates inbound requests by
//! introspecting their bearer tokens against the same STS.
//!
//! Modules:
//! - `config` — identity settings, exactly-once initialization, service file
//! - `cache` — scope-keyed token cache and its background sweeper
//! - `sources` — token acquisition and authenticated outbound requests
//! - `introspection` — bearer extraction and introspection calls
//! - `gate` — allow/deny decisions and the axum middleware

pub mod cache;
pub mod config;
pub mod error;
pub mod gate;
pub mod helpers;
pub mod introspection;
pub mod observability;
pub mod server;
pub mod sources;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::config::guard::{Identity, IdentityGuard};
pub use crate::config::identity::IdentityConfig;
pub use crate::error::{AuthHeaderError, StsError};
pub use crate::gate::decision::{decide, Decision};
pub use crate::introspection::client::IntrospectionClient;
pub use crate::introspection::types::IntrospectOutcome;
pub use crate::sources::token_fetch::{AuthRequestData, AuthResponse, TokenClient};
