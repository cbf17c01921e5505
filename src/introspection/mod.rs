//! Inbound side: bearer extraction and RFC 7662 token introspection.

pub mod bearer;
pub mod client;
pub mod types;
