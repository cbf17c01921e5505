//! Outbound side: client-credentials grants and authenticated requests.

pub mod authenticated;
pub mod http_client;
pub mod token_fetch;
