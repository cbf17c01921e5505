//! Allow/deny decisions for inbound requests.

pub mod decision;
pub mod middleware;
