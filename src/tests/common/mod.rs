// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use reqwest::Client;

use crate::config::identity::IdentityConfig;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// Identity pointing at a (mock) STS
pub fn identity_config(base_url: &str) -> IdentityConfig {
    IdentityConfig {
        base_url: base_url.to_owned(),
        token_path: "connect/token".into(),
        introspect_path: "connect/introspect".into(),
        id: "orders".into(),
        secret: "s3cr3t".into(),
        service_name: "orders".into(),
        service_version: "1.0.0".into(),
        commit_hash: "abc123".into(),
    }
}
