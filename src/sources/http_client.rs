use reqwest::Client;

use crate::config::settings::HttpClientConfig;
use crate::error::StsError;

/// Shared client for every STS call, so one slow STS cannot hold a handler forever.
pub fn build_client(cfg: &HttpClientConfig) -> Result<Client, StsError> {
    let client = Client::builder()
        .connect_timeout(cfg.connect_timeout())
        .tcp_keepalive(cfg.keep_alive())
        .pool_idle_timeout(cfg.keep_alive())
        .read_timeout(cfg.read_timeout())
        .build()?;
    Ok(client)
}
