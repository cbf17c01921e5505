//! Exactly-once commitment of the STS identity.
//!
//! [`IdentityGuard`] replaces process-global settings: the first successful
//! [`IdentityGuard::initialize`] validates and freezes an [`IdentityConfig`],
//! creates the token cache and starts its sweeper. Every later call hands back
//! the committed [`Identity`] and ignores its argument.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::sweeper::Sweeper;
use crate::cache::token_cache::TokenCache;
use crate::config::identity::IdentityConfig;
use crate::error::StsError;
use crate::introspection::client::IntrospectionClient;
use crate::observability::metrics::get_metrics;
use crate::sources::token_fetch::TokenClient;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Committed identity: frozen settings plus the shared token cache.
#[derive(Debug)]
pub struct Identity {
    config: Arc<IdentityConfig>,
    cache: TokenCache,
    sweeper: Sweeper,
}

impl Identity {
    pub fn config(&self) -> &Arc<IdentityConfig> {
        &self.config
    }

    pub fn cache(&self) -> &TokenCache {
        &self.cache
    }

    pub fn token_client(&self, client: Client) -> TokenClient {
        TokenClient::new(self.config.clone(), client, self.cache.clone())
    }

    pub fn introspection_client(&self, client: Client) -> IntrospectionClient {
        IntrospectionClient::new(self.config.clone(), client)
    }
}

#[derive(Debug)]
pub struct IdentityGuard {
    cell: OnceCell<Identity>,
    sweep_interval: Duration,
}

impl Default for IdentityGuard {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_INTERVAL)
    }
}

impl IdentityGuard {
    pub const fn new(sweep_interval: Duration) -> Self {
        Self {
            cell: OnceCell::const_new(),
            sweep_interval,
        }
    }

    /// Validates and commits `config` on the first successful call.
    ///
    /// Must be called from within a tokio runtime; the sweeper is spawned here.
    /// A validation failure leaves the guard open for another attempt.
    pub async fn initialize(&self, config: IdentityConfig) -> Result<&Identity, StsError> {
        if let Some(identity) = self.cell.get() {
            debug!("identity already initialized, ignoring new config");
            return Ok(identity);
        }

        self.cell
            .get_or_try_init(|| async move {
                if let Err(e) = config.validate() {
                    get_metrics().await.config_validation_errors.inc();
                    return Err(e);
                }

                let cache = TokenCache::new();
                let sweeper = Sweeper::spawn(cache.clone(), self.sweep_interval);
                info!(
                    "identity initialized for service '{}' v{}",
                    config.service_name, config.service_version
                );
                Ok(Identity {
                    config: Arc::new(config),
                    cache,
                    sweeper,
                })
            })
            .await
    }

    pub fn get(&self) -> Option<&Identity> {
        self.cell.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    /// Stops the sweeper of the committed identity, if any.
    pub async fn shutdown(&self) {
        if let Some(identity) = self.cell.get() {
            identity.sweeper.shutdown().await;
        }
    }
}
