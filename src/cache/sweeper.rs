use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::token_cache::TokenCache;

/// Background task evicting stale cache entries on a fixed period.
#[derive(Debug)]
pub struct Sweeper {
    shutdown_token: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Starts sweeping `cache`; the first sweep happens one `period` from now.
    pub fn spawn(cache: TokenCache, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let shutdown_token = CancellationToken::new();
        let cancelled = shutdown_token.clone();

        let handle = tokio::spawn(async move {
            info!("token cache sweeper started, period {:?}", period);
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => {
                        info!("token cache sweeper shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = cache.sweep().await;
                        debug!("sweep removed {} token(s)", removed);
                    }
                }
            }
        });

        Self {
            shutdown_token,
            handle: Mutex::new(Some(handle)),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    /// Cancels the task and waits for it to finish. Later calls return at once.
    pub async fn shutdown(&self) {
        self.shutdown_token.cancel();
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("token cache sweeper ended abnormally: {}", e);
            }
        }
    }
}
