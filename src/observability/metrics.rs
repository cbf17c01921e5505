use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Acquisition metrics
    pub token_acquisitions: IntCounterVec,
    pub token_acquisition_duration: Histogram,

    // Introspection metrics
    pub introspections: IntCounterVec,
    pub introspection_duration: Histogram,

    // Gate metrics
    pub gate_decisions: IntCounterVec,

    // Cache metrics
    pub cached_tokens: IntGauge,
    pub cache_evictions: IntCounter,

    // Config/runtime
    pub config_validation_errors: IntCounter,
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("stsclient".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Acquisition
            token_acquisitions: IntCounterVec::new(Opts::new("token_acquisitions_total", "Client-credentials grants by outcome"), &["outcome"]).unwrap(),
            token_acquisition_duration: Histogram::with_opts(HistogramOpts::new("token_acquisition_duration_seconds", "Grant round-trip seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            // Introspection
            introspections: IntCounterVec::new(Opts::new("introspections_total", "Introspections by outcome"), &["outcome"]).unwrap(),
            introspection_duration: Histogram::with_opts(HistogramOpts::new("introspection_duration_seconds", "Introspection round-trip seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0])).unwrap(),

            // Gate
            gate_decisions: IntCounterVec::new(Opts::new("gate_decisions_total", "Authorization gate decisions"), &["decision"]).unwrap(),

            // Cache
            cached_tokens: IntGauge::new("cached_tokens", "Tokens currently cached").unwrap(),
            cache_evictions: IntCounter::new("cache_evictions_total", "Tokens evicted by the sweeper").unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),
            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_acquisitions.clone())).unwrap();
        reg.register(Box::new(metrics.token_acquisition_duration.clone())).unwrap();
        reg.register(Box::new(metrics.introspections.clone())).unwrap();
        reg.register(Box::new(metrics.introspection_duration.clone())).unwrap();
        reg.register(Box::new(metrics.gate_decisions.clone())).unwrap();
        reg.register(Box::new(metrics.cached_tokens.clone())).unwrap();
        reg.register(Box::new(metrics.cache_evictions.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
