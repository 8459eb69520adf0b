use anyhow::Result;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Token acquisition outcomes
pub const OUTCOME_CACHE_HIT: &str = "cache_hit";
pub const OUTCOME_REFRESHED: &str = "refreshed";
pub const OUTCOME_ISSUED: &str = "issued";
pub const OUTCOME_ERROR: &str = "error";
pub const OUTCOME_CANCELLED: &str = "cancelled";

// API request status label when no request was sent for lack of a token
pub const STATUS_TOKEN_ERROR: &str = "token_error";

static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Lazily initializes and returns the process wide metrics.
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

    // Token manager
    pub token_acquisitions: IntCounterVec,
    pub token_expiry_unix: IntGauge,

    // API calls
    pub api_requests: IntCounterVec,
    pub api_request_duration: HistogramVec,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("monta".into()), None).unwrap();

        let metrics = Arc::new(Self {
            token_acquisitions: IntCounterVec::new(Opts::new("token_acquisitions_total", "Token acquisitions by outcome"), &["outcome"]).unwrap(),
            token_expiry_unix: IntGauge::new("token_expiry_unix_seconds", "Access token expiry of the cached credential").unwrap(),

            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "API requests by method, route and status class"), &["method", "route", "status"]).unwrap(),
            api_request_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "API request duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["route"]).unwrap(),

            registry,
        });

        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_acquisitions.clone())).unwrap();
        reg.register(Box::new(metrics.token_expiry_unix.clone())).unwrap();
        reg.register(Box::new(metrics.api_requests.clone())).unwrap();
        reg.register(Box::new(metrics.api_request_duration.clone())).unwrap();

        metrics
    }

    pub fn observe_api_request(&self, method: &str, route: &str, status: &str, seconds: f64) {
        self.api_requests.with_label_values(&[method, route, status]).inc();
        self.api_request_duration.with_label_values(&[route]).observe(seconds);
    }

    /// Prometheus text exposition of every registered metric.
    pub fn gather_text(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
