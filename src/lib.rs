pub mod aggregator;
pub mod config;
pub mod error;
pub mod fetch;
pub mod github;
pub mod metrics;
pub mod models;
pub mod period;
pub mod selector;

pub use aggregator::{DoraAggregator, MetricsRequest};
pub use error::DoraError;
pub use metrics::{compute_dora_metrics, DoraMetrics};
