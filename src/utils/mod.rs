//! Utility functions shared by the forecasting models.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{calculate_metrics, mse, AccuracyMetrics};
pub use optimization::{minimize, Minimum, MinimizeOptions};
