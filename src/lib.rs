//! # seasonal-forecast
//!
//! Classical time series forecasting on synthetic seasonal data.
//!
//! The crate generates a reproducible trend + seasonality + noise series,
//! fits non-seasonal ARIMA and seasonal SARIMA models by conditional least
//! squares, forecasts a held-out segment, and scores the forecasts with mean
//! squared error. SVG plot rendering is included for visual inspection.

pub mod core;
pub mod error;
pub mod models;
pub mod plot;
pub mod synthetic;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::core::{Forecast, TimeSeries};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::arima::{Arima, Sarima};
    pub use crate::models::Forecaster;
    pub use crate::synthetic::SyntheticSeries;
    pub use crate::utils::{calculate_metrics, mse, AccuracyMetrics};
}
