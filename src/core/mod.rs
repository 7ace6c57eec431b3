//! Core data structures for time series forecasting.

mod forecast;
mod series;

pub use forecast::Forecast;
pub use series::{monthly_span, TimeSeries};
