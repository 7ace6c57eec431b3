//! ARIMA and SARIMA (Autoregressive Integrated Moving Average) models.
//!
//! This module provides:
//! - ARIMA models with (p, d, q) specifications
//! - SARIMA models with an additional seasonal component (P, D, Q)\[s\]
//! - Differencing and integration utilities shared by both

mod arma;
mod diff;
mod model;
mod seasonal;

pub use diff::{difference, integrate, seasonal_difference, seasonal_integrate};
pub use model::{Arima, ArimaOrder};
pub use seasonal::{Sarima, SeasonalOrder};
