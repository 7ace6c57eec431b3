//! Seasonal ARIMA (SARIMA) model.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::arma::{css_pass, diagnostics, estimate, expand_polynomial, extend_recursion};
use crate::models::arima::diff::{difference, integrate, seasonal_difference, seasonal_integrate};
use crate::models::Forecaster;
use crate::utils::stats::variance;
use tracing::{debug, warn};

/// SARIMA order specification (p, d, q)(P, D, Q)[period].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalOrder {
    /// Non-seasonal autoregressive order.
    pub p: usize,
    /// Non-seasonal differencing order.
    pub d: usize,
    /// Non-seasonal moving-average order.
    pub q: usize,
    /// Seasonal autoregressive order.
    pub sp: usize,
    /// Seasonal differencing order.
    pub sd: usize,
    /// Seasonal moving-average order.
    pub sq: usize,
    /// Seasonal period in observations.
    pub period: usize,
}

impl SeasonalOrder {
    /// Create a new seasonal order specification.
    pub fn new(p: usize, d: usize, q: usize, sp: usize, sd: usize, sq: usize, period: usize) -> Self {
        Self {
            p,
            d,
            q,
            sp,
            sd,
            sq,
            period,
        }
    }

    /// Number of estimated parameters (AR + MA + seasonal AR + seasonal MA +
    /// intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + self.sp + self.sq + 1
    }
}

impl Default for SeasonalOrder {
    fn default() -> Self {
        Self::new(1, 1, 1, 1, 1, 1, 12)
    }
}

/// SARIMA(p, d, q)(P, D, Q)[s] forecasting model.
///
/// Extends ARIMA with a multiplicative seasonal component: seasonal
/// differencing at lag `period` plus seasonal AR/MA terms at period
/// multiples. Estimation follows the same conditional-least-squares path as
/// the non-seasonal model, over the expanded lag structure.
#[derive(Debug, Clone, Default)]
pub struct Sarima {
    order: SeasonalOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ar: Vec<f64>,
    seasonal_ma: Vec<f64>,
    original: Option<Vec<f64>>,
    seasonal_differenced: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Sarima {
    /// Create an unfitted model with the given orders.
    pub fn new(p: usize, d: usize, q: usize, sp: usize, sd: usize, sq: usize, period: usize) -> Self {
        Self::with_order(SeasonalOrder::new(p, d, q, sp, sd, sq, period))
    }

    /// Create an unfitted model from an order specification.
    pub fn with_order(order: SeasonalOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Get the order specification.
    pub fn order(&self) -> SeasonalOrder {
        self.order
    }

    /// Get the non-seasonal AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Get the non-seasonal MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    /// Get the seasonal AR coefficients.
    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.seasonal_ar
    }

    /// Get the seasonal MA coefficients.
    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.seasonal_ma
    }

    /// Get the intercept.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Akaike information criterion of the fit.
    pub fn aic(&self) -> Option<f64> {
        self.aic
    }

    /// Bayesian information criterion of the fit.
    pub fn bic(&self) -> Option<f64> {
        self.bic
    }

    /// Residual variance of the fit.
    pub fn residual_variance(&self) -> Option<f64> {
        self.residual_variance
    }

    fn recursion_start(&self) -> usize {
        let o = &self.order;
        (o.p + o.sp * o.period).max(o.q + o.sq * o.period)
    }

    fn ar_terms(&self) -> Vec<(usize, f64)> {
        expand_polynomial(&self.ar, &self.seasonal_ar, self.order.period, -1.0)
    }

    fn ma_terms(&self) -> Vec<(usize, f64)> {
        expand_polynomial(&self.ma, &self.seasonal_ma, self.order.period, 1.0)
    }
}

impl Forecaster for Sarima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let o = self.order;
        if o.period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {}",
                o.period
            )));
        }

        let values = series.values();
        let min_len = o.d + o.sd * o.period + self.recursion_start() + 2;
        if values.len() < min_len {
            return Err(ForecastError::InsufficientData {
                needed: min_len,
                got: values.len(),
            });
        }
        if variance(values) == 0.0 {
            return Err(ForecastError::EstimationFailure(
                "training series is constant".to_string(),
            ));
        }

        // Seasonal differencing first, regular differencing on top; the
        // forecast path inverts them in reverse order.
        let seasonal_differenced = seasonal_difference(values, o.sd, o.period);
        let differenced = difference(&seasonal_differenced, o.d);

        let est = estimate(&differenced, o.p, o.q, o.sp, o.sq, o.period);
        if !est.objective.is_finite() {
            return Err(ForecastError::EstimationFailure(
                "optimizer produced a non-finite objective".to_string(),
            ));
        }
        if !est.converged {
            warn!(
                iterations = est.iterations,
                model = "SARIMA",
                "parameter search hit the iteration cap before meeting tolerance"
            );
        }
        debug!(
            css = est.objective,
            iterations = est.iterations,
            intercept = est.intercept,
            "estimated SARIMA({}, {}, {})({}, {}, {})[{}] parameters",
            o.p,
            o.d,
            o.q,
            o.sp,
            o.sd,
            o.sq,
            o.period
        );

        self.intercept = est.intercept;
        self.ar = est.ar;
        self.ma = est.ma;
        self.seasonal_ar = est.seasonal_ar;
        self.seasonal_ma = est.seasonal_ma;

        let pass = css_pass(
            &differenced,
            self.intercept,
            &self.ar_terms(),
            &self.ma_terms(),
            self.recursion_start(),
        );

        if let Some(diag) = diagnostics(&pass.residuals, self.recursion_start(), o.num_params()) {
            self.residual_variance = Some(diag.residual_variance);
            self.aic = Some(diag.aic);
            self.bic = Some(diag.bic);
        }

        self.original = Some(values.to_vec());
        self.seasonal_differenced = Some(seasonal_differenced);
        self.differenced = Some(differenced);
        self.fitted = Some(pass.fitted);
        self.residuals = Some(pass.residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let seasonal_differenced = self
            .seasonal_differenced
            .as_ref()
            .ok_or(ForecastError::FitRequired)?;
        let differenced = self.differenced.as_ref().ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let forecast_diff = extend_recursion(
            differenced,
            residuals,
            self.intercept,
            &self.ar_terms(),
            &self.ma_terms(),
            horizon,
        );

        // Undo regular differencing against the seasonally differenced
        // series, then seasonal differencing against the original.
        let seasonal_scale = integrate(&forecast_diff, seasonal_differenced, self.order.d);
        let level_scale = seasonal_integrate(
            &seasonal_scale,
            original,
            self.order.sd,
            self.order.period,
        );

        Ok(Forecast::from_values(level_scale))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "SARIMA"
    }
}
