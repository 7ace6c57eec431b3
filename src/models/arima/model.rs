//! Non-seasonal ARIMA model.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::arima::arma::{css_pass, diagnostics, estimate, expand_polynomial, extend_recursion};
use crate::models::arima::diff::{difference, integrate};
use crate::models::Forecaster;
use crate::utils::stats::variance;
use tracing::{debug, warn};

/// ARIMA order specification (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    /// Autoregressive order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// Moving-average order.
    pub q: usize,
}

impl ArimaOrder {
    /// Create a new order specification.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Number of estimated parameters (AR + MA + intercept).
    pub fn num_params(&self) -> usize {
        self.p + self.q + 1
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

/// ARIMA(p, d, q) forecasting model.
///
/// Combines autoregression on `p` lags, `d` passes of differencing for
/// stationarity, and a moving average over `q` past shocks. Parameters are
/// estimated by conditional-least-squares.
#[derive(Debug, Clone, Default)]
pub struct Arima {
    order: ArimaOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    original: Option<Vec<f64>>,
    differenced: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
    residuals: Option<Vec<f64>>,
    residual_variance: Option<f64>,
    aic: Option<f64>,
    bic: Option<f64>,
}

impl Arima {
    /// Create an unfitted model with the given order.
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self::with_order(ArimaOrder::new(p, d, q))
    }

    /// Create an unfitted model from an order specification.
    pub fn with_order(order: ArimaOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Get the order specification.
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    /// Get the AR coefficients.
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    /// Get the MA coefficients.
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
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
        self.order.p.max(self.order.q)
    }
}

impl Forecaster for Arima {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let min_len = self.order.d + self.order.p.max(self.order.q) + 2;
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

        let differenced = difference(values, self.order.d);
        let est = estimate(&differenced, self.order.p, self.order.q, 0, 0, 1);
        if !est.objective.is_finite() {
            return Err(ForecastError::EstimationFailure(
                "optimizer produced a non-finite objective".to_string(),
            ));
        }
        if !est.converged {
            warn!(
                iterations = est.iterations,
                model = "ARIMA",
                "parameter search hit the iteration cap before meeting tolerance"
            );
        }
        debug!(
            css = est.objective,
            iterations = est.iterations,
            intercept = est.intercept,
            "estimated ARIMA({}, {}, {}) parameters",
            self.order.p,
            self.order.d,
            self.order.q
        );

        self.intercept = est.intercept;
        self.ar = est.ar;
        self.ma = est.ma;

        let ar_terms = expand_polynomial(&self.ar, &[], 1, -1.0);
        let ma_terms = expand_polynomial(&self.ma, &[], 1, 1.0);
        let pass = css_pass(
            &differenced,
            self.intercept,
            &ar_terms,
            &ma_terms,
            self.recursion_start(),
        );

        if let Some(diag) = diagnostics(
            &pass.residuals,
            self.recursion_start(),
            self.order.num_params(),
        ) {
            self.residual_variance = Some(diag.residual_variance);
            self.aic = Some(diag.aic);
            self.bic = Some(diag.bic);
        }

        self.original = Some(values.to_vec());
        self.differenced = Some(differenced);
        self.fitted = Some(pass.fitted);
        self.residuals = Some(pass.residuals);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let original = self.original.as_ref().ok_or(ForecastError::FitRequired)?;
        let differenced = self.differenced.as_ref().ok_or(ForecastError::FitRequired)?;
        let residuals = self.residuals.as_ref().ok_or(ForecastError::FitRequired)?;

        if horizon == 0 {
            return Ok(Forecast::new());
        }

        let ar_terms = expand_polynomial(&self.ar, &[], 1, -1.0);
        let ma_terms = expand_polynomial(&self.ma, &[], 1, 1.0);
        let forecast_diff = extend_recursion(
            differenced,
            residuals,
            self.intercept,
            &ar_terms,
            &ma_terms,
            horizon,
        );

        Ok(Forecast::from_values(integrate(
            &forecast_diff,
            original,
            self.order.d,
        )))
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn residuals(&self) -> Option<&[f64]> {
        self.residuals.as_deref()
    }

    fn name(&self) -> &str {
        "ARIMA"
    }
}
