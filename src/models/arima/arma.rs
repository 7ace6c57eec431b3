//! Shared conditional-sum-of-squares machinery for the ARIMA family.
//!
//! Both the non-seasonal and seasonal models reduce to the same recursion
//! once their lag polynomials are expanded into explicit (lag, coefficient)
//! terms, so estimation, in-sample fitting, and forecast extension live here.

use crate::utils::optimization::{minimize, MinimizeOptions};
use crate::utils::stats::mean;

/// Expand the product of a non-seasonal and a seasonal lag polynomial into
/// explicit (lag, coefficient) terms.
///
/// A multiplicative AR structure `phi(B) * PHI(B^s)` contributes `phi_i` at
/// lag `i`, `PHI_j` at lag `j*s`, and `-phi_i*PHI_j` at lag `i + j*s` once
/// moved to the right-hand side; the MA side has the same shape with a
/// positive cross term. `cross_sign` selects between the two.
pub(super) fn expand_polynomial(
    non_seasonal: &[f64],
    seasonal: &[f64],
    period: usize,
    cross_sign: f64,
) -> Vec<(usize, f64)> {
    let mut terms =
        Vec::with_capacity(non_seasonal.len() * (seasonal.len() + 1) + seasonal.len());
    for (i, &coef) in non_seasonal.iter().enumerate() {
        terms.push((i + 1, coef));
    }
    for (j, &seasonal_coef) in seasonal.iter().enumerate() {
        let seasonal_lag = (j + 1) * period;
        terms.push((seasonal_lag, seasonal_coef));
        for (i, &coef) in non_seasonal.iter().enumerate() {
            terms.push((i + 1 + seasonal_lag, cross_sign * coef * seasonal_coef));
        }
    }
    terms
}

/// Fitted values, residuals, and the CSS objective from one recursion pass.
pub(super) struct CssPass {
    pub css: f64,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
}

/// Run the CSS recursion over a (differenced) series.
///
/// Observations before `start` carry no prediction (their fitted value stays
/// NaN and their residual zero) because the recursion lacks full lag history
/// there.
pub(super) fn css_pass(
    series: &[f64],
    intercept: f64,
    ar_terms: &[(usize, f64)],
    ma_terms: &[(usize, f64)],
    start: usize,
) -> CssPass {
    let n = series.len();
    let mut fitted = vec![f64::NAN; n];
    let mut residuals = vec![0.0; n];
    let mut css = 0.0;

    for t in start..n {
        let mut pred = intercept;
        for &(lag, coef) in ar_terms {
            if t >= lag {
                pred += coef * (series[t - lag] - intercept);
            }
        }
        for &(lag, coef) in ma_terms {
            if t >= lag {
                pred += coef * residuals[t - lag];
            }
        }
        fitted[t] = pred;
        let error = series[t] - pred;
        residuals[t] = error;
        css += error * error;
    }

    CssPass {
        css,
        fitted,
        residuals,
    }
}

/// Extend the recursion `horizon` steps past the end of the series.
///
/// Future shocks are zero, so MA terms fade out once the horizon exceeds the
/// largest MA lag.
pub(super) fn extend_recursion(
    series: &[f64],
    residuals: &[f64],
    intercept: f64,
    ar_terms: &[(usize, f64)],
    ma_terms: &[(usize, f64)],
    horizon: usize,
) -> Vec<f64> {
    let mut extended = series.to_vec();
    let mut shocks = residuals.to_vec();

    for _ in 0..horizon {
        let t = extended.len();
        let mut pred = intercept;
        for &(lag, coef) in ar_terms {
            if t >= lag {
                pred += coef * (extended[t - lag] - intercept);
            }
        }
        for &(lag, coef) in ma_terms {
            if t >= lag {
                pred += coef * shocks[t - lag];
            }
        }
        extended.push(pred);
        shocks.push(0.0);
    }

    extended[series.len()..].to_vec()
}

/// Estimated coefficients for a (seasonal) ARMA structure.
pub(super) struct CssEstimate {
    pub intercept: f64,
    pub ar: Vec<f64>,
    pub ma: Vec<f64>,
    pub seasonal_ar: Vec<f64>,
    pub seasonal_ma: Vec<f64>,
    pub objective: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Estimate intercept and AR/MA coefficients by minimizing the CSS.
///
/// Coefficients are box-bounded to (-0.99, 0.99) to keep the fitted process
/// stationary and invertible; the intercept is free. Pass `sp = sq = 0` (any
/// `period`) for a non-seasonal model.
pub(super) fn estimate(
    series: &[f64],
    p: usize,
    q: usize,
    sp: usize,
    sq: usize,
    period: usize,
) -> CssEstimate {
    let start = (p + sp * period).max(q + sq * period);
    let series_mean = mean(series);
    let n_params = 1 + p + q + sp + sq;

    if n_params == 1 {
        // Pure intercept model: closed form, no search needed.
        let pass = css_pass(series, series_mean, &[], &[], start);
        return CssEstimate {
            intercept: series_mean,
            ar: vec![],
            ma: vec![],
            seasonal_ar: vec![],
            seasonal_ma: vec![],
            objective: pass.css,
            iterations: 0,
            converged: true,
        };
    }

    let mut initial = vec![0.1; n_params];
    initial[0] = series_mean;

    let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
    bounds.extend(std::iter::repeat((-0.99, 0.99)).take(n_params - 1));

    let unpack = |params: &[f64]| -> (f64, Vec<(usize, f64)>, Vec<(usize, f64)>) {
        let intercept = params[0];
        let (ar, rest) = params[1..].split_at(p);
        let (ma, rest) = rest.split_at(q);
        let (sar, sma) = rest.split_at(sp);
        let ar_terms = expand_polynomial(ar, sar, period, -1.0);
        let ma_terms = expand_polynomial(ma, sma, period, 1.0);
        (intercept, ar_terms, ma_terms)
    };

    let result = minimize(
        |params| {
            let (intercept, ar_terms, ma_terms) = unpack(params);
            css_pass(series, intercept, &ar_terms, &ma_terms, start).css
        },
        &initial,
        Some(&bounds),
        MinimizeOptions::default(),
    );

    let point = &result.point;
    CssEstimate {
        intercept: point[0],
        ar: point[1..1 + p].to_vec(),
        ma: point[1 + p..1 + p + q].to_vec(),
        seasonal_ar: point[1 + p + q..1 + p + q + sp].to_vec(),
        seasonal_ma: point[1 + p + q + sp..].to_vec(),
        objective: result.value,
        iterations: result.iterations,
        converged: result.converged,
    }
}

/// Residual variance and information criteria computed after a fit.
pub(super) struct FitDiagnostics {
    pub residual_variance: f64,
    pub aic: f64,
    pub bic: f64,
}

pub(super) fn diagnostics(residuals: &[f64], start: usize, n_params: usize) -> Option<FitDiagnostics> {
    let tail = residuals.get(start..).unwrap_or(&[]);
    if tail.is_empty() {
        return None;
    }
    let n = tail.len() as f64;
    let variance = tail.iter().map(|r| r * r).sum::<f64>() / n;
    let k = n_params as f64;
    let log_likelihood = -0.5 * n * (1.0 + variance.ln() + (2.0 * std::f64::consts::PI).ln());

    Some(FitDiagnostics {
        residual_variance: variance,
        aic: -2.0 * log_likelihood + 2.0 * k,
        bic: -2.0 * log_likelihood + k * n.ln(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn expand_non_seasonal_only() {
        let terms = expand_polynomial(&[0.5, 0.2], &[], 12, -1.0);
        assert_eq!(terms, vec![(1, 0.5), (2, 0.2)]);
    }

    #[test]
    fn expand_multiplicative_ar() {
        // (1 - 0.5B)(1 - 0.4B^12): lags 1, 12, and the cross term at 13
        let terms = expand_polynomial(&[0.5], &[0.4], 12, -1.0);
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0], (1, 0.5));
        assert_eq!(terms[1], (12, 0.4));
        assert_eq!(terms[2].0, 13);
        assert_relative_eq!(terms[2].1, -0.2, epsilon = 1e-12);
    }

    #[test]
    fn expand_ma_cross_term_is_positive() {
        let terms = expand_polynomial(&[0.5], &[0.4], 4, 1.0);
        assert_relative_eq!(terms[2].1, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn css_pass_pure_intercept() {
        let series = vec![1.0, 2.0, 3.0];
        let pass = css_pass(&series, 2.0, &[], &[], 0);
        // Residuals are -1, 0, 1
        assert_relative_eq!(pass.css, 2.0, epsilon = 1e-12);
        assert_eq!(pass.residuals, vec![-1.0, 0.0, 1.0]);
        assert!(pass.fitted.iter().all(|f| (f - 2.0).abs() < 1e-12));
    }

    #[test]
    fn css_pass_ar1_predicts_from_previous_value() {
        let series = vec![0.0, 1.0, 0.5];
        let pass = css_pass(&series, 0.0, &[(1, 0.5)], &[], 1);
        // t=1 predicts 0.5*0 = 0, t=2 predicts 0.5*1 = 0.5
        assert!(pass.fitted[0].is_nan());
        assert_relative_eq!(pass.fitted[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(pass.fitted[2], 0.5, epsilon = 1e-12);
        assert_relative_eq!(pass.css, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn extend_recursion_produces_requested_horizon() {
        let series = vec![1.0, 2.0, 3.0, 4.0];
        let residuals = vec![0.0; 4];
        let forecast = extend_recursion(&series, &residuals, 2.5, &[(1, 0.5)], &[], 5);
        assert_eq!(forecast.len(), 5);
        // First step: 2.5 + 0.5*(4 - 2.5) = 3.25
        assert_relative_eq!(forecast[0], 3.25, epsilon = 1e-12);
    }

    #[test]
    fn ar1_coefficient_is_recovered() {
        // Deterministic AR(1)-like process with small perturbations
        let mut series = vec![1.0];
        for i in 1..200 {
            let shock = ((i * 31 + 7) % 17) as f64 / 17.0 - 0.5;
            series.push(0.6 * series[i - 1] + shock);
        }
        let fit = estimate(&series, 1, 0, 0, 0, 1);
        assert!(fit.converged);
        assert!(
            fit.ar[0] > 0.3 && fit.ar[0] < 0.9,
            "recovered AR coefficient {} too far from 0.6",
            fit.ar[0]
        );
    }

    #[test]
    fn intercept_only_estimate_is_the_mean() {
        let series = vec![2.0, 4.0, 6.0];
        let fit = estimate(&series, 0, 0, 0, 0, 1);
        assert!(fit.converged);
        assert_relative_eq!(fit.intercept, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn diagnostics_report_variance_and_criteria() {
        let residuals = vec![0.0, 1.0, -1.0, 1.0, -1.0];
        let diag = diagnostics(&residuals, 1, 3).unwrap();
        assert_relative_eq!(diag.residual_variance, 1.0, epsilon = 1e-12);
        // More parameters always cost more under both criteria
        let smaller = diagnostics(&residuals, 1, 2).unwrap();
        assert!(diag.aic > smaller.aic);
        assert!(diag.bic > smaller.bic);
    }

    #[test]
    fn diagnostics_empty_tail_is_none() {
        assert!(diagnostics(&[1.0, 2.0], 2, 1).is_none());
        assert!(diagnostics(&[], 0, 1).is_none());
    }
}
