//! Differencing and integration for ARIMA-family models.
//!
//! Fitting happens on a differenced copy of the series; forecasts come back
//! on that scale and are integrated against the tail of the original data to
//! recover the level scale. `integrate` inverts `difference` and
//! `seasonal_integrate` inverts `seasonal_difference`.

/// Apply `d` passes of first differencing.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Apply `d` passes of lag-`period` differencing.
pub fn seasonal_difference(series: &[f64], d: usize, period: usize) -> Vec<f64> {
    if period == 0 {
        return series.to_vec();
    }
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= period {
            break;
        }
        result = (period..result.len())
            .map(|i| result[i] - result[i - period])
            .collect();
    }
    result
}

/// Integrate a forecast made on the `d`-times differenced scale back to the
/// scale of `original`.
pub fn integrate(forecast: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let mut result = forecast.to_vec();
    // Undo one differencing level at a time, innermost first. Each level
    // continues the cumulative sum from the last value the series had at
    // that level.
    for level in (0..d).rev() {
        let at_level = difference(original, level);
        let mut cumsum = at_level.last().copied().unwrap_or(0.0);
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Integrate a forecast made on the `d`-times seasonally differenced scale
/// back to the scale of `original`.
///
/// Each forecast step adds the value one period back, taken from the tail of
/// the original data for the first `period` steps and from earlier forecast
/// steps after that.
pub fn seasonal_integrate(forecast: &[f64], original: &[f64], d: usize, period: usize) -> Vec<f64> {
    if d == 0 || period == 0 || forecast.is_empty() {
        return forecast.to_vec();
    }

    let mut result = forecast.to_vec();
    for level in (0..d).rev() {
        let at_level = seasonal_difference(original, level, period);
        if at_level.len() < period {
            break;
        }
        let tail = &at_level[at_level.len() - period..];
        let mut integrated: Vec<f64> = Vec::with_capacity(result.len());
        for (h, &diff) in result.iter().enumerate() {
            let base = if h < period {
                tail[h]
            } else {
                integrated[h - period]
            };
            integrated.push(diff + base);
        }
        result = integrated;
    }
    result
}
