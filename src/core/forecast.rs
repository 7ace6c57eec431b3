//! Forecast result structure for holding point predictions.

/// Point predictions extending beyond the end of a training series.
///
/// Predictions are aligned positionally: element `i` corresponds to step
/// `i + 1` past the last training observation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    values: Vec<f64>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast holds no predictions.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the point predictions.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
