//! Univariate time series with a calendar index.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// An ordered sequence of (timestamp, value) pairs.
///
/// Invariants enforced at construction: timestamps are strictly increasing
/// and there is exactly one value per timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a new series, validating the pairing and ordering invariants.
    pub fn new(timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }
        for pair in timestamps.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ForecastError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }
        Ok(Self { timestamps, values })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Get timestamps.
    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    /// Get values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Extract the half-open range `[start, end)` as a new series.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(ForecastError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(ForecastError::IndexOutOfBounds {
                index: end,
                size: self.len(),
            });
        }
        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
        })
    }

    /// Split into a leading training segment and a trailing test segment.
    ///
    /// The cut point is `floor(len * fraction)`; temporal order is preserved
    /// and the two segments partition the series exactly. `fraction` must lie
    /// in `(0, 1]`; a fraction of 1.0 yields an empty test segment.
    pub fn train_test_split(&self, fraction: f64) -> Result<(TimeSeries, TimeSeries)> {
        if self.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "split fraction must be in (0, 1], got {fraction}"
            )));
        }
        let cut = (self.len() as f64 * fraction).floor() as usize;
        let train = self.slice(0, cut)?;
        let test = self.slice(cut, self.len())?;
        Ok((train, test))
    }
}

/// Build `n` month-end timestamps starting at the given calendar month.
///
/// `monthly_span(2020, 1, 3)` yields 2020-01-31, 2020-02-29, 2020-03-31.
pub fn monthly_span(year: i32, month: u32, n: usize) -> Result<Vec<DateTime<Utc>>> {
    if !(1..=12).contains(&month) {
        return Err(ForecastError::TimestampError(format!(
            "month must be in 1..=12, got {month}"
        )));
    }
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let offset = (month as i32 - 1) + i as i32;
        let y = year + offset.div_euclid(12);
        let m = offset.rem_euclid(12) as u32 + 1;
        let (next_y, next_m) = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
        let first_of_next = NaiveDate::from_ymd_opt(next_y, next_m, 1).ok_or_else(|| {
            ForecastError::TimestampError(format!("invalid calendar month {next_y}-{next_m}"))
        })?;
        let month_end = first_of_next - Duration::days(1);
        let midnight = month_end.and_hms_opt(0, 0, 0).ok_or_else(|| {
            ForecastError::TimestampError(format!("invalid time for date {month_end}"))
        })?;
        out.push(Utc.from_utc_datetime(&midnight));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn make_timestamps(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|i| {
                Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(i as i64)
            })
            .collect()
    }

    #[test]
    fn series_constructs_and_exposes_data() {
        let timestamps = make_timestamps(5);
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];

        let ts = TimeSeries::new(timestamps.clone(), values.clone()).unwrap();

        assert_eq!(ts.len(), 5);
        assert!(!ts.is_empty());
        assert_eq!(ts.values(), &values);
        assert_eq!(ts.timestamps(), &timestamps);
    }

    #[test]
    fn series_rejects_mismatched_lengths() {
        let result = TimeSeries::new(make_timestamps(3), vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn series_rejects_non_increasing_timestamps() {
        let timestamps = vec![
            Utc.with_ymd_and_hms(2020, 1, 3, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap(),
        ];
        let result = TimeSeries::new(timestamps, vec![1.0, 2.0]);
        assert!(matches!(result, Err(ForecastError::TimestampError(_))));

        // Duplicates are equally invalid
        let t = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let result = TimeSeries::new(vec![t, t], vec![1.0, 2.0]);
        assert!(matches!(result, Err(ForecastError::TimestampError(_))));
    }

    #[test]
    fn slice_extracts_half_open_range() {
        let ts = TimeSeries::new(make_timestamps(5), vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let mid = ts.slice(1, 4).unwrap();

        assert_eq!(mid.len(), 3);
        assert_eq!(mid.values(), &[2.0, 3.0, 4.0]);
        assert_eq!(mid.timestamps(), &ts.timestamps()[1..4]);

        assert!(ts.slice(3, 2).is_err());
        assert!(ts.slice(0, 6).is_err());
    }

    #[test]
    fn split_partitions_in_order() {
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let ts = TimeSeries::new(make_timestamps(100), values).unwrap();

        let (train, test) = ts.train_test_split(0.8).unwrap();

        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);
        assert_eq!(train.values()[79], 79.0);
        assert_eq!(test.values()[0], 80.0);

        // Concatenation reproduces the original exactly
        let mut rebuilt_ts = train.timestamps().to_vec();
        rebuilt_ts.extend_from_slice(test.timestamps());
        let mut rebuilt_vals = train.values().to_vec();
        rebuilt_vals.extend_from_slice(test.values());
        assert_eq!(rebuilt_ts, ts.timestamps());
        assert_eq!(rebuilt_vals, ts.values());
    }

    #[test]
    fn split_full_fraction_yields_empty_test() {
        let ts = TimeSeries::new(make_timestamps(10), (0..10).map(|i| i as f64).collect()).unwrap();
        let (train, test) = ts.train_test_split(1.0).unwrap();
        assert_eq!(train.len(), 10);
        assert!(test.is_empty());
    }

    #[test]
    fn split_rejects_bad_inputs() {
        let ts = TimeSeries::new(make_timestamps(10), (0..10).map(|i| i as f64).collect()).unwrap();
        assert!(matches!(
            ts.train_test_split(0.0),
            Err(ForecastError::InvalidParameter(_))
        ));
        assert!(matches!(
            ts.train_test_split(1.5),
            Err(ForecastError::InvalidParameter(_))
        ));

        let empty = TimeSeries::new(vec![], vec![]).unwrap();
        assert!(matches!(
            empty.train_test_split(0.8),
            Err(ForecastError::EmptyData)
        ));
    }

    #[test]
    fn monthly_span_lands_on_month_ends() {
        let span = monthly_span(2020, 1, 4).unwrap();
        let days: Vec<(i32, u32, u32)> = span
            .iter()
            .map(|t| (t.year(), t.month(), t.day()))
            .collect();
        // 2020 is a leap year
        assert_eq!(
            days,
            vec![(2020, 1, 31), (2020, 2, 29), (2020, 3, 31), (2020, 4, 30)]
        );
    }

    #[test]
    fn monthly_span_crosses_year_boundary() {
        let span = monthly_span(2020, 11, 3).unwrap();
        let months: Vec<(i32, u32)> = span.iter().map(|t| (t.year(), t.month())).collect();
        assert_eq!(months, vec![(2020, 11), (2020, 12), (2021, 1)]);
    }

    #[test]
    fn monthly_span_rejects_invalid_month() {
        assert!(matches!(
            monthly_span(2020, 13, 2),
            Err(ForecastError::TimestampError(_))
        ));
    }

    #[test]
    fn monthly_span_is_strictly_increasing() {
        let span = monthly_span(2020, 1, 100).unwrap();
        let values = vec![0.0; 100];
        // Constructor enforces the ordering invariant
        assert!(TimeSeries::new(span, values).is_ok());
    }
}
