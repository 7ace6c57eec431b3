//! SVG plot rendering for visual inspection of series and forecasts.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;
use std::path::Path;

const PLOT_SIZE: (u32, u32) = (1000, 600);
const FORECAST_COLORS: [RGBColor; 4] = [RED, GREEN, MAGENTA, CYAN];

fn plot_err(e: impl std::fmt::Display) -> ForecastError {
    ForecastError::PlotError(e.to_string())
}

fn value_bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    // Pad so lines do not sit on the frame
    let pad = (hi - lo).abs().max(1.0) * 0.05;
    (lo - pad, hi + pad)
}

fn format_month(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m").to_string()
}

/// Render a full series as a titled line plot with a legend.
pub fn plot_series<P: AsRef<Path>>(series: &TimeSeries, title: &str, path: P) -> Result<()> {
    if series.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: series.len(),
        });
    }

    let root = SVGBackend::new(path.as_ref(), PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let timestamps = series.timestamps();
    let x_range = timestamps[0]..timestamps[timestamps.len() - 1];
    let (y_lo, y_hi) = value_bounds(series.values().iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_lo..y_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Value")
        .x_label_formatter(&format_month)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            timestamps
                .iter()
                .copied()
                .zip(series.values().iter().copied()),
            &BLUE,
        ))
        .map_err(plot_err)?
        .label("Original Data")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Render the test-period actual values against one line per forecast.
///
/// Every forecast must cover the test period exactly; a horizon mismatch is
/// reported rather than drawn misaligned.
pub fn plot_forecast_comparison<P: AsRef<Path>>(
    actual: &TimeSeries,
    forecasts: &[(&str, &Forecast)],
    title: &str,
    path: P,
) -> Result<()> {
    if actual.len() < 2 {
        return Err(ForecastError::InsufficientData {
            needed: 2,
            got: actual.len(),
        });
    }
    for (_, forecast) in forecasts {
        if forecast.horizon() != actual.len() {
            return Err(ForecastError::DimensionMismatch {
                expected: actual.len(),
                got: forecast.horizon(),
            });
        }
    }

    let root = SVGBackend::new(path.as_ref(), PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let timestamps = actual.timestamps();
    let x_range = timestamps[0]..timestamps[timestamps.len() - 1];
    let all_values = actual
        .values()
        .iter()
        .copied()
        .chain(forecasts.iter().flat_map(|(_, f)| f.values().iter().copied()));
    let (y_lo, y_hi) = value_bounds(all_values);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_lo..y_hi)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Value")
        .x_label_formatter(&format_month)
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            timestamps
                .iter()
                .copied()
                .zip(actual.values().iter().copied()),
            &BLUE,
        ))
        .map_err(plot_err)?
        .label("Actual")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    for (index, (label, forecast)) in forecasts.iter().enumerate() {
        let color = FORECAST_COLORS[index % FORECAST_COLORS.len()];
        chart
            .draw_series(LineSeries::new(
                timestamps
                    .iter()
                    .copied()
                    .zip(forecast.values().iter().copied()),
                &color,
            ))
            .map_err(plot_err)?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
