//! ARIMA vs SARIMA comparison on a synthetic seasonal series.
//!
//! Generates a reproducible monthly series, fits both models on the leading
//! 80%, forecasts the trailing 20%, prints each model's mean squared error,
//! and writes two SVG plots for visual inspection.

use seasonal_forecast::models::arima::{Arima, Sarima};
use seasonal_forecast::models::Forecaster;
use seasonal_forecast::plot::{plot_forecast_comparison, plot_series};
use seasonal_forecast::synthetic::SyntheticSeries;
use seasonal_forecast::utils::mse;
use seasonal_forecast::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SEED: u64 = 42;
const SERIES_LEN: usize = 100;
const TRAIN_FRACTION: f64 = 0.8;
const SEASONAL_PERIOD: usize = 12;
const SERIES_PLOT: &str = "generated_series.svg";
const FORECAST_PLOT: &str = "forecast_comparison.svg";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let series = SyntheticSeries::new()
        .with_length(SERIES_LEN)
        .with_seed(SEED)
        .build()?;
    info!(observations = series.len(), "generated synthetic series");

    plot_series(&series, "Generated Time Series Data", SERIES_PLOT)?;

    let (train, test) = series.train_test_split(TRAIN_FRACTION)?;
    info!(train = train.len(), test = test.len(), "split series");

    let mut arima = Arima::new(1, 1, 1);
    arima.fit(&train)?;

    let mut sarima = Sarima::new(1, 1, 1, 1, 1, 1, SEASONAL_PERIOD);
    sarima.fit(&train)?;

    let horizon = test.len();
    let arima_forecast = arima.predict(horizon)?;
    let sarima_forecast = sarima.predict(horizon)?;

    let arima_mse = mse(test.values(), arima_forecast.values())?;
    let sarima_mse = mse(test.values(), sarima_forecast.values())?;

    println!("MSE for ARIMA: {arima_mse}");
    println!("MSE for SARIMA: {sarima_mse}");

    plot_forecast_comparison(
        &test,
        &[
            ("ARIMA Forecast", &arima_forecast),
            ("SARIMA Forecast", &sarima_forecast),
        ],
        "ARIMA and SARIMA Forecast",
        FORECAST_PLOT,
    )?;
    info!(
        series_plot = SERIES_PLOT,
        forecast_plot = FORECAST_PLOT,
        "wrote plots"
    );

    Ok(())
}
