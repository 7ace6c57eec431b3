//! End-to-end tests for the generate/split/fit/forecast/score pipeline.

use seasonal_forecast::models::arima::{Arima, Sarima};
use seasonal_forecast::models::Forecaster;
use seasonal_forecast::synthetic::SyntheticSeries;
use seasonal_forecast::utils::mse;
use seasonal_forecast::ForecastError;

#[test]
fn demo_scenario_end_to_end() {
    // seed=42, N=100, trend 0.5t, seasonality 10*sin(2*pi*t/12), noise N(0,2)
    let series = SyntheticSeries::new().build().unwrap();
    assert_eq!(series.len(), 100);

    let (train, test) = series.train_test_split(0.8).unwrap();
    assert_eq!(train.len(), 80);
    assert_eq!(test.len(), 20);
    assert_eq!(train.len() + test.len(), series.len());

    let mut arima = Arima::new(1, 1, 1);
    arima.fit(&train).unwrap();
    let mut sarima = Sarima::new(1, 1, 1, 1, 1, 1, 12);
    sarima.fit(&train).unwrap();

    let arima_forecast = arima.predict(test.len()).unwrap();
    let sarima_forecast = sarima.predict(test.len()).unwrap();
    assert_eq!(arima_forecast.horizon(), 20);
    assert_eq!(sarima_forecast.horizon(), 20);

    let arima_mse = mse(test.values(), arima_forecast.values()).unwrap();
    let sarima_mse = mse(test.values(), sarima_forecast.values()).unwrap();

    assert!(arima_mse.is_finite() && arima_mse > 0.0);
    assert!(sarima_mse.is_finite() && sarima_mse > 0.0);
}

#[test]
fn regenerating_reproduces_identical_partitions() {
    let first = SyntheticSeries::new().build().unwrap();
    let second = SyntheticSeries::new().build().unwrap();

    let (train_a, test_a) = first.train_test_split(0.8).unwrap();
    let (train_b, test_b) = second.train_test_split(0.8).unwrap();

    assert_eq!(train_a.values(), train_b.values());
    assert_eq!(train_a.timestamps(), train_b.timestamps());
    assert_eq!(test_a.values(), test_b.values());
    assert_eq!(test_a.timestamps(), test_b.timestamps());
}

#[test]
fn empty_test_segment_fails_scoring_cleanly() {
    let series = SyntheticSeries::new().build().unwrap();
    let (train, test) = series.train_test_split(1.0).unwrap();
    assert_eq!(train.len(), 100);
    assert!(test.is_empty());

    let mut arima = Arima::new(1, 1, 1);
    arima.fit(&train).unwrap();
    let forecast = arima.predict(test.len()).unwrap();

    assert!(matches!(
        mse(test.values(), forecast.values()),
        Err(ForecastError::EmptyData)
    ));
}

#[test]
fn forecast_length_always_matches_horizon() {
    let series = SyntheticSeries::new().build().unwrap();
    let (train, _) = series.train_test_split(0.8).unwrap();

    let mut arima = Arima::new(1, 1, 1);
    arima.fit(&train).unwrap();
    let mut sarima = Sarima::new(1, 1, 1, 1, 1, 1, 12);
    sarima.fit(&train).unwrap();

    for horizon in [1, 5, 12, 20, 30] {
        assert_eq!(arima.predict(horizon).unwrap().horizon(), horizon);
        assert_eq!(sarima.predict(horizon).unwrap().horizon(), horizon);
    }
}

#[test]
fn seasonal_model_tracks_the_seasonal_shape() {
    // With low noise the seasonal model should forecast the held-out cycle
    // closely; a generous bound still catches gross misbehavior.
    let series = SyntheticSeries::new().with_noise_std(0.1).build().unwrap();
    let (train, test) = series.train_test_split(0.8).unwrap();

    let mut sarima = Sarima::new(1, 1, 1, 1, 1, 1, 12);
    sarima.fit(&train).unwrap();
    let forecast = sarima.predict(test.len()).unwrap();

    let score = mse(test.values(), forecast.values()).unwrap();
    assert!(
        score < 25.0,
        "seasonal forecast MSE {score} unexpectedly large on near-noiseless data"
    );
}
