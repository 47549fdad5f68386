//! In-memory weather source for session and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use tokio::sync::Notify;

use super::controller::SessionSettings;
use crate::forecast::{ForecastEntry, ForecastError};
use crate::source::WeatherSource;
use crate::weather::{WeatherError, WeatherSnapshot};

const KNOWN: &[&str] = &[
    "Paris", "London", "Oslo", "Rome", "Berlin", "Madrid", "Brokenville", "Slow", "Fast",
];

/// Resolves a fixed set of cities. "Brokenville" has no forecast and
/// "Slow" blocks in `current_weather` until `release` is notified.
#[derive(Default)]
pub struct FakeSource {
    pub current_calls: AtomicUsize,
    pub forecast_calls: AtomicUsize,
    pub entered: Arc<Notify>,
    pub release: Arc<Notify>,
}

fn resolve(city: &str) -> Option<&'static str> {
    KNOWN
        .iter()
        .copied()
        .find(|known| known.to_lowercase() == city.to_lowercase())
}

fn sample(dt_txt: &str, temperature: f64) -> ForecastEntry {
    ForecastEntry {
        timestamp: 0,
        dt_txt: dt_txt.to_string(),
        date: dt_txt[..10].to_string(),
        temperature,
        condition: "Clear".to_string(),
        icon: "01d".to_string(),
    }
}

#[async_trait]
impl WeatherSource for FakeSource {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.current_calls.fetch_add(1, Ordering::SeqCst);

        if city == "Slow" {
            self.entered.notify_one();
            self.release.notified().await;
        }

        let name = resolve(city).ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;
        Ok(WeatherSnapshot {
            city: name.to_string(),
            temperature: 20.0,
            condition: "Clear".to_string(),
            icon: "01d".to_string(),
            humidity: 50,
            wind_speed: 3.0,
        })
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, ForecastError> {
        self.forecast_calls.fetch_add(1, Ordering::SeqCst);

        if city.eq_ignore_ascii_case("Brokenville") {
            return Err(ForecastError::ApiError("forecast unavailable".to_string()));
        }

        Ok(vec![
            sample("2024-05-01 09:00:00", 14.0),
            sample("2024-05-01 12:00:00", 18.0),
            sample("2024-05-02 12:00:00", 19.0),
            sample("2024-05-02 15:00:00", 21.0),
            sample("2024-05-03 12:00:00", 17.0),
        ])
    }
}

pub fn settings() -> SessionSettings {
    SessionSettings {
        history_limit: 5,
        midday: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        submit_key: "Enter".to_string(),
    }
}
