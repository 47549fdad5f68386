use std::sync::Arc;

use async_trait::async_trait;

use crate::forecast::{ForecastEntry, ForecastError, ForecastService};
use crate::weather::{WeatherError, WeatherService, WeatherSnapshot};

/// Where the session controller gets its data from
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;

    /// Unfiltered forecast samples
    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, ForecastError>;
}

/// OpenWeatherMap-backed source sharing the lookup services
pub struct OpenWeatherSource {
    weather: Arc<WeatherService>,
    forecast: Arc<ForecastService>,
}

impl OpenWeatherSource {
    pub fn new(weather: Arc<WeatherService>, forecast: Arc<ForecastService>) -> Self {
        Self { weather, forecast }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn current_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        self.weather.get_weather(city).await
    }

    async fn forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, ForecastError> {
        self.forecast.get_forecast(city).await
    }
}
