use axum::http::StatusCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::HttpError;
use crate::impl_into_response;

/// Units are fixed; the dashboard only shows °C.
pub const UNITS: &str = "metric";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Failed to fetch weather data: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Any non-success status from the current-weather endpoint.
    #[error("City not found")]
    CityNotFound(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl HttpError for WeatherError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::CityNotFound(_) => StatusCode::NOT_FOUND,
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::CityNotFound(_) => Some("CITY_NOT_FOUND"),
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
        }
    }
}

impl_into_response!(WeatherError);

/// Current conditions for one city, as shown on the weather card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSnapshot {
    pub city: String,
    /// °C
    pub temperature: f64,
    /// Primary condition label, e.g. "Clouds"
    pub condition: String,
    pub icon: String,
    /// Percent
    pub humidity: u32,
    pub wind_speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    main: MainInfo,
    weather: Vec<ConditionInfo>,
    wind: WindInfo,
}

#[derive(Debug, Deserialize)]
struct MainInfo {
    temp: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionInfo {
    main: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

impl CurrentWeatherResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            WeatherError::InvalidResponse("No weather information available".to_string())
        })?;

        Ok(WeatherSnapshot {
            city: self.name,
            temperature: self.main.temp,
            condition: condition.main,
            icon: condition.icon,
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
        })
    }
}

/// Parse a current-weather body into a snapshot
pub fn parse_current(body: &str) -> Result<WeatherSnapshot, WeatherError> {
    let data: CurrentWeatherResponse = serde_json::from_str(body)
        .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;
    data.into_snapshot()
}

pub struct WeatherService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherService {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        tracing::debug!(city = %city, "Fetching current weather");

        let response = self
            .client
            .get(format!("{}/weather", self.base_url))
            .query(&[("q", city), ("appid", &self.api_key), ("units", UNITS)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received current weather response");

        if !status.is_success() {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        let body = response.text().await?;
        let snapshot = parse_current(&body)?;

        tracing::info!(city = %snapshot.city, temp = %snapshot.temperature, "Current weather fetched");

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "main": {"temp": 14.2, "feels_like": 13.6, "pressure": 1012, "humidity": 72},
        "wind": {"speed": 4.1, "deg": 240},
        "sys": {"country": "GB"},
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_current() {
        let snapshot = parse_current(LONDON).unwrap();
        assert_eq!(snapshot.city, "London");
        assert_eq!(snapshot.temperature, 14.2);
        assert_eq!(snapshot.condition, "Clouds");
        assert_eq!(snapshot.icon, "04d");
        assert_eq!(snapshot.humidity, 72);
        assert_eq!(snapshot.wind_speed, 4.1);
    }

    #[test]
    fn test_parse_current_without_conditions() {
        let body = r#"{"name": "Nowhere", "main": {"temp": 1.0, "humidity": 10},
                       "weather": [], "wind": {"speed": 0.0}}"#;
        let err = parse_current(body).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn test_parse_current_malformed_json() {
        let err = parse_current("<html>").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidResponse(_)));
    }

    #[test]
    fn test_city_not_found_message_is_fixed() {
        let err = WeatherError::CityNotFound("Atlantis".to_string());
        assert_eq!(err.to_string(), "City not found");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), Some("CITY_NOT_FOUND"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let service = WeatherService::new(Client::new(), "KEY", "http://localhost:9000/");
        assert_eq!(service.base_url, "http://localhost:9000");
    }
}
