use axum::{extract::State, Json};
use serde::Serialize;

use super::service::{WeatherError, WeatherSnapshot};
use crate::extractors::{CityParam, CityParamRejection};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug)]
pub enum LookupError {
    MissingCity(CityParamRejection),
    Weather(WeatherError),
}

impl axum::response::IntoResponse for LookupError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::MissingCity(rejection) => rejection.into_response(),
            Self::Weather(err) => err.into_response(),
        }
    }
}

/// Current weather without touching the session
///
/// GET /weather/{city} or GET /weather?city=London
pub async fn get_weather(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<Json<WeatherSnapshot>, LookupError> {
    let city = city.required().map_err(LookupError::MissingCity)?;
    let snapshot = state
        .weather_service
        .get_weather(&city)
        .await
        .map_err(LookupError::Weather)?;
    Ok(Json(snapshot))
}
