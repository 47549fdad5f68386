use axum::{extract::State, Json};

use super::models::ForecastEntry;
use super::service::{midday_entries, ForecastError};
use crate::extractors::{CityParam, CityParamRejection};
use crate::AppState;

#[derive(Debug)]
pub enum ForecastLookupError {
    MissingCity(CityParamRejection),
    Forecast(ForecastError),
}

impl axum::response::IntoResponse for ForecastLookupError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::MissingCity(rejection) => rejection.into_response(),
            Self::Forecast(err) => err.into_response(),
        }
    }
}

/// Daily (midday) forecast without touching the session
///
/// GET /forecast/{city} or GET /forecast?city=London
pub async fn get_daily_forecast(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<Json<Vec<ForecastEntry>>, ForecastLookupError> {
    let city = city.required().map_err(ForecastLookupError::MissingCity)?;
    let entries = state
        .forecast_service
        .get_forecast(&city)
        .await
        .map_err(ForecastLookupError::Forecast)?;

    Ok(Json(midday_entries(entries, state.session.midday())))
}
