use std::collections::HashSet;

use axum::http::StatusCode;
use chrono::{NaiveDateTime, NaiveTime};
use reqwest::Client;
use thiserror::Error;

use super::models::*;
use crate::error::HttpError;
use crate::impl_into_response;
use crate::weather::service::UNITS;

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("Failed to fetch forecast data: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Forecast API error: {0}")]
    ApiError(String),

    #[error("Invalid forecast response: {0}")]
    InvalidResponse(String),
}

impl HttpError for ForecastError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestError(_) => StatusCode::BAD_GATEWAY,
            Self::ApiError(_) => StatusCode::BAD_GATEWAY,
            Self::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::RequestError(_) => Some("REQUEST_ERROR"),
            Self::ApiError(_) => Some("API_ERROR"),
            Self::InvalidResponse(_) => Some("INVALID_RESPONSE"),
        }
    }
}

impl_into_response!(ForecastError);

fn parse_dt_txt(dt_txt: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(dt_txt, DT_TXT_FORMAT).ok()
}

/// Flatten the provider list; samples with an unreadable `dt_txt` are dropped.
pub fn transform_items(items: Vec<ForecastItem>) -> Vec<ForecastEntry> {
    items
        .into_iter()
        .filter_map(|item| {
            let Some(local) = parse_dt_txt(&item.dt_txt) else {
                tracing::warn!(dt_txt = %item.dt_txt, "Skipping forecast sample with bad timestamp");
                return None;
            };

            let (condition, icon) = item
                .weather
                .into_iter()
                .next()
                .map(|w| (w.main, w.icon))
                .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

            Some(ForecastEntry {
                timestamp: item.dt,
                date: local.date().format("%Y-%m-%d").to_string(),
                dt_txt: item.dt_txt,
                temperature: item.main.temp,
                condition,
                icon,
            })
        })
        .collect()
}

/// Parse a forecast body into unfiltered entries
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastEntry>, ForecastError> {
    let data: ForecastApiResponse = serde_json::from_str(body)
        .map_err(|e| ForecastError::InvalidResponse(e.to_string()))?;
    Ok(transform_items(data.list))
}

/// Keep the sample taken at `midday` for each calendar day, first one wins.
pub fn midday_entries(entries: Vec<ForecastEntry>, midday: NaiveTime) -> Vec<ForecastEntry> {
    let mut seen_days = HashSet::new();

    entries
        .into_iter()
        .filter(|entry| {
            parse_dt_txt(&entry.dt_txt).is_some_and(|local| local.time() == midday)
                && seen_days.insert(entry.date.clone())
        })
        .collect()
}

pub struct ForecastService {
    client: Client,
    api_key: String,
    base_url: String,
}

impl ForecastService {
    pub fn new(client: Client, api_key: &str, base_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full 3-hourly forecast, unfiltered
    pub async fn get_forecast(&self, city: &str) -> Result<Vec<ForecastEntry>, ForecastError> {
        tracing::debug!(city = %city, "Fetching forecast");

        let response = self
            .client
            .get(format!("{}/forecast", self.base_url))
            .query(&[("q", city), ("appid", &self.api_key), ("units", UNITS)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = %status, "Received forecast response");

        if !status.is_success() {
            let error: ForecastApiError = response.json().await.unwrap_or(ForecastApiError {
                message: format!("HTTP {}", status),
            });
            return Err(ForecastError::ApiError(error.message));
        }

        let body = response.text().await?;
        let entries = parse_forecast(&body)?;

        tracing::info!(city = %city, samples = entries.len(), "Forecast fetched");

        Ok(entries)
    }
}
