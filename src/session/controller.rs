use std::sync::Arc;

use chrono::NaiveTime;
use config::ConfigError;
use thiserror::Error;
use tokio::sync::RwLock;

use super::models::{SessionState, SessionView, Theme};
use crate::config::SessionConfig;
use crate::forecast::{midday_entries, ForecastEntry, ForecastError};
use crate::source::WeatherSource;
use crate::weather::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Current-weather endpoint answered with a non-success status
    CityNotFound,
    NetworkOrParse,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Weather(WeatherError::CityNotFound(_)) => FailureKind::CityNotFound,
            _ => FailureKind::NetworkOrParse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to look up
    Skipped,
    Completed,
    Failed(FailureKind),
    /// A newer submission started before this one resolved
    Superseded,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub history_limit: usize,
    pub midday: NaiveTime,
    pub submit_key: String,
}

impl SessionSettings {
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            history_limit: config.history_limit,
            midday: config.midday()?,
            submit_key: config.submit_key.clone(),
        })
    }
}

/// Drives one dashboard session: query, lookups, history and theme.
pub struct SessionController {
    source: Arc<dyn WeatherSource>,
    settings: SessionSettings,
    state: Arc<RwLock<SessionState>>,
}

/// One submission's fetch-and-apply work, detached from the caller so a
/// dropped request cannot leave the session loading.
struct Lookup {
    source: Arc<dyn WeatherSource>,
    state: Arc<RwLock<SessionState>>,
    midday: NaiveTime,
    name: String,
    generation: u64,
}

impl Lookup {
    async fn run(self) -> SubmitOutcome {
        let result = self.fetch().await;

        let mut state = self.state.write().await;
        if !state.is_current(self.generation) {
            tracing::debug!(city = %self.name, generation = self.generation, "Discarding superseded result");
            return SubmitOutcome::Superseded;
        }

        state.loading = false;

        match result {
            Ok(daily) => {
                state.forecast = daily;
                state.history.record(&self.name);
                state.query.clear();
                tracing::info!(
                    city = %self.name,
                    forecast_days = state.forecast.len(),
                    "Weather query completed"
                );
                SubmitOutcome::Completed
            }
            Err(err) => {
                let kind = err.kind();
                tracing::warn!(city = %self.name, error = %err, kind = ?kind, "Weather query failed");
                state.error = Some(err.to_string());
                SubmitOutcome::Failed(kind)
            }
        }
    }

    /// The snapshot is published as soon as it arrives; a later forecast
    /// failure leaves it in place.
    async fn fetch(&self) -> Result<Vec<ForecastEntry>, FetchError> {
        let snapshot = self.source.current_weather(&self.name).await?;

        {
            let mut state = self.state.write().await;
            if !state.is_current(self.generation) {
                return Ok(Vec::new());
            }
            state.weather = Some(snapshot);
        }

        let entries = self.source.forecast(&self.name).await?;
        Ok(midday_entries(entries, self.midday))
    }
}

impl SessionController {
    pub fn new(source: Arc<dyn WeatherSource>, settings: SessionSettings) -> Self {
        let state = SessionState::new(settings.history_limit);
        Self {
            source,
            settings,
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub fn midday(&self) -> NaiveTime {
        self.settings.midday
    }

    pub async fn view(&self) -> SessionView {
        self.state.read().await.view()
    }

    pub async fn set_query(&self, text: &str) {
        self.state.write().await.query = text.to_string();
    }

    /// Submit the current query when `key` is the submit key.
    pub async fn on_key(&self, key: &str) -> SubmitOutcome {
        if key == self.settings.submit_key {
            self.submit_query(None).await
        } else {
            SubmitOutcome::Skipped
        }
    }

    /// Look up the displayed city again. Promotes it in the history like
    /// any other successful lookup.
    pub async fn refresh(&self) -> SubmitOutcome {
        let city = self
            .state
            .read()
            .await
            .weather
            .as_ref()
            .map(|snapshot| snapshot.city.clone());

        match city {
            Some(city) => self.submit_query(Some(&city)).await,
            None => SubmitOutcome::Skipped,
        }
    }

    pub async fn select_history(&self, city: &str) -> SubmitOutcome {
        self.submit_query(Some(city)).await
    }

    pub async fn toggle_theme(&self) -> Theme {
        let mut state = self.state.write().await;
        state.theme = state.theme.toggled();
        state.theme
    }

    /// Fetch current weather then the forecast for `city`, or for the
    /// current query when `city` is `None`.
    pub async fn submit_query(&self, city: Option<&str>) -> SubmitOutcome {
        let name = match city {
            Some(city) => city.trim().to_string(),
            None => self.state.read().await.query.trim().to_string(),
        };

        if name.is_empty() {
            tracing::debug!("Empty query, nothing to submit");
            return SubmitOutcome::Skipped;
        }

        let generation = self.state.write().await.begin_fetch();
        tracing::info!(city = %name, generation, "Submitting weather query");

        let lookup = Lookup {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            midday: self.settings.midday,
            name,
            generation,
        };

        match tokio::spawn(lookup.run()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, generation, "Weather lookup task failed");
                let mut state = self.state.write().await;
                if !state.is_current(generation) {
                    return SubmitOutcome::Superseded;
                }
                state.loading = false;
                state.error = Some("Weather lookup failed unexpectedly".to_string());
                SubmitOutcome::Failed(FailureKind::NetworkOrParse)
            }
        }
    }
}
