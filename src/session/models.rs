use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::history::SearchHistory;
use crate::forecast::ForecastEntry;
use crate::weather::WeatherSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// What the dashboard should be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ViewStatus {
    Idle,
    Loading,
    Error,
    Success,
}

/// Session-local state; nothing here outlives the process.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub query: String,
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub error: Option<String>,
    pub loading: bool,
    pub history: SearchHistory,
    pub theme: Theme,
    /// Bumped by every submission; results from older ones are discarded.
    pub generation: u64,
}

impl SessionState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            query: String::new(),
            weather: None,
            forecast: Vec::new(),
            error: None,
            loading: false,
            history: SearchHistory::new(history_limit),
            theme: Theme::default(),
            generation: 0,
        }
    }

    /// Start a submission: clear results, raise the loading flag, and
    /// return the generation the results must match.
    pub fn begin_fetch(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        self.weather = None;
        self.forecast.clear();
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    pub fn status(&self) -> ViewStatus {
        if self.loading {
            ViewStatus::Loading
        } else if self.error.is_some() {
            ViewStatus::Error
        } else if self.weather.is_some() {
            ViewStatus::Success
        } else {
            ViewStatus::Idle
        }
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            status: self.status(),
            query: self.query.clone(),
            loading: self.loading,
            error: self.error.clone(),
            weather: self.weather.clone(),
            forecast: self.forecast.clone(),
            history: self.history.entries().to_vec(),
            theme: self.theme,
        }
    }
}

/// Read-only copy of the session handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SessionView {
    pub status: ViewStatus,
    pub query: String,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
    pub forecast: Vec<ForecastEntry>,
    pub history: Vec<String>,
    pub theme: Theme,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QueryInput {
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct KeyInput {
    pub key: String,
}

/// Form body of the dashboard search box
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub city: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_fetch_clears_results() {
        let mut state = SessionState::new(5);
        state.error = Some("old".to_string());
        state.weather = Some(WeatherSnapshot {
            city: "Oslo".to_string(),
            temperature: 1.0,
            condition: "Snow".to_string(),
            icon: "13d".to_string(),
            humidity: 90,
            wind_speed: 2.0,
        });
        state.forecast = vec![ForecastEntry {
            timestamp: 1714564800,
            dt_txt: "2024-05-01 12:00:00".to_string(),
            date: "2024-05-01".to_string(),
            temperature: 18.0,
            condition: "Clear".to_string(),
            icon: "01d".to_string(),
        }];
        state.history.record("Oslo");
        state.query = "Osl".to_string();

        let generation = state.begin_fetch();

        assert_eq!(generation, 1);
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.weather.is_none());
        assert!(state.forecast.is_empty());
        assert_eq!(state.history.entries(), ["Oslo"]);
        assert_eq!(state.query, "Osl");
        assert_eq!(state.status(), ViewStatus::Loading);
        assert!(state.is_current(1));
        assert_eq!(state.begin_fetch(), 2);
        assert!(!state.is_current(1));
    }

    #[test]
    fn test_status_derivation() {
        let mut state = SessionState::new(5);
        assert_eq!(state.status(), ViewStatus::Idle);
        state.error = Some("City not found".to_string());
        assert_eq!(state.status(), ViewStatus::Error);
    }

    #[test]
    fn test_theme_toggle_and_serde() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(serde_json::to_value(Theme::Dark).unwrap(), "dark");
    }
}
