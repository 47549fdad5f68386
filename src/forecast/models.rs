use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============================================================================
// 5 day / 3 hour forecast response (internal)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastApiResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastItem {
    pub dt: i64,
    /// Provider-local "YYYY-MM-DD HH:MM:SS"
    pub dt_txt: String,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<ForecastCondition>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastCondition {
    pub main: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ForecastApiError {
    pub message: String,
}

// ============================================================================
// What the dashboard shows
// ============================================================================

/// One forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastEntry {
    /// Unix seconds
    pub timestamp: i64,
    pub dt_txt: String,
    /// Calendar date of `dt_txt`, "YYYY-MM-DD"
    pub date: String,
    /// °C
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}
