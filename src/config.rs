use chrono::NaiveTime;
use config::{Case, Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// OpenWeatherMap API key
    pub openweathermap_api_key: String,

    /// Base URL of the OpenWeatherMap 2.5 API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Base URL for condition icons
    #[serde(default = "default_icon_base_url")]
    pub icon_base_url: String,

    /// Outbound HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Session controller configuration
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Whole-request timeout for provider calls
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout for provider calls
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Timeout for inbound dashboard requests; must outlast both provider calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Maximum number of recent searches kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Forecast sample time kept for each day (HH:MM:SS)
    #[serde(default = "default_midday_time")]
    pub midday_time: String,

    /// Key name that triggers a submit
    #[serde(default = "default_submit_key")]
    pub submit_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            midday_time: default_midday_time(),
            submit_key: default_submit_key(),
        }
    }
}

impl SessionConfig {
    /// Parsed form of `midday_time`
    pub fn midday(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(&self.midday_time, "%H:%M:%S").map_err(|e| {
            ConfigError::Message(format!(
                "session.midday_time must be HH:MM:SS, got '{}': {}",
                self.midday_time, e
            ))
        })
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_icon_base_url() -> String {
    "https://openweathermap.org/img/wn".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_request_timeout_secs() -> u64 {
    90
}

fn default_history_limit() -> usize {
    5
}

fn default_midday_time() -> String {
    "12:00:00".to_string()
}

fn default_submit_key() -> String {
    "Enter".to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            .set_default("host", default_host())?
            .set_default("port", default_port())?
            .set_default("api_base_url", default_api_base_url())?
            .set_default("icon_base_url", default_icon_base_url())?
            .add_source(File::with_name("config").required(false))
            .add_source(File::with_name("config.local").required(false))
            // WEATHERDASH_OPENWEATHERMAP_API_KEY, WEATHERDASH_SESSION__HISTORY_LIMIT, ...
            .add_source(
                Environment::with_prefix("WEATHERDASH")
                    .prefix_separator("_")
                    .separator("__")
                    .convert_case(Case::Snake)
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the session cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openweathermap_api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "openweathermap_api_key is empty; set WEATHERDASH_OPENWEATHERMAP_API_KEY"
                    .to_string(),
            ));
        }

        if self.session.history_limit == 0 {
            return Err(ConfigError::Message(
                "session.history_limit must be at least 1".to_string(),
            ));
        }

        // A submission makes two sequential provider calls.
        if self.http.timeout_secs.saturating_mul(2) >= self.http.request_timeout_secs {
            return Err(ConfigError::Message(format!(
                "http.request_timeout_secs ({}) must exceed twice http.timeout_secs ({})",
                self.http.request_timeout_secs, self.http.timeout_secs
            )));
        }

        self.session.midday()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            host: default_host(),
            port: default_port(),
            openweathermap_api_key: "KEY".to_string(),
            api_base_url: default_api_base_url(),
            icon_base_url: default_icon_base_url(),
            http: HttpConfig::default(),
            session: SessionConfig::default(),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = test_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.session.history_limit, 5);
        assert_eq!(
            config.session.midday().unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut config = test_config();
        config.openweathermap_api_key = "   ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("openweathermap_api_key"));
    }

    #[test]
    fn test_zero_history_limit_rejected() {
        let mut config = test_config();
        config.session.history_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_request_timeout_must_outlast_two_provider_calls() {
        let mut config = test_config();
        config.http.timeout_secs = 30;
        config.http.request_timeout_secs = 60;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        config.http.request_timeout_secs = 61;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_midday_time_rejected() {
        let mut config = test_config();
        config.session.midday_time = "noon".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HH:MM:SS"));
    }

    #[test]
    fn test_deserialize_nested_sections() {
        let config: AppConfig = Config::builder()
            .set_override("openweathermap_api_key", "abc")
            .unwrap()
            .set_override("session.history_limit", 3)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.session.history_limit, 3);
        assert_eq!(config.session.submit_key, "Enter");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.http.request_timeout_secs, 90);
    }
}
