mod config;
mod error;
mod extractors;
mod forecast;
mod openapi;
mod routes;
mod session;
mod source;
mod weather;

use axum::{error_handling::HandleErrorLayer, http::StatusCode, BoxError};
use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, HttpConfig};
use crate::forecast::ForecastService;
use crate::session::{SessionController, SessionSettings};
use crate::source::OpenWeatherSource;
use crate::weather::WeatherService;

const HTTP_POOL_IDLE_TIMEOUT_SECS: u64 = 90;

#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub forecast_service: Arc<ForecastService>,
    pub session: Arc<SessionController>,
    pub config: Arc<AppConfig>,
}

/// Shared outbound client; the timeout bounds how long a lookup can stay loading
fn create_http_client(http: &HttpConfig) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
        .pool_idle_timeout(Duration::from_secs(HTTP_POOL_IDLE_TIMEOUT_SECS))
        .pool_max_idle_per_host(4)
        .build()
}

async fn handle_timeout_error(err: BoxError) -> (StatusCode, String) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", err),
        )
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherdash=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;
    tracing::info!(api_base_url = %config.api_base_url, "Configuration loaded");

    let http_client = create_http_client(&config.http)?;

    let weather_service = Arc::new(WeatherService::new(
        http_client.clone(),
        &config.openweathermap_api_key,
        &config.api_base_url,
    ));
    let forecast_service = Arc::new(ForecastService::new(
        http_client,
        &config.openweathermap_api_key,
        &config.api_base_url,
    ));

    let source = Arc::new(OpenWeatherSource::new(
        Arc::clone(&weather_service),
        Arc::clone(&forecast_service),
    ));
    let settings = SessionSettings::from_config(&config.session)?;
    tracing::debug!(
        history_limit = settings.history_limit,
        midday = %settings.midday,
        "Session settings resolved"
    );
    let session = Arc::new(SessionController::new(source, settings));

    let state = AppState {
        weather_service,
        forecast_service,
        session,
        config: Arc::new(config.clone()),
    };

    let app = routes::build_router()
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .timeout(Duration::from_secs(config.http.request_timeout_secs)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
