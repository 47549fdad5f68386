use axum::{
    routing::{get, post, put},
    Router,
};

use crate::forecast::handlers as forecast_handlers;
use crate::openapi::swagger_ui;
use crate::session::handlers as session_handlers;
use crate::weather::handlers as weather_handlers;
use crate::AppState;

/// Stateless lookups; these never touch the session
fn lookup_routes() -> Router<AppState> {
    Router::new()
        .route("/weather", get(weather_handlers::get_weather))
        .route("/weather/{city}", get(weather_handlers::get_weather))
        .route("/forecast", get(forecast_handlers::get_daily_forecast))
        .route(
            "/forecast/{city}",
            get(forecast_handlers::get_daily_forecast),
        )
}

/// Session controller operations, JSON in and out
fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session_handlers::get_session))
        .route("/session/query", put(session_handlers::set_query))
        .route("/session/key", post(session_handlers::press_key))
        .route("/session/submit", post(session_handlers::submit))
        .route("/session/refresh", post(session_handlers::refresh))
        .route(
            "/session/history/{city}",
            post(session_handlers::select_history),
        )
        .route("/session/theme", post(session_handlers::toggle_theme))
}

/// Server-rendered dashboard driven by plain HTML forms
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(session_handlers::dashboard))
        .route("/search", post(session_handlers::search_form))
        .route("/refresh", post(session_handlers::refresh_form))
        .route("/history", post(session_handlers::history_form))
        .route("/theme", post(session_handlers::theme_form))
}

pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(lookup_routes())
        .merge(session_routes())
}

pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(dashboard_routes())
        .route("/health", get(weather_handlers::health))
        .nest("/api/v1", api_v1_routes())
        .merge(swagger_ui())
}
