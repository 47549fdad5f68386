use axum::{
    extract::State,
    response::{Html, Redirect},
    Form, Json,
};

use super::models::{KeyInput, QueryInput, SearchForm, SessionView};
use super::render::render_dashboard;
use crate::extractors::{CityParam, CityParamRejection};
use crate::AppState;

// ============================================================================
// JSON API
// ============================================================================

/// GET /session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.session.view().await)
}

/// PUT /session/query {"text": "Par"}
pub async fn set_query(
    State(state): State<AppState>,
    Json(input): Json<QueryInput>,
) -> Json<SessionView> {
    state.session.set_query(&input.text).await;
    Json(state.session.view().await)
}

/// POST /session/key {"key": "Enter"}
pub async fn press_key(
    State(state): State<AppState>,
    Json(input): Json<KeyInput>,
) -> Json<SessionView> {
    state.session.on_key(&input.key).await;
    Json(state.session.view().await)
}

/// Submit `?city=` or, when absent, the current query
///
/// POST /session/submit
pub async fn submit(State(state): State<AppState>, city: CityParam) -> Json<SessionView> {
    let city = city.into_inner();
    state.session.submit_query(city.as_deref()).await;
    Json(state.session.view().await)
}

/// POST /session/refresh
pub async fn refresh(State(state): State<AppState>) -> Json<SessionView> {
    state.session.refresh().await;
    Json(state.session.view().await)
}

/// POST /session/history/{city}
pub async fn select_history(
    State(state): State<AppState>,
    city: CityParam,
) -> Result<Json<SessionView>, CityParamRejection> {
    let city = city.required()?;
    state.session.select_history(&city).await;
    Ok(Json(state.session.view().await))
}

/// POST /session/theme
pub async fn toggle_theme(State(state): State<AppState>) -> Json<SessionView> {
    state.session.toggle_theme().await;
    Json(state.session.view().await)
}

// ============================================================================
// HTML dashboard
// ============================================================================

/// GET /
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let view = state.session.view().await;
    Html(render_dashboard(&view, &state.config.icon_base_url))
}

/// POST /search (form field `city`)
pub async fn search_form(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Redirect {
    state.session.set_query(&form.city).await;
    state.session.submit_query(None).await;
    Redirect::to("/")
}

/// POST /refresh
pub async fn refresh_form(State(state): State<AppState>) -> Redirect {
    state.session.refresh().await;
    Redirect::to("/")
}

/// POST /history (form field `city`)
pub async fn history_form(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Redirect {
    state.session.select_history(&form.city).await;
    Redirect::to("/")
}

/// POST /theme
pub async fn theme_form(State(state): State<AppState>) -> Redirect {
    state.session.toggle_theme().await;
    Redirect::to("/")
}
