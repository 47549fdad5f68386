use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::forecast::models::ForecastEntry;
use crate::session::models::{KeyInput, QueryInput, SessionView, Theme, ViewStatus};
use crate::weather::service::WeatherSnapshot;

/// OpenAPI schema documentation for the dashboard API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weatherdash API",
        version = "0.1.0",
        description = "Single-session weather dashboard over OpenWeatherMap: current conditions, a midday daily forecast and recent searches.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    tags(
        (name = "weather", description = "Stateless current weather lookup"),
        (name = "forecast", description = "Stateless daily forecast lookup"),
        (name = "session", description = "Dashboard session state and commands")
    ),
    components(
        schemas(
            ErrorResponse,
            WeatherSnapshot,
            ForecastEntry,
            SessionView,
            ViewStatus,
            Theme,
            QueryInput,
            KeyInput,
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
