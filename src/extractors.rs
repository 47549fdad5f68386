use axum::{
    extract::{FromRequestParts, Path, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::ErrorResponse;

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: Option<String>,
}

/// City taken from the `{city}` path segment, falling back to `?city=`
///
/// Blank values count as absent.
#[derive(Debug)]
pub struct CityParam(pub Option<String>);

impl CityParam {
    pub fn into_inner(self) -> Option<String> {
        self.0
    }

    /// City value, or a 400 rejection when none was given
    pub fn required(self) -> Result<String, CityParamRejection> {
        self.0
            .ok_or_else(|| CityParamRejection("city is required".to_string()))
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl<S> FromRequestParts<S> for CityParam
where
    S: Send + Sync,
{
    type Rejection = CityParamRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Ok(Path(city)) = Path::<String>::from_request_parts(parts, state).await {
            if let Some(city) = non_blank(city) {
                return Ok(CityParam(Some(city)));
            }
        }

        if let Ok(Query(query)) = Query::<CityQuery>::from_request_parts(parts, state).await {
            return Ok(CityParam(query.city.and_then(non_blank)));
        }

        Ok(CityParam(None))
    }
}

#[derive(Debug)]
pub struct CityParamRejection(pub String);

impl IntoResponse for CityParamRejection {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.0))).into_response()
    }
}
