//! City read handlers.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use cityinfo_core::serde::deserialize_flag;
use cityinfo_core::storage::CityRepository;

use crate::{
    handlers::ApiError,
    models::{CityDto, CityWithoutPointsOfInterestDto},
    state::AppState,
};

/// Query parameters for fetching a single city.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCityQuery {
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub include_points_of_interest: bool,
}

/// List all cities ordered by name (GET /api/cities).
pub async fn list_cities(
    State(state): State<AppState>,
) -> Result<Json<Vec<CityWithoutPointsOfInterestDto>>, ApiError> {
    let cities = state.unit_of_work().get_cities().await?;

    Ok(Json(
        cities
            .into_iter()
            .map(CityWithoutPointsOfInterestDto::from)
            .collect(),
    ))
}

/// Get a single city (GET /api/cities/{id}?includePointsOfInterest=bool).
pub async fn get_city(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<GetCityQuery>,
) -> Result<Response, ApiError> {
    let city = state
        .unit_of_work()
        .get_city(id, query.include_points_of_interest)
        .await?
        .ok_or(ApiError::NotFound)?;

    if query.include_points_of_interest {
        return Ok(Json(CityDto::from(city)).into_response());
    }

    Ok(Json(CityWithoutPointsOfInterestDto::from(city)).into_response())
}
