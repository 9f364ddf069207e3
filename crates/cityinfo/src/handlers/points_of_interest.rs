//! Point of interest handlers.
//!
//! Every handler checks that the parent city exists before touching its
//! children, so a missing city is always a 404 without a child lookup.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use cityinfo_core::city::{
    PatchDocument, PointOfInterest, PointOfInterestForCreation, PointOfInterestForUpdate,
};
use cityinfo_core::storage::{CityRepository, UnitOfWork};

use crate::{handlers::ApiError, models::PointOfInterestDto, state::AppState};

async fn ensure_city_exists(uow: &UnitOfWork, city_id: i64) -> Result<(), ApiError> {
    if uow.city_exists(city_id).await? {
        Ok(())
    } else {
        Err(ApiError::NotFound)
    }
}

/// Loads a child after the city check. Absent child is a 404.
async fn find_point_of_interest(
    uow: &UnitOfWork,
    city_id: i64,
    id: i64,
) -> Result<PointOfInterest, ApiError> {
    ensure_city_exists(uow, city_id).await?;

    uow.get_point_of_interest_for_city(city_id, id)
        .await?
        .ok_or(ApiError::NotFound)
}

async fn save(uow: &mut UnitOfWork) -> Result<(), ApiError> {
    if uow.save().await {
        Ok(())
    } else {
        Err(ApiError::SaveFailed)
    }
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(format!("Failed to parse request body: {rejection}"))
}

// ============================================================================
// Reads
// ============================================================================

/// List a city's points of interest (GET /api/cities/{city_id}/pointsOfInterest).
pub async fn list_points_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i64>,
) -> Result<Json<Vec<PointOfInterestDto>>, ApiError> {
    let uow = state.unit_of_work();

    if !uow.city_exists(city_id).await? {
        tracing::info!(city_id, "City with id {city_id} was not found");
        return Err(ApiError::NotFound);
    }

    let points = uow.get_points_of_interest_for_city(city_id).await?;

    Ok(Json(points.into_iter().map(PointOfInterestDto::from).collect()))
}

/// Get one point of interest (GET /api/cities/{city_id}/pointsOfInterest/{id}).
pub async fn get_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i64, i64)>,
) -> Result<Json<PointOfInterestDto>, ApiError> {
    let uow = state.unit_of_work();
    let point = find_point_of_interest(&uow, city_id, id).await?;

    Ok(Json(point.into()))
}

// ============================================================================
// Create
// ============================================================================

/// Create a point of interest (POST /api/cities/{city_id}/pointsOfInterest).
pub async fn create_point_of_interest(
    State(state): State<AppState>,
    Path(city_id): Path<i64>,
    body: Result<Json<PointOfInterestForCreation>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body.map_err(bad_body)?;
    let new_point = payload.validate()?;

    let mut uow = state.unit_of_work();
    ensure_city_exists(&uow, city_id).await?;

    let staged = uow.add_point_of_interest_for_city(city_id, new_point);
    save(&mut uow).await?;

    let point = uow.inserted(staged).cloned().ok_or(ApiError::SaveFailed)?;
    tracing::info!(city_id, id = point.id, name = %point.name, "Created point of interest");

    let location = format!("/api/cities/{city_id}/pointsOfInterest/{}", point.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PointOfInterestDto::from(point)),
    ))
}

// ============================================================================
// Update
// ============================================================================

/// Replace a point of interest (PUT /api/cities/{city_id}/pointsOfInterest/{id}).
///
/// Omitted fields are cleared.
pub async fn update_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i64, i64)>,
    body: Result<Json<PointOfInterestForUpdate>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(payload) = body.map_err(bad_body)?;
    payload.validate()?;

    let mut uow = state.unit_of_work();
    let mut point = find_point_of_interest(&uow, city_id, id).await?;

    payload.apply_to(&mut point);
    uow.update_point_of_interest(point);
    save(&mut uow).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Partially update a point of interest
/// (PATCH /api/cities/{city_id}/pointsOfInterest/{id}).
///
/// The patch is applied to a copy and validated before anything is staged.
pub async fn patch_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i64, i64)>,
    body: Result<Json<PatchDocument>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(patch) = body.map_err(bad_body)?;

    let mut uow = state.unit_of_work();
    let mut point = find_point_of_interest(&uow, city_id, id).await?;

    let patched = patch.apply_to(&PointOfInterestForUpdate::from(&point))?;
    patched.validate()?;

    patched.apply_to(&mut point);
    uow.update_point_of_interest(point);
    save(&mut uow).await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Delete
// ============================================================================

/// Delete a point of interest (DELETE /api/cities/{city_id}/pointsOfInterest/{id}).
pub async fn delete_point_of_interest(
    State(state): State<AppState>,
    Path((city_id, id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let mut uow = state.unit_of_work();
    let point = find_point_of_interest(&uow, city_id, id).await?;

    uow.delete_point_of_interest(&point);
    save(&mut uow).await?;

    state.mail.send(
        "Point of interest deleted.",
        &format!(
            "Point of interest {} with id {} was deleted.",
            point.name, point.id
        ),
    );

    Ok(StatusCode::NO_CONTENT)
}
