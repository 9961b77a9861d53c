//! Country handlers: one service call per route, result mapped to a status code.

use crate::error::AppError;
use crate::extractors::{JsonBody, PathParam};
use crate::model::Country;
use crate::response::found;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// GET /countries
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Country>>, AppError> {
    Ok(Json(state.countries.all_countries().await?))
}

/// GET /countries/:id
pub async fn read(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Country>, AppError> {
    let country = state.countries.country_by_id(id).await?;
    found(country, || format!("country {}", id))
}

/// GET /countries/name/:name
pub async fn read_by_name(
    State(state): State<AppState>,
    PathParam(name): PathParam<String>,
) -> Result<Json<Country>, AppError> {
    let country = state.countries.country_by_name(&name).await?;
    found(country, || format!("country named '{}'", name))
}

/// GET /countries/code/:iso_code
pub async fn read_by_code(
    State(state): State<AppState>,
    PathParam(iso_code): PathParam<String>,
) -> Result<Json<Country>, AppError> {
    let country = state.countries.country_by_iso_code(&iso_code).await?;
    found(country, || format!("country with iso code '{}'", iso_code))
}

/// GET /countries/continent/:continent
pub async fn list_by_continent(
    State(state): State<AppState>,
    PathParam(continent): PathParam<String>,
) -> Result<Json<Vec<Country>>, AppError> {
    Ok(Json(state.countries.countries_by_continent(&continent).await?))
}

/// GET /countries/population/min/:min
pub async fn list_population_above(
    State(state): State<AppState>,
    PathParam(min): PathParam<i64>,
) -> Result<Json<Vec<Country>>, AppError> {
    Ok(Json(state.countries.countries_with_population_above(min).await?))
}

/// GET /countries/area/min/:min
pub async fn list_area_above(
    State(state): State<AppState>,
    PathParam(min): PathParam<f64>,
) -> Result<Json<Vec<Country>>, AppError> {
    Ok(Json(state.countries.countries_with_area_above(min).await?))
}

/// GET /countries/continents
pub async fn continents(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.countries.all_continents().await?))
}

/// GET /countries/count
pub async fn count(State(state): State<AppState>) -> Result<Json<i64>, AppError> {
    Ok(Json(state.countries.total_count().await?))
}

/// POST /countries. Any `id` in the body is ignored; every store failure is a 400.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(mut country): JsonBody<Country>,
) -> Result<impl IntoResponse, AppError> {
    country.id = None;
    match state.countries.save_country(&country).await {
        Ok(saved) => Ok((StatusCode::CREATED, Json(saved))),
        Err(e) => {
            tracing::warn!(error = %e, name = %country.name, iso_code = %country.iso_code, "create failed");
            Err(AppError::BadRequest("country could not be saved".into()))
        }
    }
}

/// PUT /countries/:id. Replaces every field; the id always comes from the path.
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    JsonBody(mut country): JsonBody<Country>,
) -> Result<Json<Country>, AppError> {
    if !state.countries.exists_by_id(id).await? {
        return Err(AppError::NotFound(format!("country {}", id)));
    }
    country.id = Some(id);
    Ok(Json(state.countries.save_country(&country).await?))
}

/// DELETE /countries/:id
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, AppError> {
    if !state.countries.exists_by_id(id).await? {
        return Err(AppError::NotFound(format!("country {}", id)));
    }
    // Gone between the check and the delete: another request removed it.
    if !state.countries.delete_country(id).await? {
        return Err(AppError::NotFound(format!("country {}", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
