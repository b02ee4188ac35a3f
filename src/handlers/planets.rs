use axum::{extract::State, response::Json};
use model::entities::planet;
use model::store;
use tracing::{debug, instrument, trace, warn};

use crate::error::AppError;
use crate::extractors::IdPath;
use crate::schemas::{AppState, ErrorResponse, PlanetResponse};

/// List every planet
#[utoipa::path(
    get,
    path = "/planets",
    tag = "planets",
    responses(
        (status = 200, description = "Planets retrieved successfully", body = Vec<PlanetResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_planets(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlanetResponse>>, AppError> {
    trace!("Entering get_planets function");

    let planets = store::list_all::<planet::Entity, _>(&state.db).await?;
    debug!("Retrieved {} planets from database", planets.len());

    Ok(Json(planets.into_iter().map(PlanetResponse::from).collect()))
}

/// Get a single planet by ID
#[utoipa::path(
    get,
    path = "/planets/{planet_id}",
    tag = "planets",
    params(
        ("planet_id" = i32, Path, description = "Planet ID"),
    ),
    responses(
        (status = 200, description = "Planet retrieved successfully", body = PlanetResponse),
        (status = 404, description = "Planet not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_planet(
    IdPath(planet_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<PlanetResponse>, AppError> {
    trace!("Entering get_planet function for planet_id: {}", planet_id);

    match store::get_by_id::<planet::Entity, _>(&state.db, planet_id).await? {
        Some(planet) => Ok(Json(PlanetResponse::from(planet))),
        None => {
            warn!("Planet with ID {} not found", planet_id);
            Err(AppError::NotFound("Planet not found".to_string()))
        }
    }
}
