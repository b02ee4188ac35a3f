use axum::{extract::State, response::Json};
use model::entities::character;
use model::store;
use tracing::{debug, instrument, trace, warn};

use crate::error::AppError;
use crate::extractors::IdPath;
use crate::schemas::{AppState, CharacterResponse, ErrorResponse};

/// List every character
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    responses(
        (status = 200, description = "Characters retrieved successfully", body = Vec<CharacterResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_people(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharacterResponse>>, AppError> {
    trace!("Entering get_people function");

    let characters = store::list_all::<character::Entity, _>(&state.db).await?;
    debug!("Retrieved {} characters from database", characters.len());

    Ok(Json(characters.into_iter().map(CharacterResponse::from).collect()))
}

/// Get a single character by ID
#[utoipa::path(
    get,
    path = "/people/{people_id}",
    tag = "people",
    params(
        ("people_id" = i32, Path, description = "Character ID"),
    ),
    responses(
        (status = 200, description = "Character retrieved successfully", body = CharacterResponse),
        (status = 404, description = "Character not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_person(
    IdPath(people_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<CharacterResponse>, AppError> {
    trace!("Entering get_person function for people_id: {}", people_id);

    match store::get_by_id::<character::Entity, _>(&state.db, people_id).await? {
        Some(character) => Ok(Json(CharacterResponse::from(character))),
        None => {
            warn!("Character with ID {} not found", people_id);
            Err(AppError::NotFound("Character not found".to_string()))
        }
    }
}
