//! Favorite handlers.
//!
//! The DELETE routes are keyed by the favorite's own id even though they live
//! under `/favorite/planet/` and `/favorite/character/`; existing clients
//! depend on that, so either route removes any favorite with the given id.

use axum::{extract::State, response::Json};
use model::entities::favorite::FavoriteTarget;
use model::store;
use tracing::{debug, info, instrument, trace, warn};

use crate::error::AppError;
use crate::extractors::{CurrentUser, IdPath};
use crate::schemas::{
    AppState, ErrorResponse, FavoriteCreatedResponse, FavoriteResponse, MessageResponse,
};

async fn add_favorite(
    state: &AppState,
    user: CurrentUser,
    target: FavoriteTarget,
) -> Result<Json<FavoriteCreatedResponse>, AppError> {
    let created = store::create_favorite(&state.db, user.0, target).await?;
    info!(
        "User {} added favorite {} for {} {}",
        user.0,
        created.favorite.id,
        target.kind(),
        target.id()
    );
    Ok(Json(FavoriteCreatedResponse {
        favorite: FavoriteResponse::from(created),
    }))
}

async fn remove_favorite(
    state: &AppState,
    favorite_id: i32,
    deleted_msg: &str,
) -> Result<Json<MessageResponse>, AppError> {
    if store::delete_favorite(&state.db, favorite_id).await? {
        info!("Favorite {} deleted", favorite_id);
        Ok(Json(MessageResponse {
            msg: deleted_msg.to_string(),
        }))
    } else {
        warn!("Favorite {} not found for deletion", favorite_id);
        Err(AppError::NotFound("Favorite not found".to_string()))
    }
}

/// Add a planet to the caller's favorites
#[utoipa::path(
    post,
    path = "/favorite/planet/{planet_id}",
    tag = "favorites",
    params(
        ("planet_id" = i32, Path, description = "Planet ID"),
        ("X-User-Id" = Option<i32>, Header, description = "Caller identity, defaults to the configured user"),
    ),
    responses(
        (status = 200, description = "Favorite created", body = FavoriteCreatedResponse),
        (status = 404, description = "Planet or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn add_favorite_planet(
    IdPath(planet_id): IdPath,
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<FavoriteCreatedResponse>, AppError> {
    trace!("Entering add_favorite_planet function for planet_id: {}", planet_id);
    add_favorite(&state, user, FavoriteTarget::Planet(planet_id)).await
}

/// Add a character to the caller's favorites
#[utoipa::path(
    post,
    path = "/favorite/character/{character_id}",
    tag = "favorites",
    params(
        ("character_id" = i32, Path, description = "Character ID"),
        ("X-User-Id" = Option<i32>, Header, description = "Caller identity, defaults to the configured user"),
    ),
    responses(
        (status = 200, description = "Favorite created", body = FavoriteCreatedResponse),
        (status = 404, description = "Character or user not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn add_favorite_character(
    IdPath(character_id): IdPath,
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<FavoriteCreatedResponse>, AppError> {
    trace!("Entering add_favorite_character function for character_id: {}", character_id);
    add_favorite(&state, user, FavoriteTarget::Character(character_id)).await
}

/// List every favorite with its planet or character embedded
#[utoipa::path(
    get,
    path = "/user/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorites retrieved successfully", body = Vec<FavoriteResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_favorites(
    State(state): State<AppState>,
) -> Result<Json<Vec<FavoriteResponse>>, AppError> {
    trace!("Entering get_favorites function");

    let favorites = store::list_favorites(&state.db).await?;
    debug!("Retrieved {} favorites from database", favorites.len());

    Ok(Json(favorites.into_iter().map(FavoriteResponse::from).collect()))
}

/// Delete a favorite by its own ID
#[utoipa::path(
    delete,
    path = "/favorite/character/{character_id}",
    tag = "favorites",
    params(
        ("character_id" = i32, Path, description = "ID of the favorite to delete"),
    ),
    responses(
        (status = 200, description = "Favorite deleted", body = MessageResponse),
        (status = 404, description = "Favorite not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_favorite_character(
    IdPath(favorite_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    trace!("Entering delete_favorite_character function for favorite_id: {}", favorite_id);
    remove_favorite(&state, favorite_id, "Favorite character deleted").await
}

/// Delete a favorite by its own ID
#[utoipa::path(
    delete,
    path = "/favorite/planet/{planet_id}",
    tag = "favorites",
    params(
        ("planet_id" = i32, Path, description = "ID of the favorite to delete"),
    ),
    responses(
        (status = 200, description = "Favorite deleted", body = MessageResponse),
        (status = 404, description = "Favorite not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_favorite_planet(
    IdPath(favorite_id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    trace!("Entering delete_favorite_planet function for favorite_id: {}", favorite_id);
    remove_favorite(&state, favorite_id, "Favorite planet deleted").await
}
