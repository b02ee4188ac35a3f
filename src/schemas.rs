//! Shared application state and the JSON shapes the API emits.

use model::entities::{character, planet, user};
use model::store::FavoriteWithTarget;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// User that requests without an identity header act as
    pub default_user_id: i32,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub msg: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub msg: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Public view of a user. The stored credential is never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanetResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub population: Option<i64>,
}

impl From<planet::Model> for PlanetResponse {
    fn from(model: planet::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            population: model.population,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CharacterResponse {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub description: Option<String>,
}

impl From<character::Model> for CharacterResponse {
    fn from(model: character::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            gender: model.gender,
            description: model.description,
        }
    }
}

/// A favorite with its target embedded in full.
///
/// Exactly one of `planet` and `character` is non-null; the other is emitted
/// as an explicit `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FavoriteResponse {
    pub id: i32,
    pub planet: Option<PlanetResponse>,
    pub character: Option<CharacterResponse>,
}

impl From<FavoriteWithTarget> for FavoriteResponse {
    fn from(value: FavoriteWithTarget) -> Self {
        Self {
            id: value.favorite.id,
            planet: value.planet.map(PlanetResponse::from),
            character: value.character.map(CharacterResponse::from),
        }
    }
}

/// Body returned when a favorite is created
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FavoriteCreatedResponse {
    pub favorite: FavoriteResponse,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::get_users,
        crate::handlers::people::get_people,
        crate::handlers::people::get_person,
        crate::handlers::planets::get_planets,
        crate::handlers::planets::get_planet,
        crate::handlers::favorites::add_favorite_planet,
        crate::handlers::favorites::add_favorite_character,
        crate::handlers::favorites::get_favorites,
        crate::handlers::favorites::delete_favorite_character,
        crate::handlers::favorites::delete_favorite_planet,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            HealthResponse,
            UserResponse,
            PlanetResponse,
            CharacterResponse,
            FavoriteResponse,
            FavoriteCreatedResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "people", description = "Character catalog endpoints"),
        (name = "planets", description = "Planet catalog endpoints"),
        (name = "favorites", description = "Per-user favorite endpoints"),
    ),
    info(
        title = "Holocron API",
        description = "Catalog of characters and planets with per-user favorites",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
