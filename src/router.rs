use crate::handlers::{
    favorites::{
        add_favorite_character, add_favorite_planet, delete_favorite_character,
        delete_favorite_planet, get_favorites,
    },
    health::health_check,
    people::{get_people, get_person},
    planets::{get_planet, get_planets},
    users::get_users,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::{Layer, ServiceBuilder};
use tower_http::{normalize_path::NormalizePathLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware.
///
/// Trailing slashes are trimmed before the API routes are matched, so
/// `/planets/` and `/planets` reach the same handler. Swagger UI sits outside
/// that layer since it redirects `/swagger-ui` to `/swagger-ui/`.
pub fn create_router(state: AppState) -> Router {
    let api = NormalizePathLayer::trim_trailing_slash().layer(api_routes(state));
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(api)
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Users
        .route("/user", get(get_users))
        .route("/user/favorites", get(get_favorites))
        // Catalog
        .route("/people", get(get_people))
        .route("/people/:people_id", get(get_person))
        .route("/planets", get(get_planets))
        .route("/planets/:planet_id", get(get_planet))
        // Favorites; DELETE takes the favorite id despite the path name
        .route(
            "/favorite/planet/:id",
            post(add_favorite_planet).delete(delete_favorite_planet),
        )
        .route(
            "/favorite/character/:id",
            post(add_favorite_character).delete(delete_favorite_character),
        )
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
