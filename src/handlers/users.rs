use axum::{extract::State, response::Json};
use model::entities::user;
use model::store;
use tracing::{debug, instrument, trace};

use crate::error::AppError;
use crate::schemas::{AppState, ErrorResponse, UserResponse};

/// Get all users
#[utoipa::path(
    get,
    path = "/user",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    trace!("Entering get_users function");

    let users = store::list_all::<user::Entity, _>(&state.db).await?;
    debug!("Retrieved {} users from database", users.len());

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
