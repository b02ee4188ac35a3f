//! Request extractors shared by the handlers.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::trace;

use crate::error::AppError;
use crate::schemas::AppState;

/// Header carrying the caller identity, set by whatever authenticates requests
/// in front of this service.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Integer id taken from the last path segment.
///
/// Rejections are rendered through [`AppError`] so clients always get a JSON
/// body.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i32>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(IdPath(id)),
            Err(rejection) => Err(AppError::Api {
                status: rejection.status(),
                message: rejection.body_text(),
            }),
        }
    }
}

/// Identity of the caller.
///
/// Taken from the `X-User-Id` header; requests without it act as the
/// configured default user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i32);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            trace!("No {} header, using default user {}", USER_ID_HEADER, state.default_user_id);
            return Ok(CurrentUser(state.default_user_id));
        };

        value
            .to_str()
            .ok()
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .map(CurrentUser)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid {} header", USER_ID_HEADER)))
    }
}
