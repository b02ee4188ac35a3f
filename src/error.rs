//! Application error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use model::StoreError;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    /// Requested row is absent
    #[error("{0}")]
    NotFound(String),

    /// Request could not be interpreted
    #[error("{0}")]
    BadRequest(String),

    /// Generic application exception with an explicit status code
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Api { status, .. } => *status,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = if status.is_server_error() {
            error!("Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            warn!("Request rejected with {}: {}", status, self);
            self.to_string()
        };
        (status, Json(ErrorResponse { msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = AppError::from(StoreError::NotFound {
            entity: "Planet",
            id: 3,
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Planet not found");
    }

    #[test]
    fn test_api_error_keeps_status() {
        let err = AppError::Api {
            status: StatusCode::CONFLICT,
            message: "Already there".to_string(),
        };
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = AppError::from(StoreError::from(sea_orm::DbErr::Custom(
            "disk full".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::from(StoreError::InvalidFavorite(1)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
