use serde::{Deserialize, Serialize};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Authentication credentials were not provided or are invalid")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::NotFound(format!("{entity} {id} does not exist"))
    }

    pub fn user_message(&self) -> &str {
        match self {
            Self::NotFound(msg) | Self::Conflict(msg) | Self::Validation(msg) => msg,
            Self::Unauthorized => "Authentication credentials were not provided or are invalid",
            Self::Database(_) | Self::Internal(_) => "Something went wrong on our side",
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Internal(_))
    }
}

#[cfg(feature = "db")]
mod db_impl {
    use super::AppError;
    use sea_orm::{DbErr, SqlErr};

    /// Driver text stays in the logs; clients only ever see the fixed wording.
    impl From<DbErr> for AppError {
        fn from(err: DbErr) -> Self {
            match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    tracing::debug!(%detail, "Unique constraint violation");
                    return AppError::Conflict("This record already exists".to_string());
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    tracing::debug!(%detail, "Foreign key constraint violation");
                    return AppError::NotFound("A referenced record does not exist".to_string());
                }
                _ => {}
            }
            match err {
                DbErr::RecordNotFound(detail) => {
                    tracing::debug!(%detail, "Record not found");
                    AppError::NotFound("The requested record does not exist".to_string())
                }
                other => AppError::Database(other.to_string()),
            }
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use super::AppError;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::Json;

    #[derive(serde::Serialize)]
    struct ErrorResponse<'a> {
        reason: &'a str,
    }

    impl AppError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                AppError::NotFound(_) => StatusCode::NOT_FOUND,
                AppError::Conflict(_) => StatusCode::CONFLICT,
                AppError::Validation(_) => StatusCode::BAD_REQUEST,
                AppError::Unauthorized => StatusCode::UNAUTHORIZED,
                AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            let status = self.status_code();
            if self.is_server_error() {
                tracing::error!(error = %self, "request failed");
            } else {
                tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
            }
            (status, Json(ErrorResponse { reason: self.user_message() })).into_response()
        }
    }
}
