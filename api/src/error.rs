use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use sports_hub_http_errors::{ErrorResponseData, FieldMessages};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database Error: {0}")]
    DbErr(diesel::result::Error),

    #[error("Database Pool Error: {0}")]
    DbPool(#[from] deadpool_diesel::PoolError),

    #[error("Database Error: {0}")]
    DeadpoolInteract(String),

    #[error("Server error: {0}")]
    ServerError(#[from] hyper::Error),

    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Auth error: {0}")]
    AuthError(#[from] sports_hub_auth::Error),

    #[error("Not found")]
    NotFound,

    #[error("Unknown {0}")]
    ObjectNotFound(&'static str),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Invalid input")]
    Validation(FieldMessages),

    #[error("Template error: {0}")]
    Template(#[from] liquid::Error),

    #[error(transparent)]
    Generic(#[from] anyhow::Error),
}

impl Error {
    fn error_kind(&self) -> &'static str {
        match self {
            Error::DbErr(_) => "db",
            Error::DbPool(_) => "db_pool",
            Error::DeadpoolInteract(_) => "db",
            Error::ServerError(_) => "internal_server_error",
            Error::Unauthenticated => "authn",
            Error::AuthError(_) => "authn",
            Error::NotFound => "not_found",
            Error::ObjectNotFound(_) => "not_found",
            Error::Conflict(_) => "conflict",
            Error::Validation(_) => "validation",
            Error::Template(_) => "template",
            Error::Generic(_) => "internal_server_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::ObjectNotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Unauthenticated => StatusCode::UNAUTHORIZED,
            Error::AuthError(sports_hub_auth::Error::PasswordHasherError(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_tuple(&self) -> (StatusCode, ErrorResponseData) {
        let data = ErrorResponseData::new(self.error_kind(), self.to_string());
        let data = match self {
            Error::Validation(fields) => data.with_fields(fields.clone()),
            _ => data,
        };

        (self.status(), data)
    }
}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => Error::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Error::Conflict(
                    info.constraint_name()
                        .unwrap_or_else(|| info.message())
                        .to_string(),
                )
            }
            // A reference to a row that doesn't exist.
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Error::NotFound
            }
            e => Error::DbErr(e),
        }
    }
}

impl From<deadpool_diesel::InteractError> for Error {
    fn from(e: deadpool_diesel::InteractError) -> Self {
        match e {
            deadpool_diesel::InteractError::Panic(p) => std::panic::resume_unwind(p),
            deadpool_diesel::InteractError::Aborted => {
                Error::DeadpoolInteract("connection task aborted".to_string())
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (code, json) = self.response_tuple();
        (code, Json(json)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

    use super::*;

    struct Info(&'static str);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn unique_violation_is_conflict() {
        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info("users_username_key")),
        );
        let err = Error::from(e);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "Already exists: users_username_key");
    }

    #[test]
    fn missing_row_is_not_found() {
        let err = Error::from(diesel::result::Error::NotFound);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let e = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new(Info("matches_team1_id_fkey")),
        );
        assert_eq!(Error::from(e).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_includes_fields() {
        let mut fields = FieldMessages::new();
        fields.insert("title".to_string(), vec!["This field is required.".to_string()]);
        let (status, data) = Error::Validation(fields).response_tuple();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["error"]["kind"], "validation");
        assert_eq!(value["error"]["fields"]["title"][0], "This field is required.");
    }
}
