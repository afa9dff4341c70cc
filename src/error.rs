use thiserror::Error;

/// Failures surfaced by the core operations.
///
/// The presentation layer picks the user-facing behavior from the variant:
/// `FormNotFound` becomes a not-found page or a redirect, `MalformedInput`
/// rejects the request outright. `Storage` surfaces a generic failure and is
/// never retried automatically.
#[derive(Debug, Error)]
pub enum Error {
    #[error("form {0} not found")]
    FormNotFound(i64),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("storage unavailable: {0}")]
    Storage(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // A unique-constraint hit is the store rejecting bad input, not
            // the store being unavailable.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::MalformedInput(format!("unique constraint violated: {db}"))
            }
            _ => Error::Storage(err),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for Error {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Error::Storage(sqlx::Error::Migrate(Box::new(err)))
    }
}
