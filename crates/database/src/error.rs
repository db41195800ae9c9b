use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Write rejected by a uniqueness constraint: {0}")]
    ConstraintViolation(String),

    #[error("The requested data was not found in the database.")]
    NotFound,
}

impl DbError {
    /// Converts an error raised while writing, separating out uniqueness rejections.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::ConstraintViolation(db_err.message().to_string())
            }
            _ => DbError::Storage(err),
        }
    }
}
