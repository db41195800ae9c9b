use crate::error::DbError;
use configuration::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

/// Establishes a connection pool to the SQLite database.
///
/// File databases are created if they do not exist yet. An in-memory URL is
/// pinned to a single connection that is never recycled, since every SQLite
/// connection to `:memory:` opens its own private database.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| DbError::ConnectionConfigError(format!("{}: {}", config.url, e)))?
        .create_if_missing(true);

    let acquire_timeout = Duration::from_secs(config.acquire_timeout_secs);
    let pool_options = if is_in_memory(&config.url) {
        in_memory_pool_options()
    } else {
        SqlitePoolOptions::new().max_connections(config.max_connections)
    };

    let pool = pool_options
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;

    tracing::info!(url = %config.url, "Connected to the student database.");
    Ok(pool)
}

/// Opens a fresh, fully migrated in-memory database. Used by tests across the workspace.
pub async fn connect_in_memory() -> Result<SqlitePool, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = in_memory_pool_options().connect_with(options).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Applies the embedded migrations so the schema is up-to-date at startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn in_memory_pool_options() -> SqlitePoolOptions {
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:roster?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://students.db"));
    }

    #[tokio::test]
    async fn connect_creates_missing_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.db");

        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            max_connections: 2,
            acquire_timeout_secs: 5,
        };
        let pool = connect(&config).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }

    #[tokio::test]
    async fn in_memory_database_persists_across_acquires() {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("INSERT INTO students (name, roll_no, email, age) VALUES ('Ann', 'R1', 'ann@x.com', 20)")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
