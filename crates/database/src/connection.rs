use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::str::FromStr;

/// Establishes a connection pool to the PostgreSQL database.
///
/// The pool is created once at startup and handed to every repository; its
/// size and connection lifetime come from `DatabaseSettings`.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, DbError> {
    let ssl_mode = PgSslMode::from_str(&settings.sslmode)?;
    let options = PgConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .database(&settings.name)
        .username(&settings.user)
        .password(&settings.password)
        .ssl_mode(ssl_mode);

    tracing::info!(dsn = %settings.connection_string(), "Connecting to PostgreSQL.");

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .max_lifetime(settings.max_lifetime())
        .acquire_timeout(settings.acquire_timeout())
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations.
///
/// Run at process start so the schema is always up to date before the server
/// accepts requests.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}
