use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use stockroom_core::AppError;
use stockroom_infrastructure::PostgresSessionTokenRepository;
use tracing::info;

pub async fn connect_and_migrate(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}

pub async fn purge_expired_sessions(pool: &PgPool) -> Result<(), AppError> {
    let purged = PostgresSessionTokenRepository::new(pool.clone())
        .purge_expired()
        .await?;

    if purged > 0 {
        info!(purged, "removed expired session tokens");
    }

    Ok(())
}
