use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Owned handle to the PostgreSQL connection pool.
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Open the pool against `DATABASE_URL`, selecting `DATABASE_NAME`, and
    /// verify it answers before returning.
    ///
    /// # Errors
    /// Malformed URL, unreachable server, or failed ping
    pub async fn connect(config: &Config) -> Result<Self, sqlx::Error> {
        let options =
            PgConnectOptions::from_str(&config.database_url)?.database(&config.database_name);

        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_with(options)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        tracing::info!(
            max_connections = MAX_CONNECTIONS,
            database = %config.database_name,
            "Database connection pool created"
        );

        Ok(Self { pool })
    }

    /// Apply pending schema migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");
        Ok(())
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connection pool closed");
    }
}
