use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::log::LevelFilter;

/// PRAGMAs applied to every pool. `serve` reads the `weeks` table through a read-only
/// pool while `week add` may be writing to the same file.
async fn configure_pragmas(pool: &SqlitePool) -> Result<()> {
    for pragma in [
        "PRAGMA journal_mode = WAL",
        "PRAGMA busy_timeout = 5000",
        "PRAGMA synchronous = NORMAL",
        "PRAGMA foreign_keys = true",
        "PRAGMA temp_store = memory",
    ] {
        sqlx::query(pragma).execute(pool).await?;
    }

    Ok(())
}

async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options.log_statements(LevelFilter::Debug))
        .await?;

    configure_pragmas(&pool).await?;

    Ok(pool)
}

/// Pool backing week lookups while serving navigation. The schedule must already exist.
pub async fn create_read_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.read_only(true);
    let pool = connect(options, max_connections).await?;

    tracing::info!(database_url, max_connections, "Opened schedule read-only");

    Ok(pool)
}

/// Pool for `migrate` and `week add`/`week list`; creates the schedule file on first use.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = connect(options, max_connections).await?;

    tracing::info!(database_url, max_connections, "Opened schedule");

    Ok(pool)
}
