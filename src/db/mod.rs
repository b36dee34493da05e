pub mod models;
pub mod repository;

use sqlx::{Pool, Sqlite, SqlitePool};
use anyhow::Result;

pub async fn init_pool(database_url: &str) -> Result<Pool<Sqlite>> {
    let pool = SqlitePool::connect(database_url).await?;
    migrate(&pool).await?;

    Ok(pool)
}

pub async fn migrate(pool: &Pool<Sqlite>) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
pub async fn test_pool() -> Pool<Sqlite> {
    // A single connection, every new one would open a fresh in-memory database
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    pool
}
