use anyhow::Result;
use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use super::traits::KeyValueStore;

// The database URL used when no override is configured
pub const DATABASE_URL: &str = "sqlite:creature_comfort.db";

/// DbConnection persists storage slots in a SQLite key/value table
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_values (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for DbConnection {
    async fn get_value(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM key_values WHERE key = ?")
            .bind(key)
            .fetch_optional(&*self.pool)
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO key_values (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn delete_value(&self, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM key_values WHERE key = ?")
            .bind(key)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT key FROM key_values ORDER BY key")
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(|row| row.get("key")).collect())
    }
}
