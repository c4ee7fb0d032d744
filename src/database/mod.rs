//! SQLite persistence layer.
//!
//! `Database` wraps a connection pool and runs versioned migrations on
//! startup. Operations are exposed as extension traits so call sites
//! only import the operation family they need.

mod cards;
mod migrations;
mod models;

pub use cards::{CardReadOps, CardWriteOps};
pub use models::CardRecord;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

/// Handle to the card store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database under `data_dir` and bring the
    /// schema up to date.
    pub async fn new(data_dir: &Path) -> Result<Self, sqlx::Error> {
        std::fs::create_dir_all(data_dir).map_err(|e| sqlx::Error::Io(e))?;
        let db_path = data_dir.join("cards.db");

        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        migrations::run_migrations(&pool).await?;

        info!("Database ready at {}", db_path.display());
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
