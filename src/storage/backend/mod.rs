//! SeaORM storage backend
//!
//! Combs and honey live in two tables managed by the `migration` crate.
//! SQLite, MySQL/MariaDB and PostgreSQL are supported; the backend is
//! picked from the database URL.

mod connection;
mod converters;
mod mutations;
mod query;
pub mod retry;

use sea_orm::{DatabaseConnection, Statement};
use tracing::{Span, debug_span, info, warn};

use crate::config::DatabaseConfig;
use crate::errors::{CombError, Result};
use crate::storage::models::StorageConfig;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{model_to_comb, model_to_honey};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CombError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage for combs and honey
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(
        database_url: &str,
        backend_name: &str,
        config: &DatabaseConfig,
    ) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CombError::database_config("database_url is not set"));
        }

        let retry_config = retry::RetryConfig::from(config);

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name, config).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
            retry_config,
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn get_backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }

    /// 获取数据库连接（测试或维护脚本直接访问数据库时使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| CombError::database_connection(format!("Database ping failed: {}", e)))
    }

    /// Close the pool; further calls on this storage fail
    pub async fn close(&self) -> Result<()> {
        self.db
            .close_by_ref()
            .await
            .map_err(|e| CombError::database_connection(format!("Failed to close database: {}", e)))?;
        info!("{} storage closed", self.backend_name.to_uppercase());
        Ok(())
    }

    /// Child span wrapped around one persistence call, carrying the rendered SQL
    fn db_span(&self, operation: &'static str, statement: &Statement) -> Span {
        debug_span!(
            "db-call",
            db.system = %self.backend_name,
            db.operation = operation,
            db.sql = %statement,
        )
    }
}
