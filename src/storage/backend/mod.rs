//! SeaORM storage backend
//!
//! Read-only access to the campaign roster and the collateral transaction
//! log over SQLite, MySQL/MariaDB or PostgreSQL.

mod connection;
mod events;
mod query;
mod roster;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{InsightsError, Result};
use crate::storage::traits::EngagementStore;

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
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
        Err(InsightsError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    /// 连接数据库并执行迁移
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(InsightsError::database_config("DATABASE_URL 未设置"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 获取数据库连接（测试数据写入、迁移命令使用）
    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl EngagementStore for SeaOrmStorage {
    fn backend_name(&self) -> &str {
        &self.backend_name
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_backend_from_url() {
        assert_eq!(infer_backend_from_url("sqlite://a.db?mode=rwc").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("reports.sqlite").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("mariadb://u:p@h/db").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("postgresql://h/db").unwrap(), "postgres");
        assert!(matches!(
            infer_backend_from_url("redis://localhost"),
            Err(InsightsError::DatabaseConfig(_))
        ));
    }
}
