//! Apply database migrations

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::storage::{EngagementStore, StorageFactory};

/// 连接数据库时会执行全部待处理迁移
pub async fn run_migrations() -> Result<(), CliError> {
    let storage = StorageFactory::create().await?;
    println!(
        "{} {}",
        "Migrations applied on".green(),
        storage.backend_name().to_uppercase().blue()
    );
    Ok(())
}
