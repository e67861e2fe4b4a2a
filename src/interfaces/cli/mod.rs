//! CLI interface module
//!
//! This module provides the one-shot report commands of collateral-insights.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::runtime::lifetime::startup;
use commands::{config_generate, export_report, print_summary, run_migrations};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::InsightsError> for CliError {
    fn from(err: crate::errors::InsightsError) -> Self {
        use crate::errors::InsightsError;
        match err {
            InsightsError::InvalidDateRange(_) | InsightsError::Validation(_) => {
                CliError::ParseError(err.to_string())
            }
            InsightsError::DatabaseConfig(_)
            | InsightsError::StoreUnavailable(_)
            | InsightsError::QueryFailed(_) => CliError::StorageError(err.to_string()),
            _ => CliError::CommandError(err.to_string()),
        }
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // Generate 不需要数据库连接
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    if let Commands::Migrate = cmd {
        return run_migrations().await;
    }

    let aggregator = startup::build_aggregator()
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;

    match cmd {
        Commands::Summary {
            campaign,
            start,
            end,
        } => print_summary(&aggregator, &campaign, start, end).await,

        Commands::Export {
            campaign,
            kind,
            start,
            end,
            out,
        } => export_report(&aggregator, &campaign, kind, start, end, out).await,

        Commands::Serve => unreachable!("serve handled in main"),
        Commands::Migrate => unreachable!("handled above"),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InsightsError;

    #[test]
    fn test_insights_error_maps_to_cli_error() {
        let err: CliError = InsightsError::invalid_date_range("start after end").into();
        assert!(matches!(err, CliError::ParseError(_)));

        let err: CliError = InsightsError::store_unavailable("down").into();
        assert!(matches!(err, CliError::StorageError(_)));

        let err: CliError = InsightsError::file_operation("disk full").into();
        assert!(matches!(err, CliError::CommandError(_)));
        assert!(err.format_simple().starts_with("Command error:"));
    }
}
