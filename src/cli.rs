//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for collateral-insights using clap's derive macros.

use clap::{Parser, Subcommand, ValueEnum};

/// Collateral Insights - campaign engagement reporting service
#[derive(Parser)]
#[command(name = "collateral-insights")]
#[command(version)]
#[command(about = "Collateral engagement reporting service", long_about = None)]
pub struct Cli {
    /// Config file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Print the campaign dashboard summary as JSON
    Summary {
        /// Campaign identifier
        #[arg(long)]
        campaign: String,

        /// Window start (RFC3339 or YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Window end (RFC3339 or YYYY-MM-DD, a bare day covers the whole day)
        #[arg(long)]
        end: Option<String>,
    },

    /// Export a report as CSV
    Export {
        /// Campaign identifier
        #[arg(long)]
        campaign: String,

        /// Report kind
        #[arg(long, value_enum)]
        kind: ExportKind,

        /// Window start (tiers / recruitment only)
        #[arg(long)]
        start: Option<String>,

        /// Window end (tiers / recruitment only)
        #[arg(long)]
        end: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long)]
        out: Option<String>,
    },

    /// Apply pending database migrations and exit
    Migrate,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// CSV report kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Tiers,
    Collaterals,
    Recruitment,
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["collateral-insights"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_export_parses_kind() {
        let cli = Cli::try_parse_from([
            "collateral-insights",
            "export",
            "--campaign",
            "C1",
            "--kind",
            "recruitment",
            "--out",
            "r.csv",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Export {
                campaign,
                kind,
                out,
                ..
            }) => {
                assert_eq!(campaign, "C1");
                assert_eq!(kind, ExportKind::Recruitment);
                assert_eq!(out.as_deref(), Some("r.csv"));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_summary_requires_campaign() {
        assert!(Cli::try_parse_from(["collateral-insights", "summary"]).is_err());
    }
}
