//! Export a report as CSV

use std::io::Write;

use colored::Colorize;

use crate::analytics::{EngagementAggregator, parse_window};
use crate::cli::ExportKind;
use crate::interfaces::cli::CliError;
use crate::storage::EngagementMode;
use crate::utils::csv_handler;

pub async fn export_report(
    aggregator: &EngagementAggregator,
    campaign_id: &str,
    kind: ExportKind,
    start: Option<String>,
    end: Option<String>,
    out: Option<String>,
) -> Result<(), CliError> {
    let window = parse_window(start.as_deref(), end.as_deref())?;
    let limit = crate::config::get_config().reports.export_row_limit;

    let content = match kind {
        ExportKind::Tiers => {
            let reference = window.map(|w| w.end).unwrap_or_else(chrono::Utc::now);
            let (received, viewed, trends) = tokio::try_join!(
                aggregator.collateral_tier_distribution(
                    campaign_id,
                    window,
                    EngagementMode::Received
                ),
                aggregator.collateral_tier_distribution(
                    campaign_id,
                    window,
                    EngagementMode::Viewed
                ),
                aggregator.summary_trends(campaign_id, reference),
            )?;
            csv_handler::tiers_to_csv(campaign_id, &received, &viewed, &trends)?
        }
        ExportKind::Collaterals => {
            let details = aggregator.collateral_details(campaign_id).await?;
            csv_handler::collaterals_to_csv(&details, limit)?
        }
        ExportKind::Recruitment => {
            let table = aggregator
                .field_rep_recruitment_table(campaign_id, window)
                .await?;
            csv_handler::recruitment_to_csv(&table, limit)?
        }
    };

    match out {
        Some(path) => {
            csv_handler::write_report(&path, &content)?;
            println!(
                "{} {}",
                "Report exported to".green(),
                path.blue()
            );
        }
        None => {
            std::io::stdout()
                .write_all(&content)
                .map_err(|e| CliError::CommandError(e.to_string()))?;
        }
    }
    Ok(())
}
