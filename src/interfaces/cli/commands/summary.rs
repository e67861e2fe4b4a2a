//! Print a campaign summary as JSON

use chrono::Utc;

use crate::analytics::{EngagementAggregator, parse_window};
use crate::interfaces::cli::CliError;

pub async fn print_summary(
    aggregator: &EngagementAggregator,
    campaign_id: &str,
    start: Option<String>,
    end: Option<String>,
) -> Result<(), CliError> {
    let window = parse_window(start.as_deref(), end.as_deref())?;
    let summary = aggregator
        .campaign_summary(campaign_id, window, Utc::now())
        .await?;

    let json = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::CommandError(format!("Failed to serialize summary: {}", e)))?;
    println!("{}", json);
    Ok(())
}
