//! CSV 导出端点

use std::sync::Arc;

use actix_web::{Responder, Result as ActixResult, web};
use tracing::info;

use crate::analytics::{EngagementAggregator, parse_window};
use crate::errors::Result;
use crate::storage::EngagementMode;
use crate::utils::csv_handler;

use super::helpers::{csv_response, error_from_insights};
use super::types::WindowQuery;

fn export_filename(campaign_id: &str, report: &str) -> String {
    let safe: String = campaign_id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!(
        "{}_{}_{}.csv",
        safe,
        report,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    )
}

/// GET /campaigns/{id}/export/tiers.csv
pub async fn export_tiers(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: export tiers for campaign {}", campaign_id);

    let window = match parse_window(query.start_date.as_deref(), query.end_date.as_deref()) {
        Ok(window) => window,
        Err(e) => return Ok(error_from_insights(&e)),
    };

    let result: Result<Vec<u8>> = async {
        let reference = window.map(|w| w.end).unwrap_or_else(chrono::Utc::now);
        let (received, viewed, trends) = tokio::try_join!(
            aggregator.collateral_tier_distribution(&campaign_id, window, EngagementMode::Received),
            aggregator.collateral_tier_distribution(&campaign_id, window, EngagementMode::Viewed),
            aggregator.summary_trends(&campaign_id, reference),
        )?;
        csv_handler::tiers_to_csv(&campaign_id, &received, &viewed, &trends)
    }
    .await;

    Ok(csv_response(&export_filename(&campaign_id, "tiers"), result))
}

/// GET /campaigns/{id}/export/collaterals.csv
pub async fn export_collaterals(
    path: web::Path<String>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: export collaterals for campaign {}", campaign_id);

    let limit = crate::config::get_config().reports.export_row_limit;
    let result = aggregator
        .collateral_details(&campaign_id)
        .await
        .and_then(|details| csv_handler::collaterals_to_csv(&details, limit));

    Ok(csv_response(
        &export_filename(&campaign_id, "collaterals"),
        result,
    ))
}

/// GET /campaigns/{id}/export/recruitment.csv
pub async fn export_recruitment(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: export recruitment for campaign {}", campaign_id);

    let window = match parse_window(query.start_date.as_deref(), query.end_date.as_deref()) {
        Ok(window) => window,
        Err(e) => return Ok(error_from_insights(&e)),
    };

    let limit = crate::config::get_config().reports.export_row_limit;
    let result = aggregator
        .field_rep_recruitment_table(&campaign_id, window)
        .await
        .and_then(|table| csv_handler::recruitment_to_csv(&table, limit));

    Ok(csv_response(
        &export_filename(&campaign_id, "recruitment"),
        result,
    ))
}
