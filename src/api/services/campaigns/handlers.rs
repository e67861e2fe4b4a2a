//! Campaign report 端点

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, Result as ActixResult, web};
use chrono::Utc;
use tracing::info;

use crate::analytics::{EngagementAggregator, parse_reference_date, parse_window};
use crate::errors::Result;
use crate::storage::DateWindow;

use super::helpers::{api_result, error_from_insights, parse_metric, parse_mode};
use super::types::{TierQuery, TiersResponse, TrendQuery, WindowQuery};

/// 在执行任何查询前解析窗口；失败直接返回 400
fn window_or_400(
    start: Option<&str>,
    end: Option<&str>,
) -> std::result::Result<Option<DateWindow>, HttpResponse> {
    parse_window(start, end).map_err(|e| error_from_insights(&e))
}

macro_rules! try_window {
    ($query:expr) => {
        match window_or_400($query.start_date.as_deref(), $query.end_date.as_deref()) {
            Ok(window) => window,
            Err(resp) => return Ok(resp),
        }
    };
}

/// GET /campaigns
pub async fn list_campaigns(
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    info!("Report API: list campaigns");
    Ok(api_result(aggregator.list_campaigns().await))
}

/// GET /campaigns/{id}/summary
pub async fn get_summary(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: summary for campaign {}", campaign_id);

    let window = try_window!(query);
    Ok(api_result(
        aggregator
            .campaign_summary(&campaign_id, window, Utc::now())
            .await,
    ))
}

/// GET /campaigns/{id}/unique-counts
pub async fn get_unique_counts(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: unique counts for campaign {}", campaign_id);

    let window = try_window!(query);
    Ok(api_result(aggregator.unique_counts(&campaign_id, window).await))
}

/// GET /campaigns/{id}/tiers?mode=received|viewed
pub async fn get_tiers(
    path: web::Path<String>,
    query: web::Query<TierQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!(
        "Report API: tiers for campaign {} mode={:?}",
        campaign_id, query.mode
    );

    let mode = match parse_mode(query.mode.as_deref()) {
        Ok(mode) => mode,
        Err(resp) => return Ok(resp),
    };
    let window = try_window!(query);

    let result: Result<TiersResponse> = aggregator
        .collateral_tier_distribution(&campaign_id, window, mode)
        .await
        .map(|tiers| TiersResponse {
            campaign_id: campaign_id.clone(),
            mode,
            window,
            tiers,
        });
    Ok(api_result(result))
}

/// GET /campaigns/{id}/recruitment
pub async fn get_recruitment(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: recruitment table for campaign {}", campaign_id);

    let window = try_window!(query);
    Ok(api_result(
        aggregator
            .field_rep_recruitment_table(&campaign_id, window)
            .await,
    ))
}

/// GET /campaigns/{id}/duplicates
pub async fn get_duplicates(
    path: web::Path<String>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: duplicate doctors for campaign {}", campaign_id);
    Ok(api_result(aggregator.duplicate_doctors(&campaign_id).await))
}

/// GET /campaigns/{id}/trend?metric=..&reference_date=..
pub async fn get_trend(
    path: web::Path<String>,
    query: web::Query<TrendQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!(
        "Report API: trend for campaign {} metric={:?}",
        campaign_id, query.metric
    );

    let metric = match parse_metric(query.metric.as_deref()) {
        Ok(metric) => metric,
        Err(resp) => return Ok(resp),
    };
    let reference = match parse_reference_date(query.reference_date.as_deref()) {
        Ok(reference) => reference,
        Err(e) => return Ok(error_from_insights(&e)),
    };

    Ok(api_result(
        aggregator
            .week_over_week_trend(&metric, &campaign_id, reference)
            .await,
    ))
}

/// GET /campaigns/{id}/collaterals
pub async fn list_collaterals(
    path: web::Path<String>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: collateral details for campaign {}", campaign_id);
    Ok(api_result(aggregator.collateral_details(&campaign_id).await))
}

/// GET /campaigns/{id}/collaterals/{cid}
pub async fn get_collateral(
    path: web::Path<(String, i64)>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let (campaign_id, collateral_id) = path.into_inner();
    info!(
        "Report API: collateral {} detail for campaign {}",
        collateral_id, campaign_id
    );
    Ok(api_result(
        aggregator
            .collateral_detail(&campaign_id, collateral_id)
            .await,
    ))
}

/// GET /campaigns/{id}/regions
pub async fn get_regions(
    path: web::Path<String>,
    query: web::Query<WindowQuery>,
    aggregator: web::Data<Arc<EngagementAggregator>>,
) -> ActixResult<impl Responder> {
    let campaign_id = path.into_inner();
    info!("Report API: region rollup for campaign {}", campaign_id);

    let window = try_window!(query);
    Ok(api_result(aggregator.region_rollup(&campaign_id, window).await))
}
