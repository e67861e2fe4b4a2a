//! Campaign report 路由配置

use actix_web::web;

use super::export::{export_collaterals, export_recruitment, export_tiers};
use super::handlers::{
    get_collateral, get_duplicates, get_recruitment, get_regions, get_summary, get_tiers,
    get_trend, get_unique_counts, list_campaigns, list_collaterals,
};

/// 活动报表路由 `/campaigns`
///
/// 包含：
/// - GET /campaigns - 活动列表
/// - GET /campaigns/{id}/summary - 看板概览
/// - GET /campaigns/{id}/unique-counts - 去重代表 / 医生数
/// - GET /campaigns/{id}/tiers - 档位分布
/// - GET /campaigns/{id}/recruitment - 代表招募表
/// - GET /campaigns/{id}/duplicates - 重复注册明细
/// - GET /campaigns/{id}/trend - 周环比
/// - GET /campaigns/{id}/collaterals[/{cid}] - collateral 明细
/// - GET /campaigns/{id}/regions - 大区汇总
/// - GET /campaigns/{id}/export/*.csv - CSV 导出
pub fn campaigns_routes() -> actix_web::Scope {
    web::scope("/campaigns")
        .route("", web::get().to(list_campaigns))
        .route("/{id}/summary", web::get().to(get_summary))
        .route("/{id}/unique-counts", web::get().to(get_unique_counts))
        .route("/{id}/tiers", web::get().to(get_tiers))
        .route("/{id}/recruitment", web::get().to(get_recruitment))
        .route("/{id}/duplicates", web::get().to(get_duplicates))
        .route("/{id}/trend", web::get().to(get_trend))
        .route("/{id}/collaterals", web::get().to(list_collaterals))
        .route("/{id}/collaterals/{cid}", web::get().to(get_collateral))
        .route("/{id}/regions", web::get().to(get_regions))
        .route("/{id}/export/tiers.csv", web::get().to(export_tiers))
        .route(
            "/{id}/export/collaterals.csv",
            web::get().to(export_collaterals),
        )
        .route(
            "/{id}/export/recruitment.csv",
            web::get().to(export_recruitment),
        )
}

/// `/api/v1` 路由
pub fn api_v1_routes() -> actix_web::Scope {
    web::scope("/api/v1").service(campaigns_routes())
}
