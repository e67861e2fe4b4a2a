//! Report API 集成测试
//!
//! 覆盖 JSON 信封、日期校验、CSV 导出、health 与存储不可用时的 503。

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde_json::Value;

use collateral_insights::analytics::{CollateralCatalog, EngagementAggregator};
use collateral_insights::api::middleware::RequestIdMiddleware;
use collateral_insights::api::services::{AppStartTime, api_v1_routes, health_routes};
use collateral_insights::errors::{InsightsError, Result};
use collateral_insights::storage::{
    Campaign, CollateralDetailRow, CollateralInfo, DateWindow, EngagementMode, EngagementStore,
    EventStore, HistogramBucket, RegionRow, Registration, RosterStore, TransactionKind,
};

use common::{TestDb, Tx, at, day};

macro_rules! app_with {
    ($aggregator:expr) => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new($aggregator))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now(),
                }))
                .service(api_v1_routes())
                .service(health_routes()),
        )
        .await
    };
}

async fn seeded_db() -> TestDb {
    let db = TestDb::new().await;
    db.campaign("C1", day(2024, 1, 1)).await;
    db.collateral(101, "Dosage Guide", "pdf").await;
    db.field_rep("C1", "A", Some("North"), at(2024, 1, 2, 9)).await;
    db.field_rep("C1", "B", Some("South"), at(2024, 1, 2, 9)).await;
    db.doctor("C1", "A", "P1", at(2024, 1, 3, 9)).await;
    db.doctor("C1", "B", "P1", at(2024, 1, 4, 9)).await;
    db.doctor("C1", "B", "P2", at(2024, 1, 5, 9)).await;
    db.transaction(Tx::shared("C1", "A", "P1", 101, at(2024, 1, 10, 9))).await;
    db.transaction(Tx::viewed("C1", "A", "P1", 101, at(2024, 1, 11, 9))).await;
    db.transaction(Tx::shared("C1", "B", "P2", 101, at(2024, 1, 12, 9))).await;
    db.transaction(Tx::shared("C1", "B", "P2", 102, at(2024, 1, 12, 9))).await;
    db
}

// =============================================================================
// JSON 端点
// =============================================================================

#[actix_web::test]
async fn test_list_campaigns_envelope() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get().uri("/api/v1/campaigns").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"][0]["campaign_id"], "C1");
    assert_eq!(body["data"][0]["start_date"], "2024-01-01");
}

#[actix_web::test]
async fn test_unique_counts_endpoint() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/unique-counts")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["unique_field_reps"], 2);
    assert_eq!(body["data"]["unique_doctors"], 2);
}

#[actix_web::test]
async fn test_unknown_campaign_returns_zeros() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/NOPE/unique-counts")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["unique_doctors"], 0);
}

#[actix_web::test]
async fn test_tiers_endpoint_uses_tier_labels() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/tiers?mode=received&start_date=2024-01-01&end_date=2024-01-31")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["mode"], "received");
    assert_eq!(body["data"]["tiers"]["1"], 1);
    assert_eq!(body["data"]["tiers"]["2-5"], 1);
    assert_eq!(body["data"]["tiers"]["11+"], 0);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/tiers?mode=VIEWED")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["mode"], "viewed");
    assert_eq!(body["data"]["tiers"]["1"], 1);
    assert_eq!(body["data"]["tiers"]["2-5"], 0);
}

#[actix_web::test]
async fn test_recruitment_and_duplicates_endpoints() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/recruitment")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_unique_doctors"], 2);
    assert_eq!(body["data"]["total_duplicate_doctors"], 1);
    assert_eq!(body["data"]["rows"][1]["field_id"], "B");
    assert_eq!(body["data"]["rows"][1]["duplicate_doctors"], 1);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/duplicates")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["role"], "first_recruiter");
    assert_eq!(rows[1]["role"], "duplicate");
}

#[actix_web::test]
async fn test_collateral_endpoints() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/collaterals/101")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["title"], "Dosage Guide");
    assert_eq!(body["data"]["kind"], "pdf");
    assert_eq!(body["data"]["received"], 2);
    assert_eq!(body["data"]["viewed"], 1);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/collaterals")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["collateral_id"], 102);
    assert!(rows[1]["kind"].is_null());
}

#[actix_web::test]
async fn test_regions_endpoint() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/regions")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let rows = body["data"].as_array().unwrap();
    let regions: Vec<&str> = rows.iter().map(|r| r["region"].as_str().unwrap()).collect();
    assert_eq!(regions, vec!["North", "South"]);
}

#[actix_web::test]
async fn test_trend_endpoint() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/trend?metric=shared_transactions&reference_date=2024-01-12")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["metric"], "shared_transactions");
    assert_eq!(body["data"]["current"], 3);
    assert_eq!(body["data"]["previous"], 0);
    assert_eq!(body["data"]["percentage"], 0.0);
}

#[actix_web::test]
async fn test_summary_endpoint() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/summary")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["campaign"]["name"], "C1 launch");
    assert_eq!(body["data"]["span"]["start"], "2024-01-01");
    assert_eq!(body["data"]["cumulative"]["unique_counts"]["unique_doctors"], 2);
    assert_eq!(body["data"]["trends"].as_array().unwrap().len(), 3);
}

// =============================================================================
// 参数校验
// =============================================================================

#[actix_web::test]
async fn test_malformed_date_is_bad_request() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/unique-counts?start_date=yesterday")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2000);
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn test_reversed_range_is_bad_request() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/tiers?start_date=2024-02-01&end_date=2024-01-01")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2000);
}

#[actix_web::test]
async fn test_invalid_mode_and_missing_metric() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/tiers?mode=clicked")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2001);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/trend")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2002);
}

// =============================================================================
// CSV 导出
// =============================================================================

#[actix_web::test]
async fn test_export_tiers_csv() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/export/tiers.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("C1_tiers_"));

    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "Campaign,Received 1,Received 2-5,Received 6-10,Received 11+,\
             Viewed 1,Viewed 2-5,Viewed 6-10,Viewed 11+,\
             Field Reps WoW %,Doctors WoW %,Shared WoW %"
        )
    );
    // 无窗口时以当前时间为参考，2024 年的数据全部落在两个窗口之外
    assert_eq!(lines.next(), Some("C1,1,1,0,0,1,0,0,0,0.00,0.00,0.00"));
}

#[actix_web::test]
async fn test_export_tiers_csv_trend_uses_window_end() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/export/tiers.csv?start_date=2024-01-01&end_date=2024-01-12")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    // 代表、医生都在上一周注册；本周 3 条分享、上一周 0 条
    assert_eq!(
        text.lines().nth(1),
        Some("C1,1,1,0,0,1,0,0,0,-100.00,-100.00,0.00")
    );
}

#[actix_web::test]
async fn test_export_collaterals_csv_for_unknown_campaign_keeps_header() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/NOPE/export/collaterals.csv")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        text,
        "Collateral ID,Title,Type,Received,Viewed,PDF Downloaded,PDF Last Page,\
         Video <50%,Video >50%,Video 100%\n"
    );
}

#[actix_web::test]
async fn test_export_recruitment_csv_has_total_row() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/export/recruitment.csv")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = String::from_utf8(body.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Field ID,Unique Doctors,Same Doctors");
    assert_eq!(lines.last().copied(), Some("Total,2,1"));
}

// =============================================================================
// health + 存储不可用
// =============================================================================

#[actix_web::test]
async fn test_health_reports_backend() {
    let db = seeded_db().await;
    let app = app_with!(db.aggregator().await);

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["backend"], "sqlite");
    assert_eq!(body["data"]["catalog_entries"], 1);
}

/// 所有查询都返回连接失败的存储
struct UnavailableStore;

fn down<T>() -> Result<T> {
    Err(InsightsError::store_unavailable("connection refused"))
}

#[async_trait]
impl EventStore for UnavailableStore {
    async fn count_active_field_reps(&self, _: &str, _: DateWindow) -> Result<u64> {
        down()
    }

    async fn count_transactions(&self, _: &str, _: DateWindow, _: TransactionKind) -> Result<u64> {
        down()
    }

    async fn collateral_count_histogram(
        &self,
        _: &str,
        _: Option<DateWindow>,
        _: EngagementMode,
    ) -> Result<Vec<HistogramBucket>> {
        down()
    }

    async fn collateral_detail_rows(
        &self,
        _: &str,
        _: Option<i64>,
    ) -> Result<Vec<CollateralDetailRow>> {
        down()
    }

    async fn region_rows(&self, _: &str, _: Option<DateWindow>) -> Result<Vec<RegionRow>> {
        down()
    }
}

#[async_trait]
impl RosterStore for UnavailableStore {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        down()
    }

    async fn find_campaign(&self, _: &str) -> Result<Option<Campaign>> {
        down()
    }

    async fn count_distinct_field_reps(&self, _: &str, _: Option<DateWindow>) -> Result<u64> {
        down()
    }

    async fn count_distinct_doctors(&self, _: &str, _: Option<DateWindow>) -> Result<u64> {
        down()
    }

    async fn scan_registrations<'a>(
        &'a self,
        _: &str,
        _: Option<DateWindow>,
    ) -> Result<BoxStream<'a, Result<Registration>>> {
        down()
    }

    async fn list_repeated_registrations(&self, _: &str) -> Result<Vec<Registration>> {
        down()
    }

    async fn list_field_rep_ids(&self, _: &str) -> Result<Vec<String>> {
        down()
    }

    async fn list_collaterals(&self) -> Result<Vec<CollateralInfo>> {
        down()
    }

    async fn list_campaign_collateral_ids(&self, _: &str) -> Result<Vec<i64>> {
        down()
    }
}

#[async_trait]
impl EngagementStore for UnavailableStore {
    fn backend_name(&self) -> &str {
        "unavailable"
    }

    async fn ping(&self) -> Result<()> {
        down()
    }
}

fn unavailable_aggregator() -> Arc<EngagementAggregator> {
    common::init_static_config();
    let store: Arc<dyn EngagementStore> = Arc::new(UnavailableStore);
    Arc::new(EngagementAggregator::new(
        store,
        Arc::new(CollateralCatalog::default()),
    ))
}

#[actix_web::test]
async fn test_store_unavailable_maps_to_503() {
    let app = app_with!(unavailable_aggregator());

    for uri in [
        "/api/v1/campaigns",
        "/api/v1/campaigns/C1/summary",
        "/api/v1/campaigns/C1/recruitment",
        "/api/v1/campaigns/C1/trend?metric=viewed_transactions",
    ] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE, "{}", uri);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 2004, "{}", uri);
    }
}

#[actix_web::test]
async fn test_validation_runs_before_store_access() {
    let app = app_with!(unavailable_aggregator());

    let req = TestRequest::get()
        .uri("/api/v1/campaigns/C1/regions?end_date=not-a-date")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health_is_503_when_store_down() {
    let app = app_with!(unavailable_aggregator());

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["status"], "unhealthy");
}
