//! EventStore implementation over `collateral_transactions`
//!
//! Every aggregate is pushed down to the database: the service never loads
//! raw transaction rows into memory.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait, RelationTrait,
    sea_query::{Alias, Expr, Order, Query},
};
use tracing::debug;

use super::SeaOrmStorage;
use super::query::{CountRow, scoped, to_count};
use crate::errors::Result;
use crate::storage::models::{
    CollateralDetailRow, DateWindow, EngagementMode, HistogramBucket, RegionRow, TransactionKind,
    UNASSIGNED_REGION, VIEW_EVENT_COMMENTS,
};
use crate::storage::traits::EventStore;

use migration::entities::collateral_transaction as tx;

/// 同一代表可能被多次上传，只关联最新（id 最大）的一行，避免一位医生落入多个大区
const LATEST_ROSTER_ROW: &str = "field_reps.id = (SELECT MAX(latest.id) FROM field_reps latest \
     WHERE latest.campaign_id = collateral_transactions.campaign_id \
     AND latest.field_id = collateral_transactions.field_id)";

/// collateral_count 分组结果行
#[derive(Debug, FromQueryResult)]
struct HistogramRow {
    collateral_count: i64,
    doctors: i64,
}

/// 单个 collateral 的条件去重计数结果行
#[derive(Debug, FromQueryResult)]
struct DetailRow {
    collateral_id: i64,
    received_doctors: i64,
    viewed_doctors: i64,
    pdf_downloaded_doctors: i64,
    pdf_last_page_doctors: i64,
    video_below_half_doctors: i64,
    video_above_half_doctors: i64,
    video_completed_doctors: i64,
}

/// 大区聚合结果行
#[derive(Debug, FromQueryResult)]
struct RegionQueryRow {
    region: String,
    doctors_received: i64,
    doctors_viewed: i64,
    active_field_reps: i64,
}

#[async_trait]
impl EventStore for SeaOrmStorage {
    async fn count_active_field_reps(&self, campaign_id: &str, window: DateWindow) -> Result<u64> {
        let row = tx::Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(DISTINCT field_id)"), "count")
            .filter(scoped(
                tx::Column::CampaignId,
                campaign_id,
                tx::Column::TransactedAt,
                Some(window),
            ))
            .into_model::<CountRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(|r| to_count(r.count)).unwrap_or(0))
    }

    async fn count_transactions(
        &self,
        campaign_id: &str,
        window: DateWindow,
        kind: TransactionKind,
    ) -> Result<u64> {
        let scope = scoped(
            tx::Column::CampaignId,
            campaign_id,
            tx::Column::TransactedAt,
            Some(window),
        );
        let scope = match kind {
            TransactionKind::Shared => scope.add(tx::Column::Comment.is_not_in(VIEW_EVENT_COMMENTS)),
            TransactionKind::Viewed => scope.add(tx::Column::Viewed.eq(true)),
        };

        let row = tx::Entity::find()
            .select_only()
            .column_as(Expr::cust("COUNT(*)"), "count")
            .filter(scope)
            .into_model::<CountRow>()
            .one(&self.db)
            .await?;
        Ok(row.map(|r| to_count(r.count)).unwrap_or(0))
    }

    async fn collateral_count_histogram(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
        mode: EngagementMode,
    ) -> Result<Vec<HistogramBucket>> {
        let scope = scoped(
            tx::Column::CampaignId,
            campaign_id,
            tx::Column::TransactedAt,
            window,
        );
        let scope = match mode {
            EngagementMode::Received => scope,
            EngagementMode::Viewed => scope.add(tx::Column::Viewed.eq(true)),
        };

        // 内层：每位医生的去重 collateral 数
        let per_doctor = tx::Entity::find()
            .select_only()
            .column(tx::Column::DoctorPhone)
            .column_as(Expr::cust("COUNT(DISTINCT collateral_id)"), "collateral_count")
            .filter(scope)
            .group_by(tx::Column::DoctorPhone)
            .into_query();

        // 外层：按 collateral 数分组计医生数
        let histogram = Query::select()
            .column(Alias::new("collateral_count"))
            .expr_as(Expr::cust("COUNT(*)"), Alias::new("doctors"))
            .from_subquery(per_doctor, Alias::new("per_doctor"))
            .group_by_col(Alias::new("collateral_count"))
            .order_by(Alias::new("collateral_count"), Order::Asc)
            .to_owned();

        let stmt = self.db.get_database_backend().build(&histogram);
        let rows = HistogramRow::find_by_statement(stmt).all(&self.db).await?;

        debug!(
            "Histogram for campaign {} ({}): {} buckets",
            campaign_id,
            mode,
            rows.len()
        );

        Ok(rows
            .into_iter()
            .map(|r| HistogramBucket {
                collateral_count: to_count(r.collateral_count),
                doctors: to_count(r.doctors),
            })
            .collect())
    }

    async fn collateral_detail_rows(
        &self,
        campaign_id: &str,
        collateral_id: Option<i64>,
    ) -> Result<Vec<CollateralDetailRow>> {
        let scope = scoped(tx::Column::CampaignId, campaign_id, tx::Column::TransactedAt, None)
            .add_option(collateral_id.map(|id| tx::Column::CollateralId.eq(id)));

        let rows = tx::Entity::find()
            .select_only()
            .column(tx::Column::CollateralId)
            .column_as(Expr::cust("COUNT(DISTINCT doctor_phone)"), "received_doctors")
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN viewed THEN doctor_phone END)"),
                "viewed_doctors",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN pdf_download THEN doctor_phone END)"),
                "pdf_downloaded_doctors",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN pdf_last_page_reached THEN doctor_phone END)"),
                "pdf_last_page_doctors",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN video_watch_bucket = 1 THEN doctor_phone END)"),
                "video_below_half_doctors",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN video_watch_bucket = 2 THEN doctor_phone END)"),
                "video_above_half_doctors",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT CASE WHEN video_watch_bucket = 3 THEN doctor_phone END)"),
                "video_completed_doctors",
            )
            .filter(scope)
            .group_by(tx::Column::CollateralId)
            .order_by_asc(tx::Column::CollateralId)
            .into_model::<DetailRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| CollateralDetailRow {
                collateral_id: r.collateral_id,
                received: to_count(r.received_doctors),
                viewed: to_count(r.viewed_doctors),
                pdf_downloaded: to_count(r.pdf_downloaded_doctors),
                pdf_last_page: to_count(r.pdf_last_page_doctors),
                video_below_half: to_count(r.video_below_half_doctors),
                video_above_half: to_count(r.video_above_half_doctors),
                video_completed: to_count(r.video_completed_doctors),
            })
            .collect())
    }

    async fn region_rows(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<RegionRow>> {
        // 未分配大区（无匹配代表、region 为空）统一归入 UNASSIGNED_REGION
        let region_label = format!(
            "COALESCE(NULLIF(field_reps.region, ''), '{}')",
            UNASSIGNED_REGION
        );

        let rows = tx::Entity::find()
            .select_only()
            .column_as(Expr::cust(region_label.clone()), "region")
            .column_as(
                Expr::cust("COUNT(DISTINCT collateral_transactions.doctor_phone)"),
                "doctors_received",
            )
            .column_as(
                Expr::cust(
                    "COUNT(DISTINCT CASE WHEN collateral_transactions.viewed \
                     THEN collateral_transactions.doctor_phone END)",
                ),
                "doctors_viewed",
            )
            .column_as(
                Expr::cust("COUNT(DISTINCT collateral_transactions.field_id)"),
                "active_field_reps",
            )
            .join(
                JoinType::LeftJoin,
                tx::Relation::FieldRep
                    .def()
                    .on_condition(|_, _| Condition::all().add(Expr::cust(LATEST_ROSTER_ROW))),
            )
            .filter(scoped(
                tx::Column::CampaignId,
                campaign_id,
                tx::Column::TransactedAt,
                window,
            ))
            .group_by(Expr::cust(region_label))
            .order_by_asc(Expr::cust("region"))
            .into_model::<RegionQueryRow>()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| RegionRow {
                region: r.region,
                doctors_received: to_count(r.doctors_received),
                doctors_viewed: to_count(r.doctors_viewed),
                active_field_reps: to_count(r.active_field_reps),
            })
            .collect())
    }
}
