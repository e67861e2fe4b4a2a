//! Read-only store interfaces consumed by the aggregator
//!
//! Every method is scoped to a single campaign. Windows are inclusive on
//! both ends; `None` means unbounded.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use super::models::{
    Campaign, CollateralDetailRow, CollateralInfo, DateWindow, EngagementMode, HistogramBucket,
    RegionRow, Registration, TransactionKind,
};
use crate::errors::Result;

/// 事务日志查询
#[async_trait]
pub trait EventStore: Send + Sync {
    /// 窗口内有事务的去重 field_id 数
    async fn count_active_field_reps(&self, campaign_id: &str, window: DateWindow) -> Result<u64>;

    /// 窗口内某类事务的行数
    async fn count_transactions(
        &self,
        campaign_id: &str,
        window: DateWindow,
        kind: TransactionKind,
    ) -> Result<u64>;

    /// 每位医生触达的去重 collateral 数，再按该数分组计数
    async fn collateral_count_histogram(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
        mode: EngagementMode,
    ) -> Result<Vec<HistogramBucket>>;

    /// 按 collateral 分组的去重医生计数；指定 id 时只返回该 collateral
    async fn collateral_detail_rows(
        &self,
        campaign_id: &str,
        collateral_id: Option<i64>,
    ) -> Result<Vec<CollateralDetailRow>>;

    async fn region_rows(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<RegionRow>>;
}

/// 活动 / 代表 / 医生 / 素材名录查询
#[async_trait]
pub trait RosterStore: Send + Sync {
    async fn list_campaigns(&self) -> Result<Vec<Campaign>>;

    async fn find_campaign(&self, campaign_id: &str) -> Result<Option<Campaign>>;

    async fn count_distinct_field_reps(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<u64>;

    async fn count_distinct_doctors(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<u64>;

    /// 按 id 升序流式返回注册行
    async fn scan_registrations<'a>(
        &'a self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<BoxStream<'a, Result<Registration>>>;

    /// 手机号在活动内出现多次的注册行，按手机号、id 升序
    async fn list_repeated_registrations(&self, campaign_id: &str) -> Result<Vec<Registration>>;

    /// 名录中的 field_id，按 id 升序
    async fn list_field_rep_ids(&self, campaign_id: &str) -> Result<Vec<String>>;

    async fn list_collaterals(&self) -> Result<Vec<CollateralInfo>>;

    /// 分配给活动的 collateral id，升序
    async fn list_campaign_collateral_ids(&self, campaign_id: &str) -> Result<Vec<i64>>;
}

/// 聚合器依赖的完整存储接口
#[async_trait]
pub trait EngagementStore: EventStore + RosterStore {
    fn backend_name(&self) -> &str;

    /// 健康检查
    async fn ping(&self) -> Result<()>;
}
