//! EngagementAggregator: the read-and-compute layer over the stores

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use tracing::{debug, error, info};

use super::catalog::CollateralCatalog;
use super::recruitment::{RecruitmentTable, RecruitmentTally};
use super::tiers::TierDistribution;
use super::trend::{MetricSelector, Trend, TrendMetric, trend_percentage, trend_windows};
use super::types::{
    CampaignSpan, CampaignSummary, CollateralDetail, DuplicateDoctor, EngagementSnapshot,
    RecruitmentRole, RegionSummary, UniqueCounts, VideoWatchSplit,
};
use super::window::trailing_window;
use crate::errors::{InsightsError, Result};
use crate::storage::{Campaign, CollateralDetailRow, DateWindow, EngagementMode, EngagementStore};

/// 参与度聚合器
///
/// 仅持有注入的存储与素材目录，不保存任何请求间状态。
#[derive(Clone)]
pub struct EngagementAggregator {
    store: Arc<dyn EngagementStore>,
    catalog: Arc<CollateralCatalog>,
    trend_days: i64,
    recent_days: i64,
}

fn require_campaign(campaign_id: &str) -> Result<&str> {
    let trimmed = campaign_id.trim();
    if trimmed.is_empty() {
        return Err(InsightsError::validation("campaign id is required"));
    }
    Ok(trimmed)
}

/// 存储失败时记录错误并原样返回
fn traced<T>(op: &str, campaign_id: &str, result: Result<T>) -> Result<T> {
    result.inspect_err(|e| {
        error!(
            "Aggregation {} failed for campaign {}: {}",
            op, campaign_id, e
        )
    })
}

impl EngagementAggregator {
    /// 创建聚合器，窗口长度读取 `[reports]` 配置
    pub fn new(store: Arc<dyn EngagementStore>, catalog: Arc<CollateralCatalog>) -> Self {
        let config = crate::config::get_config();
        Self {
            store,
            catalog,
            trend_days: config.reports.trend_days,
            recent_days: config.reports.recent_days,
        }
    }

    pub fn with_windows(mut self, trend_days: i64, recent_days: i64) -> Self {
        self.trend_days = trend_days;
        self.recent_days = recent_days;
        self
    }

    pub fn store(&self) -> &Arc<dyn EngagementStore> {
        &self.store
    }

    pub fn catalog(&self) -> &CollateralCatalog {
        &self.catalog
    }

    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        info!("Aggregator: list_campaigns");
        let campaigns = traced("list_campaigns", "*", self.store.list_campaigns().await)?;
        debug!("Aggregator: {} campaigns", campaigns.len());
        Ok(campaigns)
    }

    /// 去重代表数与去重医生数
    pub async fn unique_counts(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<UniqueCounts> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: unique_counts campaign={} window={:?}",
            campaign_id, window
        );

        let (unique_field_reps, unique_doctors) = traced(
            "unique_counts",
            campaign_id,
            tokio::try_join!(
                self.store.count_distinct_field_reps(campaign_id, window),
                self.store.count_distinct_doctors(campaign_id, window),
            ),
        )?;

        let counts = UniqueCounts {
            unique_field_reps,
            unique_doctors,
        };
        debug!("Aggregator: unique_counts {:?}", counts);
        Ok(counts)
    }

    /// 按触达 collateral 数分档的医生分布
    pub async fn collateral_tier_distribution(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
        mode: EngagementMode,
    ) -> Result<TierDistribution> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: tier_distribution campaign={} mode={} window={:?}",
            campaign_id, mode, window
        );

        let buckets = traced(
            "tier_distribution",
            campaign_id,
            self.store
                .collateral_count_histogram(campaign_id, window, mode)
                .await,
        )?;
        let distribution = TierDistribution::from_histogram(&buckets);

        debug!("Aggregator: tier_distribution {:?}", distribution);
        Ok(distribution)
    }

    /// 代表招募表：首位招募归属 + 重复招募计数
    pub async fn field_rep_recruitment_table(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<RecruitmentTable> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: recruitment_table campaign={} window={:?}",
            campaign_id, window
        );

        let table = traced("recruitment_table", campaign_id, async {
            let roster = self.store.list_field_rep_ids(campaign_id).await?;
            let mut tally = RecruitmentTally::with_roster(roster);

            let mut rows = self.store.scan_registrations(campaign_id, window).await?;
            while let Some(row) = rows.try_next().await? {
                tally.observe(&row)?;
            }
            Ok::<_, InsightsError>(tally.finish())
        }
        .await)?;

        debug!(
            "Aggregator: recruitment_table {} reps, {} unique, {} duplicates",
            table.rows.len(),
            table.total_unique_doctors,
            table.total_duplicate_doctors
        );
        Ok(table)
    }

    /// 周环比：`[ref-N天, ref]` 对比 `[ref-2N天, ref-N天]`
    pub async fn week_over_week_trend(
        &self,
        metric: &dyn TrendMetric,
        campaign_id: &str,
        reference: DateTime<Utc>,
    ) -> Result<Trend> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: trend metric={} campaign={} reference={}",
            metric.name(),
            campaign_id,
            reference
        );

        let (current_window, previous_window) = trend_windows(reference, self.trend_days);
        let store = self.store.as_ref();
        let (current, previous) = traced(
            "trend",
            campaign_id,
            tokio::try_join!(
                metric.count(store, campaign_id, current_window),
                metric.count(store, campaign_id, previous_window),
            ),
        )?;

        let trend = Trend {
            metric: metric.name(),
            current,
            previous,
            percentage: trend_percentage(current, previous),
            current_window,
            previous_window,
        };
        debug!(
            "Aggregator: trend {} current={} previous={} pct={:.2}",
            trend.metric, trend.current, trend.previous, trend.percentage
        );
        Ok(trend)
    }

    fn enrich(&self, row: CollateralDetailRow) -> CollateralDetail {
        CollateralDetail {
            title: self.catalog.title_for(row.collateral_id),
            kind: self.catalog.kind_for(row.collateral_id),
            collateral_id: row.collateral_id,
            received: row.received,
            viewed: row.viewed,
            pdf_downloaded: row.pdf_downloaded,
            pdf_last_page: row.pdf_last_page,
            video: VideoWatchSplit {
                below_half: row.video_below_half,
                above_half: row.video_above_half,
                completed: row.video_completed,
            },
        }
    }

    /// 单个 collateral 的去重医生计数；没有事务时全部为 0
    pub async fn collateral_detail(
        &self,
        campaign_id: &str,
        collateral_id: i64,
    ) -> Result<CollateralDetail> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: collateral_detail campaign={} collateral={}",
            campaign_id, collateral_id
        );

        let rows = traced(
            "collateral_detail",
            campaign_id,
            self.store
                .collateral_detail_rows(campaign_id, Some(collateral_id))
                .await,
        )?;

        let row = rows
            .into_iter()
            .find(|r| r.collateral_id == collateral_id)
            .unwrap_or(CollateralDetailRow {
                collateral_id,
                ..Default::default()
            });

        let detail = self.enrich(row);
        debug!("Aggregator: collateral_detail {:?}", detail);
        Ok(detail)
    }

    /// 分配给活动的 collateral 与有事务的 collateral 的并集，按 id 升序
    ///
    /// 已分配但没有事务的 collateral 计数全部为 0
    pub async fn collateral_details(&self, campaign_id: &str) -> Result<Vec<CollateralDetail>> {
        let campaign_id = require_campaign(campaign_id)?;
        info!("Aggregator: collateral_details campaign={}", campaign_id);

        let (assigned, rows) = traced(
            "collateral_details",
            campaign_id,
            tokio::try_join!(
                self.store.list_campaign_collateral_ids(campaign_id),
                self.store.collateral_detail_rows(campaign_id, None),
            ),
        )?;

        let mut merged: BTreeMap<i64, CollateralDetailRow> = assigned
            .into_iter()
            .map(|collateral_id| {
                (
                    collateral_id,
                    CollateralDetailRow {
                        collateral_id,
                        ..Default::default()
                    },
                )
            })
            .collect();
        for row in rows {
            merged.insert(row.collateral_id, row);
        }

        let details: Vec<CollateralDetail> =
            merged.into_values().map(|r| self.enrich(r)).collect();
        debug!("Aggregator: collateral_details {} rows", details.len());
        Ok(details)
    }

    /// 按大区汇总
    pub async fn region_rollup(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<Vec<RegionSummary>> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: region_rollup campaign={} window={:?}",
            campaign_id, window
        );

        let rows = traced(
            "region_rollup",
            campaign_id,
            self.store.region_rows(campaign_id, window).await,
        )?;

        let regions: Vec<RegionSummary> = rows
            .into_iter()
            .map(|r| RegionSummary {
                region: r.region,
                doctors_received: r.doctors_received,
                doctors_viewed: r.doctors_viewed,
                active_field_reps: r.active_field_reps,
            })
            .collect();
        debug!("Aggregator: region_rollup {} regions", regions.len());
        Ok(regions)
    }

    /// 重复注册明细：每个手机号的首行为首位招募，其余为重复
    pub async fn duplicate_doctors(&self, campaign_id: &str) -> Result<Vec<DuplicateDoctor>> {
        let campaign_id = require_campaign(campaign_id)?;
        info!("Aggregator: duplicate_doctors campaign={}", campaign_id);

        let rows = traced(
            "duplicate_doctors",
            campaign_id,
            self.store.list_repeated_registrations(campaign_id).await,
        )?;

        let mut result = Vec::with_capacity(rows.len());
        let mut first: Option<(String, String)> = None;
        for row in rows {
            let (role, first_field_id) = match &first {
                Some((phone, field_id)) if phone == &row.phone => {
                    (RecruitmentRole::Duplicate, field_id.clone())
                }
                _ => {
                    first = Some((row.phone.clone(), row.field_id.clone()));
                    (RecruitmentRole::FirstRecruiter, row.field_id.clone())
                }
            };
            result.push(DuplicateDoctor {
                id: row.id,
                phone: row.phone,
                name: row.name,
                field_id: row.field_id,
                registered_at: row.registered_at,
                role,
                first_field_id,
            });
        }

        debug!("Aggregator: duplicate_doctors {} rows", result.len());
        Ok(result)
    }

    async fn snapshot(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
    ) -> Result<EngagementSnapshot> {
        let (unique_counts, received_tiers, viewed_tiers) = tokio::try_join!(
            self.unique_counts(campaign_id, window),
            self.collateral_tier_distribution(campaign_id, window, EngagementMode::Received),
            self.collateral_tier_distribution(campaign_id, window, EngagementMode::Viewed),
        )?;
        Ok(EngagementSnapshot {
            window,
            unique_counts,
            received_tiers,
            viewed_tiers,
        })
    }

    /// 看板与档位导出共用的周环比：代表注册、医生注册、分享事务
    pub async fn summary_trends(
        &self,
        campaign_id: &str,
        reference: DateTime<Utc>,
    ) -> Result<Vec<Trend>> {
        let (field_reps, doctors, shared) = tokio::try_join!(
            self.week_over_week_trend(&MetricSelector::RegisteredFieldReps, campaign_id, reference),
            self.week_over_week_trend(&MetricSelector::RegisteredDoctors, campaign_id, reference),
            self.week_over_week_trend(&MetricSelector::SharedTransactions, campaign_id, reference),
        )?;
        Ok(vec![field_reps, doctors, shared])
    }

    /// 品牌看板概览：累计 + 最近 N 天 + 周环比
    pub async fn campaign_summary(
        &self,
        campaign_id: &str,
        window: Option<DateWindow>,
        today: DateTime<Utc>,
    ) -> Result<CampaignSummary> {
        let campaign_id = require_campaign(campaign_id)?;
        info!(
            "Aggregator: campaign_summary campaign={} window={:?} today={}",
            campaign_id, window, today
        );

        let recent_window = trailing_window(today, self.recent_days);
        let find_campaign = async {
            traced(
                "find_campaign",
                campaign_id,
                self.store.find_campaign(campaign_id).await,
            )
        };
        let (campaign, cumulative, recent, trends) = tokio::try_join!(
            find_campaign,
            self.snapshot(campaign_id, window),
            self.snapshot(campaign_id, Some(recent_window)),
            self.summary_trends(campaign_id, today),
        )?;

        let span = campaign.as_ref().map(|c| CampaignSpan {
            start: c.start_date,
            end: today.date_naive(),
        });

        Ok(CampaignSummary {
            campaign_id: campaign_id.to_string(),
            campaign,
            span,
            cumulative,
            recent,
            trends,
        })
    }
}
