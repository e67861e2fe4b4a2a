//! Week-over-week trend metrics

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use ts_rs::TS;

use super::TS_EXPORT_PATH;
use crate::errors::Result;
use crate::storage::{DateWindow, EngagementStore, TransactionKind};

/// 可插拔的趋势指标：在给定窗口内计数
#[async_trait]
pub trait TrendMetric: Send + Sync {
    fn name(&self) -> String;

    async fn count(
        &self,
        store: &dyn EngagementStore,
        campaign_id: &str,
        window: DateWindow,
    ) -> Result<u64>;
}

/// 内置指标
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    TS,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub enum MetricSelector {
    /// 窗口内有事务的去重代表
    ActiveFieldReps,
    /// 窗口内注册的去重代表
    RegisteredFieldReps,
    /// 窗口内注册的去重医生
    RegisteredDoctors,
    /// 分享类事务数
    SharedTransactions,
    /// 已查看事务数
    ViewedTransactions,
}

#[async_trait]
impl TrendMetric for MetricSelector {
    fn name(&self) -> String {
        self.to_string()
    }

    async fn count(
        &self,
        store: &dyn EngagementStore,
        campaign_id: &str,
        window: DateWindow,
    ) -> Result<u64> {
        match self {
            MetricSelector::ActiveFieldReps => {
                store.count_active_field_reps(campaign_id, window).await
            }
            MetricSelector::RegisteredFieldReps => {
                store
                    .count_distinct_field_reps(campaign_id, Some(window))
                    .await
            }
            MetricSelector::RegisteredDoctors => {
                store.count_distinct_doctors(campaign_id, Some(window)).await
            }
            MetricSelector::SharedTransactions => {
                store
                    .count_transactions(campaign_id, window, TransactionKind::Shared)
                    .await
            }
            MetricSelector::ViewedTransactions => {
                store
                    .count_transactions(campaign_id, window, TransactionKind::Viewed)
                    .await
            }
        }
    }
}

/// 趋势结果
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Trend {
    pub metric: String,
    pub current: u64,
    pub previous: u64,
    /// `(current - previous) / previous * 100`，previous 为 0 时为 0
    pub percentage: f64,
    pub current_window: DateWindow,
    pub previous_window: DateWindow,
}

/// 当前窗口 `[ref - days, ref]` 与上一窗口 `[ref - 2*days, ref - days]`
pub fn trend_windows(reference: DateTime<Utc>, days: i64) -> (DateWindow, DateWindow) {
    let boundary = reference - Duration::days(days);
    let current = DateWindow::new(boundary, reference);
    let previous = DateWindow::new(boundary - Duration::days(days), boundary);
    (current, previous)
}

/// 环比百分比，上一窗口为 0 时定义为 0
pub fn trend_percentage(current: u64, previous: u64) -> f64 {
    if previous == 0 {
        return 0.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}
