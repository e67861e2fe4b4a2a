//! Aggregation result types returned to the API, CLI and CSV layers

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use ts_rs::TS;

use super::TS_EXPORT_PATH;
use super::tiers::TierDistribution;
use super::trend::Trend;
use crate::storage::{Campaign, CollateralKind, DateWindow};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct UniqueCounts {
    pub unique_field_reps: u64,
    pub unique_doctors: u64,
}

/// 视频观看进度的去重医生拆分
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct VideoWatchSplit {
    pub below_half: u64,
    pub above_half: u64,
    pub completed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CollateralDetail {
    pub collateral_id: i64,
    pub title: String,
    /// 目录中不存在时为 null
    pub kind: Option<CollateralKind>,
    pub received: u64,
    pub viewed: u64,
    pub pdf_downloaded: u64,
    pub pdf_last_page: u64,
    pub video: VideoWatchSplit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct RegionSummary {
    pub region: String,
    pub doctors_received: u64,
    pub doctors_viewed: u64,
    pub active_field_reps: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub enum RecruitmentRole {
    FirstRecruiter,
    Duplicate,
}

/// 重复注册的医生行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DuplicateDoctor {
    pub id: i64,
    pub phone: String,
    pub name: String,
    pub field_id: String,
    pub registered_at: DateTime<Utc>,
    pub role: RecruitmentRole,
    /// 该手机号的首位招募代表
    pub first_field_id: String,
}

/// 某个窗口下的去重计数与档位分布
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct EngagementSnapshot {
    pub window: Option<DateWindow>,
    pub unique_counts: UniqueCounts,
    pub received_tiers: TierDistribution,
    pub viewed_tiers: TierDistribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CampaignSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// 品牌看板概览
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct CampaignSummary {
    pub campaign_id: String,
    pub campaign: Option<Campaign>,
    /// 活动开始 → 今天；未知活动为 null
    pub span: Option<CampaignSpan>,
    pub cumulative: EngagementSnapshot,
    pub recent: EngagementSnapshot,
    pub trends: Vec<Trend>,
}
