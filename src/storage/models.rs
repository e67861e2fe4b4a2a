use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use ts_rs::TS;

/// ts-rs 类型输出路径（analytics / api 共用）
pub const TS_EXPORT_PATH: &str = "../brand-dashboard/src/services/types.generated.ts";

/// 闭区间时间窗口 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

/// 统计口径：收到（任意事务）或已查看（viewed = true）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, TS,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub enum EngagementMode {
    Received,
    Viewed,
}

/// 事务分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TransactionKind {
    /// 分享类事务（comment 不是查看 / 下载回执）
    Shared,
    /// viewed = true
    Viewed,
}

/// 非分享类事务的 comment 取值
pub const VIEW_EVENT_COMMENTS: [&str; 4] = [
    "collateral viewed",
    "Video Viewed",
    "PDF Downloaded",
    "PDF viewed",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct Campaign {
    pub campaign_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// 医生注册行（按 id 升序扫描）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: i64,
    pub field_id: String,
    pub phone: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, TS,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub enum CollateralKind {
    Pdf,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollateralInfo {
    pub id: i64,
    pub title: String,
    pub kind: CollateralKind,
}

/// 某个 collateral_count 上的医生数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramBucket {
    pub collateral_count: u64,
    pub doctors: u64,
}

/// 单个 collateral 的去重医生计数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollateralDetailRow {
    pub collateral_id: i64,
    pub received: u64,
    pub viewed: u64,
    pub pdf_downloaded: u64,
    pub pdf_last_page: u64,
    pub video_below_half: u64,
    pub video_above_half: u64,
    pub video_completed: u64,
}

/// 代表没有大区信息时的归类名
pub const UNASSIGNED_REGION: &str = "Unassigned";

/// 按大区聚合的行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRow {
    pub region: String,
    pub doctors_received: u64,
    pub doctors_viewed: u64,
    pub active_field_reps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ts_export_path_is_the_dashboard_types_file() {
        assert_eq!(
            TS_EXPORT_PATH,
            "../brand-dashboard/src/services/types.generated.ts"
        );
    }

    #[test]
    fn test_date_window_contains_both_bounds() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 7, 0, 0, 0).unwrap();
        let window = DateWindow::new(start, end);
        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(!window.contains(end + chrono::Duration::seconds(1)));
    }
}
