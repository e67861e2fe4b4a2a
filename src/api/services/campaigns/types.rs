//! Campaign report API 类型定义

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::analytics::TierDistribution;
use crate::storage::{DateWindow, EngagementMode, TS_EXPORT_PATH};

/// 统一响应信封
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// 时间窗口查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct WindowQuery {
    /// 开始日期 (RFC3339 或 YYYY-MM-DD)
    pub start_date: Option<String>,
    /// 结束日期 (RFC3339 或 YYYY-MM-DD，仅日期时包含当天)
    pub end_date: Option<String>,
}

/// 档位分布查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TierQuery {
    /// received | viewed，默认 received
    pub mode: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// 趋势查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TrendQuery {
    pub metric: Option<String>,
    /// 参考时间，默认当前时间
    pub reference_date: Option<String>,
}

/// 档位分布响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct TiersResponse {
    pub campaign_id: String,
    pub mode: EngagementMode,
    pub window: Option<DateWindow>,
    pub tiers: TierDistribution,
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub store: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub catalog_entries: usize,
    pub uptime_seconds: i64,
    pub response_time_ms: u64,
}
