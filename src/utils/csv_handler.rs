//! CSV 报表渲染
//!
//! 将聚合结果写成 CSV，供 HTTP 导出接口和 CLI 使用

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::warn;

use crate::analytics::{CollateralDetail, RecruitmentTable, TierDistribution, Trend};
use crate::errors::{InsightsError, Result};

/// 档位分布 CSV 表头：标识、档位、周环比
pub const TIER_CSV_HEADER: [&str; 12] = [
    "Campaign",
    "Received 1",
    "Received 2-5",
    "Received 6-10",
    "Received 11+",
    "Viewed 1",
    "Viewed 2-5",
    "Viewed 6-10",
    "Viewed 11+",
    "Field Reps WoW %",
    "Doctors WoW %",
    "Shared WoW %",
];

/// collateral 明细 CSV 表头
pub const COLLATERAL_CSV_HEADER: [&str; 10] = [
    "Collateral ID",
    "Title",
    "Type",
    "Received",
    "Viewed",
    "PDF Downloaded",
    "PDF Last Page",
    "Video <50%",
    "Video >50%",
    "Video 100%",
];

/// 代表招募 CSV 表头
pub const RECRUITMENT_CSV_HEADER: [&str; 3] = ["Field ID", "Unique Doctors", "Same Doctors"];

/// 档位分布 CSV 行，字段顺序与 [`TIER_CSV_HEADER`] 一致
#[derive(Debug, Clone, Serialize)]
pub struct TierCsvRow<'a> {
    pub campaign: &'a str,
    pub received_1: u64,
    pub received_2_5: u64,
    pub received_6_10: u64,
    pub received_11_plus: u64,
    pub viewed_1: u64,
    pub viewed_2_5: u64,
    pub viewed_6_10: u64,
    pub viewed_11_plus: u64,
    pub field_reps_trend: String,
    pub doctors_trend: String,
    pub shared_trend: String,
}

/// 单个 collateral 明细 CSV 行，字段顺序与 [`COLLATERAL_CSV_HEADER`] 一致
#[derive(Debug, Clone, Serialize)]
pub struct CollateralCsvRow<'a> {
    pub collateral_id: i64,
    pub title: &'a str,
    pub kind: String,
    pub received: u64,
    pub viewed: u64,
    pub pdf_downloaded: u64,
    pub pdf_last_page: u64,
    pub video_below_half: u64,
    pub video_above_half: u64,
    pub video_completed: u64,
}

/// 代表招募 CSV 行
#[derive(Debug, Clone, Serialize)]
pub struct RecruitmentCsvRow<'a> {
    pub field_id: &'a str,
    pub unique_doctors: u64,
    pub same_doctors: u64,
}

impl<'a> From<&'a CollateralDetail> for CollateralCsvRow<'a> {
    fn from(detail: &'a CollateralDetail) -> Self {
        Self {
            collateral_id: detail.collateral_id,
            title: &detail.title,
            kind: detail.kind.map(|k| k.to_string()).unwrap_or_default(),
            received: detail.received,
            viewed: detail.viewed,
            pdf_downloaded: detail.pdf_downloaded,
            pdf_last_page: detail.pdf_last_page,
            video_below_half: detail.video.below_half,
            video_above_half: detail.video.above_half,
            video_completed: detail.video.completed,
        }
    }
}

/// 表头始终写出，空报表也只有表头行
fn write_rows<R: Serialize>(
    header: &[&str],
    rows: impl IntoIterator<Item = R>,
) -> Result<Vec<u8>> {
    let mut csv_writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    csv_writer
        .write_record(header)
        .map_err(|e| InsightsError::serialization(format!("Failed to write CSV header: {}", e)))?;
    for row in rows {
        csv_writer.serialize(row).map_err(|e| {
            InsightsError::serialization(format!("Failed to write CSV row: {}", e))
        })?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| InsightsError::serialization(format!("Failed to flush CSV: {}", e)))
}

fn capped<'a, T>(rows: &'a [T], limit: usize, report: &str) -> &'a [T] {
    if rows.len() > limit {
        warn!(
            "{} export truncated to {} of {} rows",
            report,
            limit,
            rows.len()
        );
        &rows[..limit]
    } else {
        rows
    }
}

fn trend_cell(trend: Option<&Trend>) -> String {
    format!("{:.2}", trend.map(|t| t.percentage).unwrap_or(0.0))
}

/// 档位分布 CSV（单行）
///
/// `trends` 依次为代表注册、医生注册、分享事务的周环比，缺失时记 0.00
pub fn tiers_to_csv(
    campaign_id: &str,
    received: &TierDistribution,
    viewed: &TierDistribution,
    trends: &[Trend],
) -> Result<Vec<u8>> {
    let row = TierCsvRow {
        campaign: campaign_id,
        received_1: received.one,
        received_2_5: received.two_to_five,
        received_6_10: received.six_to_ten,
        received_11_plus: received.eleven_plus,
        viewed_1: viewed.one,
        viewed_2_5: viewed.two_to_five,
        viewed_6_10: viewed.six_to_ten,
        viewed_11_plus: viewed.eleven_plus,
        field_reps_trend: trend_cell(trends.first()),
        doctors_trend: trend_cell(trends.get(1)),
        shared_trend: trend_cell(trends.get(2)),
    };
    write_rows(&TIER_CSV_HEADER, [row])
}

/// collateral 明细 CSV
pub fn collaterals_to_csv(details: &[CollateralDetail], limit: usize) -> Result<Vec<u8>> {
    write_rows(
        &COLLATERAL_CSV_HEADER,
        capped(details, limit, "Collateral")
            .iter()
            .map(CollateralCsvRow::from),
    )
}

/// 代表招募 CSV，末尾附 Total 行
pub fn recruitment_to_csv(table: &RecruitmentTable, limit: usize) -> Result<Vec<u8>> {
    let rows = capped(&table.rows, limit, "Recruitment")
        .iter()
        .map(|r| RecruitmentCsvRow {
            field_id: &r.field_id,
            unique_doctors: r.unique_doctors,
            same_doctors: r.duplicate_doctors,
        })
        .chain(std::iter::once(RecruitmentCsvRow {
            field_id: "Total",
            unique_doctors: table.total_unique_doctors,
            same_doctors: table.total_duplicate_doctors,
        }));
    write_rows(&RECRUITMENT_CSV_HEADER, rows)
}

/// 写出到文件
pub fn write_report<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let file = File::create(path.as_ref())
        .map_err(|e| InsightsError::file_operation(format!("Failed to create file: {}", e)))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content)?;
    writer
        .flush()
        .map_err(|e| InsightsError::file_operation(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}
