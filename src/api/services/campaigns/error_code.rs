//! 统一 API 错误码定义

use serde_repr::{Deserialize_repr, Serialize_repr};
use ts_rs::TS;

use crate::errors::InsightsError;
use crate::storage::TS_EXPORT_PATH;

/// API 错误码枚举
///
/// 使用 serde_repr 序列化为数字，ts-rs 自动生成 TypeScript 类型。
/// 按千位分域：
/// - 0: 成功
/// - 1000-1099: 通用错误
/// - 2000-2099: 报表查询错误
/// - 3000-3099: 导出错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr, TS)]
#[ts(export, export_to = TS_EXPORT_PATH)]
#[ts(rename = "ErrorCode")]
#[ts(repr(enum))]
#[repr(i32)]
pub enum ErrorCode {
    // 成功
    Success = 0,

    // 通用错误 1000-1099
    BadRequest = 1000,
    NotFound = 1004,
    InternalServerError = 1005,
    ServiceUnavailable = 1030,

    // 报表查询错误 2000-2099
    InvalidDateRange = 2000,
    InvalidMode = 2001,
    InvalidMetric = 2002,
    QueryFailed = 2003,
    StoreUnavailable = 2004,

    // 导出错误 3000-3099
    CsvGenerationError = 3000,
    ExportFailed = 3001,
}

impl From<&InsightsError> for ErrorCode {
    fn from(err: &InsightsError) -> Self {
        match err {
            InsightsError::InvalidDateRange(_) => ErrorCode::InvalidDateRange,
            InsightsError::Validation(_) => ErrorCode::BadRequest,
            InsightsError::NotFound(_) => ErrorCode::NotFound,
            InsightsError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            InsightsError::QueryFailed(_) => ErrorCode::QueryFailed,
            InsightsError::Serialization(_) => ErrorCode::CsvGenerationError,
            InsightsError::FileOperation(_) => ErrorCode::ExportFailed,
            InsightsError::DatabaseConfig(_) => ErrorCode::InternalServerError,
        }
    }
}
