use std::fmt;

use actix_web::http::StatusCode;
use sea_orm::DbErr;

#[derive(Debug, Clone)]
pub enum InsightsError {
    DatabaseConfig(String),
    StoreUnavailable(String),
    QueryFailed(String),
    InvalidDateRange(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    FileOperation(String),
}

impl InsightsError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            InsightsError::DatabaseConfig(_) => "E001",
            InsightsError::StoreUnavailable(_) => "E002",
            InsightsError::QueryFailed(_) => "E003",
            InsightsError::InvalidDateRange(_) => "E004",
            InsightsError::Validation(_) => "E005",
            InsightsError::NotFound(_) => "E006",
            InsightsError::Serialization(_) => "E007",
            InsightsError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            InsightsError::DatabaseConfig(_) => "Database Configuration Error",
            InsightsError::StoreUnavailable(_) => "Store Unavailable",
            InsightsError::QueryFailed(_) => "Query Failed",
            InsightsError::InvalidDateRange(_) => "Invalid Date Range",
            InsightsError::Validation(_) => "Validation Error",
            InsightsError::NotFound(_) => "Resource Not Found",
            InsightsError::Serialization(_) => "Serialization Error",
            InsightsError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            InsightsError::DatabaseConfig(msg)
            | InsightsError::StoreUnavailable(msg)
            | InsightsError::QueryFailed(msg)
            | InsightsError::InvalidDateRange(msg)
            | InsightsError::Validation(msg)
            | InsightsError::NotFound(msg)
            | InsightsError::Serialization(msg)
            | InsightsError::FileOperation(msg) => msg,
        }
    }

    /// HTTP 状态码映射
    pub fn http_status(&self) -> StatusCode {
        match self {
            InsightsError::InvalidDateRange(_) | InsightsError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            InsightsError::NotFound(_) => StatusCode::NOT_FOUND,
            InsightsError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            InsightsError::DatabaseConfig(_)
            | InsightsError::QueryFailed(_)
            | InsightsError::Serialization(_)
            | InsightsError::FileOperation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 格式化为彩色输出（用于 Server 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 CLI 模式）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for InsightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for InsightsError {}

// 便捷的构造函数
impl InsightsError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        InsightsError::DatabaseConfig(msg.into())
    }

    pub fn store_unavailable<T: Into<String>>(msg: T) -> Self {
        InsightsError::StoreUnavailable(msg.into())
    }

    pub fn query_failed<T: Into<String>>(msg: T) -> Self {
        InsightsError::QueryFailed(msg.into())
    }

    pub fn invalid_date_range<T: Into<String>>(msg: T) -> Self {
        InsightsError::InvalidDateRange(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        InsightsError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        InsightsError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        InsightsError::Serialization(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        InsightsError::FileOperation(msg.into())
    }
}

/// 连接类错误视为存储不可用，其余为查询失败
impl From<DbErr> for InsightsError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                InsightsError::StoreUnavailable(err.to_string())
            }
            other => InsightsError::QueryFailed(other.to_string()),
        }
    }
}

impl From<std::io::Error> for InsightsError {
    fn from(err: std::io::Error) -> Self {
        InsightsError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        InsightsError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for InsightsError {
    fn from(err: csv::Error) -> Self {
        InsightsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for InsightsError {
    fn from(err: chrono::ParseError) -> Self {
        InsightsError::InvalidDateRange(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, InsightsError>;
