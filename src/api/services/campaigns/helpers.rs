//! Campaign report API 帮助函数

use std::str::FromStr;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::warn;

use crate::analytics::MetricSelector;
use crate::errors::InsightsError;
use crate::storage::EngagementMode;

use super::error_code::ErrorCode;
use super::types::ApiResponse;

/// 构建 JSON 响应
pub fn json_response<T: Serialize>(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
    data: Option<T>,
) -> HttpResponse {
    HttpResponse::build(status)
        .append_header(("Content-Type", "application/json; charset=utf-8"))
        .json(ApiResponse {
            code: code as i32,
            message: message.into(),
            data,
        })
}

/// 构建成功响应
pub fn success_response<T: Serialize>(data: T) -> HttpResponse {
    json_response(StatusCode::OK, ErrorCode::Success, "OK", Some(data))
}

/// 构建错误响应
pub fn error_response(status: StatusCode, error_code: ErrorCode, message: &str) -> HttpResponse {
    json_response::<()>(status, error_code, message, None)
}

/// 从 InsightsError 构建错误响应（自动映射 HTTP 状态码和 ErrorCode）
pub fn error_from_insights(err: &InsightsError) -> HttpResponse {
    let status = err.http_status();
    if status.is_server_error() {
        warn!("Request failed with {}: {}", status, err);
    }
    error_response(status, ErrorCode::from(err), err.message())
}

/// 统一 Result → HttpResponse 转换
pub fn api_result<T: Serialize>(result: Result<T, InsightsError>) -> HttpResponse {
    match result {
        Ok(data) => success_response(data),
        Err(e) => error_from_insights(&e),
    }
}

/// CSV 下载响应
pub fn csv_response(filename: &str, result: Result<Vec<u8>, InsightsError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            ))
            .body(body),
        Err(e) => error_from_insights(&e),
    }
}

/// 解析统计口径，缺省为 received
pub fn parse_mode(mode: Option<&str>) -> Result<EngagementMode, HttpResponse> {
    match mode.filter(|m| !m.is_empty()) {
        None => Ok(EngagementMode::Received),
        Some(m) => EngagementMode::from_str(m).map_err(|_| {
            error_response(
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidMode,
                &format!("Invalid mode: '{}'. Expected 'received' or 'viewed'", m),
            )
        }),
    }
}

/// 解析趋势指标
pub fn parse_metric(metric: Option<&str>) -> Result<MetricSelector, HttpResponse> {
    let Some(m) = metric.filter(|m| !m.is_empty()) else {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidMetric,
            "Query parameter 'metric' is required",
        ));
    };
    MetricSelector::from_str(m).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            ErrorCode::InvalidMetric,
            &format!(
                "Invalid metric: '{}'. Expected one of active_field_reps, registered_field_reps, \
                 registered_doctors, shared_transactions, viewed_transactions",
                m
            ),
        )
    })
}
