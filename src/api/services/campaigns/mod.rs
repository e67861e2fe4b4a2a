//! Campaign report API
//!
//! 品牌经理前端使用的只读报表端点：
//! - 活动列表与看板概览
//! - 去重计数、档位分布、招募表、重复注册
//! - 周环比趋势
//! - collateral / 大区明细
//! - CSV 导出

pub mod error_code;
mod export;
mod handlers;
mod helpers;
pub mod routes;
mod types;

pub use error_code::ErrorCode;
pub use helpers::{api_result, error_from_insights, error_response, json_response, success_response};
pub use routes::{api_v1_routes, campaigns_routes};
pub use types::*;
