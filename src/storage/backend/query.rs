//! Shared query helpers for the read-only store implementations

use sea_orm::{ColumnTrait, Condition, FromQueryResult};

use crate::storage::models::{DateWindow, Registration};
use migration::entities::doctor;

/// 单值 COUNT 结果
#[derive(Debug, FromQueryResult)]
pub(super) struct CountRow {
    pub count: i64,
}

/// campaign 精确匹配 + 可选闭区间时间过滤
pub(super) fn scoped<C: ColumnTrait>(
    campaign_col: C,
    campaign_id: &str,
    time_col: C,
    window: Option<DateWindow>,
) -> Condition {
    Condition::all()
        .add(campaign_col.eq(campaign_id))
        .add_option(window.map(|w| time_col.between(w.start, w.end)))
}

/// 数据库返回的 COUNT 统一转为 u64
pub(super) fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

impl From<doctor::Model> for Registration {
    fn from(model: doctor::Model) -> Self {
        Registration {
            id: model.id,
            field_id: model.field_id,
            phone: model.phone,
            name: model.name,
            registered_at: model.registered_at,
        }
    }
}
