//! Engagement aggregation
//!
//! Turns the collateral transaction log and the doctor / field rep roster
//! into campaign rollups: unique counts, tier distributions, recruitment
//! attribution, week-over-week trends, per-collateral and per-region
//! breakdowns. Stateless: every call reads through the injected store.

mod aggregator;
pub mod catalog;
pub mod recruitment;
pub mod tiers;
pub mod trend;
pub mod types;
pub mod window;

use crate::storage::TS_EXPORT_PATH;

pub use aggregator::EngagementAggregator;
pub use catalog::CollateralCatalog;
pub use recruitment::{RecruitmentRow, RecruitmentTable, RecruitmentTally};
pub use tiers::{Tier, TierDistribution};
pub use trend::{MetricSelector, Trend, TrendMetric, trend_percentage, trend_windows};
pub use types::*;
pub use window::{parse_reference_date, parse_window, trailing_window};
