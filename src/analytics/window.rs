//! Date window parsing
//!
//! Accepts RFC3339 timestamps or bare `YYYY-MM-DD` days. A bare day used as
//! an end bound covers that whole day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::errors::{InsightsError, Result};
use crate::storage::DateWindow;

/// 解析为区间起点还是终点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// 解析单个日期，失败返回 None
pub fn parse_instant(s: &str, bound: Bound) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            let time = match bound {
                Bound::Start => NaiveTime::MIN,
                Bound::End => NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999)?,
            };
            Some(day.and_time(time).and_utc())
        })
}

/// 严格解析查询窗口
///
/// - 都未提供：不限时间（None）
/// - 只提供起点：起点 → 当前时间
/// - 只提供终点：1970-01-01 → 终点
/// - 格式错误或起点晚于终点：`InvalidDateRange`
pub fn parse_window(start: Option<&str>, end: Option<&str>) -> Result<Option<DateWindow>> {
    let start = start.filter(|s| !s.trim().is_empty());
    let end = end.filter(|s| !s.trim().is_empty());

    if start.is_none() && end.is_none() {
        return Ok(None);
    }

    let start_at = match start {
        Some(s) => parse_instant(s, Bound::Start).ok_or_else(|| {
            InsightsError::invalid_date_range(format!(
                "Invalid start date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                s
            ))
        })?,
        None => DateTime::<Utc>::UNIX_EPOCH,
    };
    let end_at = match end {
        Some(e) => parse_instant(e, Bound::End).ok_or_else(|| {
            InsightsError::invalid_date_range(format!(
                "Invalid end date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                e
            ))
        })?,
        None => Utc::now(),
    };

    if start_at > end_at {
        return Err(InsightsError::invalid_date_range(
            "Start date must not be later than end date",
        ));
    }

    Ok(Some(DateWindow::new(start_at, end_at)))
}

/// 解析趋势参考时间，缺省为当前时间；裸日期取当天结束
pub fn parse_reference_date(reference: Option<&str>) -> Result<DateTime<Utc>> {
    match reference.filter(|s| !s.trim().is_empty()) {
        Some(r) => parse_instant(r, Bound::End).ok_or_else(|| {
            InsightsError::invalid_date_range(format!(
                "Invalid reference date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                r
            ))
        }),
        None => Ok(Utc::now()),
    }
}

/// `[reference - days, reference]`
pub fn trailing_window(reference: DateTime<Utc>, days: i64) -> DateWindow {
    DateWindow::new(reference - Duration::days(days), reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_absent_bounds_mean_unbounded() {
        assert_eq!(parse_window(None, None).unwrap(), None);
        assert_eq!(parse_window(Some(""), Some("  ")).unwrap(), None);
    }

    #[test]
    fn test_bare_end_day_covers_whole_day() {
        let window = parse_window(Some("2024-01-01"), Some("2024-01-31"))
            .unwrap()
            .unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(window.contains(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()));
        assert!(!window.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_rfc3339_is_taken_verbatim() {
        let window = parse_window(Some("2024-01-01T08:00:00+08:00"), Some("2024-01-02T00:00:00Z"))
            .unwrap()
            .unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_start_after_end_is_rejected() {
        let err = parse_window(Some("2024-02-01"), Some("2024-01-01")).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidDateRange(_)));
    }

    #[test]
    fn test_malformed_date_is_rejected() {
        let err = parse_window(Some("01/02/2024"), None).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidDateRange(_)));
        assert!(err.message().contains("01/02/2024"));
    }

    #[test]
    fn test_open_start_defaults_to_epoch() {
        let window = parse_window(None, Some("2024-01-31")).unwrap().unwrap();
        assert_eq!(window.start, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_reference_date_bare_day_is_end_of_day() {
        let reference = parse_reference_date(Some("2024-03-10")).unwrap();
        assert_eq!(
            reference.date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert!(reference > Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap());
        assert!(parse_reference_date(Some("yesterday")).is_err());
    }

    #[test]
    fn test_trailing_window() {
        let reference = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        let window = trailing_window(reference, 7);
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 3, 8, 12, 0, 0).unwrap());
        assert_eq!(window.end, reference);
    }
}
