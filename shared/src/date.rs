//! 时间展示模块
//!
//! 留言时间按 `Jan 5, 03:04 PM` 的格式显示（月份缩写、日、两位小时:分钟）。
//! 时区偏移由调用方提供，这样本模块不依赖浏览器环境。

use chrono::{DateTime, FixedOffset, Utc};

const DISPLAY_FORMAT: &str = "%b %-d, %I:%M %p";

/// 以 UTC 格式化
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// 以本地时区格式化
///
/// `offset_minutes` 与 JS `Date.getTimezoneOffset()` 的约定一致：
/// UTC 减去本地时间的分钟数（东八区为 -480）。
pub fn format_local(ts: &DateTime<Utc>, offset_minutes: i32) -> String {
    match FixedOffset::west_opt(offset_minutes.saturating_mul(60)) {
        Some(offset) => ts.with_timezone(&offset).format(DISPLAY_FORMAT).to_string(),
        None => format_utc(ts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
        assert_eq!(format_utc(&ts), "Jan 5, 03:04 PM");
    }

    #[test]
    fn test_format_local_applies_js_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
        // 东八区：getTimezoneOffset() == -480
        assert_eq!(format_local(&ts, -480), "Jan 5, 11:04 PM");
        // 西五区：getTimezoneOffset() == 300
        assert_eq!(format_local(&ts, 300), "Jan 5, 10:04 AM");
    }

    #[test]
    fn test_format_local_out_of_range_falls_back_to_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 9, 0, 30, 0).unwrap();
        assert_eq!(format_local(&ts, 100_000), "Mar 9, 12:30 AM");
    }
}
