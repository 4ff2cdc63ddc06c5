//! 时间工具模块
//! 提供时间处理相关的工具函数

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

/// 当前 Unix 时间戳（秒，含小数部分）
pub fn unix_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// 距离下一个每日触发时刻（UTC 整点）的等待时长
///
/// 今天的触发点已过则顺延到明天
pub fn duration_until_next_daily_run(hour_utc: u32) -> Duration {
    let now = Utc::now();
    let today_run = now
        .date_naive()
        .and_hms_opt(hour_utc.min(23), 0, 0)
        .unwrap_or_default()
        .and_utc();

    let next_run = if today_run > now {
        today_run
    } else {
        today_run + ChronoDuration::days(1)
    };

    (next_run - now).to_std().unwrap_or_default()
}

/// 格式化持续时间
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    #[test]
    fn test_unix_timestamp_is_sane() {
        let ts = unix_timestamp();
        // 2023-01-01 之后、2100-01-01 之前
        assert!(ts > 1_672_531_200.0);
        assert!(ts < 4_102_444_800.0);
    }

    #[test]
    fn test_next_daily_run_lands_on_requested_hour() {
        for hour in [0u32, 1, 8, 23] {
            let wait = duration_until_next_daily_run(hour);
            assert!(wait <= Duration::from_secs(24 * 3600));

            let next = Utc::now() + ChronoDuration::from_std(wait).unwrap();
            assert_eq!(next.hour(), hour);
            assert_eq!(next.minute(), 0);
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(3_661), "1h 1m 1s");
    }
}
