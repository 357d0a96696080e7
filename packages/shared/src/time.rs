//! Time-related utilities with clock abstraction for testability.
//!
//! User-facing timestamps are rendered in CST (UTC+8), the timezone of the
//! chat room's audience.

use chrono::{FixedOffset, TimeZone, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp in milliseconds
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        current_timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn cst_offset() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap() // CST is UTC+8
}

/// Convert Unix timestamp (milliseconds) to CST RFC 3339 format
pub fn timestamp_to_cst_rfc3339(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis / 1000;
    let nanos = ((timestamp_millis % 1000) * 1_000_000) as u32;
    match cst_offset().timestamp_opt(seconds, nanos).single() {
        Some(dt) => dt.to_rfc3339(),
        None => String::new(),
    }
}

/// Format Unix timestamp (milliseconds) as a CST date-time string
/// (`YYYY-MM-DD HH:MM:SS`), the format used in chat-visible text.
pub fn format_cst_datetime(timestamp_millis: i64) -> String {
    let seconds = timestamp_millis / 1000;
    let nanos = ((timestamp_millis % 1000) * 1_000_000) as u32;
    match cst_offset().timestamp_opt(seconds, nanos).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_non_zero_timestamp() {
        // テスト項目: SystemClock が 0 以外のタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加するタイムスタンプを返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let timestamp1 = clock.now_millis();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let timestamp2 = clock.now_millis();

        // then (期待する結果):
        assert!(timestamp2 >= timestamp1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_timestamp() {
        // テスト項目: FixedClock が固定されたタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 1234567890123;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp, fixed_time);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じタイムスタンプを返す
        // given (前提条件):
        let fixed_time = 9876543210987;
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let timestamp1 = clock.now_millis();
        let timestamp2 = clock.now_millis();
        let timestamp3 = clock.now_millis();

        // then (期待する結果):
        assert_eq!(timestamp1, fixed_time);
        assert_eq!(timestamp2, fixed_time);
        assert_eq!(timestamp3, fixed_time);
    }

    #[test]
    fn test_timestamp_to_cst_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 CST in milliseconds
        let timestamp = 1672502400000;

        // when (操作):
        let result = timestamp_to_cst_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.contains("+08:00"));
    }

    #[test]
    fn test_format_cst_datetime() {
        // テスト項目: タイムスタンプが `YYYY-MM-DD HH:MM:SS` 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 CST in milliseconds
        let timestamp = 1672502400000;

        // when (操作):
        let result = format_cst_datetime(timestamp);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01 00:00:00");
    }

    #[test]
    fn test_format_cst_datetime_ignores_sub_second_part() {
        // テスト項目: ミリ秒部分は表示に含まれない
        // given (前提条件):
        let timestamp = 1672502400123;

        // when (操作):
        let result = format_cst_datetime(timestamp);

        // then (期待する結果):
        assert_eq!(result, "2023-01-01 00:00:00");
    }

    #[test]
    fn test_current_timestamp_millis_returns_positive_value() {
        // テスト項目: current_timestamp_millis が正の値を返す
        // given (前提条件):

        // when (操作):
        let timestamp = current_timestamp_millis();

        // then (期待する結果):
        assert!(timestamp > 0);
    }
}
