//! Vietnamese (vi-VN) presentation of numbers and dates.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone, Timelike};

/// Rendered in place of an absent limit.
pub const UNLIMITED: &str = "∞";

/// Group digits in threes with `.` as the vi-VN thousands separator.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// `15 tháng 3, 2025 lúc 14:30`
pub fn format_date_long<Tz: TimeZone>(ts: &DateTime<Tz>, offset: &FixedOffset) -> String {
    let local = ts.with_timezone(offset);
    format!(
        "{} tháng {}, {} lúc {:02}:{:02}",
        local.day(),
        local.month(),
        local.year(),
        local.hour(),
        local.minute()
    )
}

/// `15/3/2025`
pub fn format_date_short<Tz: TimeZone>(ts: &DateTime<Tz>, offset: &FixedOffset) -> String {
    let local = ts.with_timezone(offset);
    format!("{}/{}/{}", local.day(), local.month(), local.year())
}

/// `14:30:05 15/3/2025`
pub fn format_date_time<Tz: TimeZone>(ts: &DateTime<Tz>, offset: &FixedOffset) -> String {
    let local = ts.with_timezone(offset);
    format!(
        "{:02}:{:02}:{:02} {}",
        local.hour(),
        local.minute(),
        local.second(),
        format_date_short(&local, offset)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn ict() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }

    #[test]
    fn test_format_date_long_applies_offset() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 15, 7, 30, 0).unwrap();
        assert_eq!(format_date_long(&ts, &ict()), "15 tháng 3, 2025 lúc 14:30");
    }

    #[test]
    fn test_format_date_short_crosses_midnight() {
        let ts = Utc.with_ymd_and_hms(2025, 12, 31, 20, 0, 0).unwrap();
        assert_eq!(format_date_short(&ts, &ict()), "1/1/2026");
    }

    #[test]
    fn test_format_date_time() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 15, 7, 30, 5).unwrap();
        assert_eq!(format_date_time(&ts, &ict()), "14:30:05 15/3/2025");
    }
}
