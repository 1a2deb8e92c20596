//! Plain-text status report.
//!
//! ```text
//! IP: 203.0.113.9
//! Updated: January 1, 2024 17:30:00
//! ```

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::record::IpRecord;

/// Indian Standard Time, UTC+05:30. IST has no daylight saving.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// IST as a chrono offset. `east_opt` only refuses offsets beyond +-24h.
pub fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// `<Month> <Day>, <Year> <HH:MM:SS>` in IST, 24-hour clock.
pub fn format_updated(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&ist())
        .format("%B %-d, %Y %H:%M:%S")
        .to_string()
}

/// Body served by the report route. No trailing newline.
pub fn render_report(record: &IpRecord) -> String {
    format!(
        "IP: {}\nUpdated: {}",
        record.ip,
        format_updated(record.recorded_at)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn ist_is_five_thirty_east() {
        assert_eq!(ist().local_minus_utc(), 19_800);
        let ts = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert_eq!(ts.with_timezone(&ist()).to_rfc3339(), "2024-06-01T05:30:00+05:30");
    }

    #[test]
    fn noon_utc_is_half_past_five_ist() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_updated(ts), "January 1, 2024 17:30:00");
    }

    #[test]
    fn offset_rolls_over_the_date() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 18, 45, 9).unwrap();
        assert_eq!(format_updated(ts), "January 1, 2024 00:15:09");
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let ts = Utc.with_ymd_and_hms(2024, 7, 4, 3, 4, 5).unwrap() + Duration::milliseconds(999);
        assert_eq!(format_updated(ts), "July 4, 2024 08:34:05");
    }

    #[test]
    fn report_body_shape() {
        let rec = IpRecord::new(
            "1.2.3.4",
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        );
        assert_eq!(
            render_report(&rec),
            "IP: 1.2.3.4\nUpdated: January 1, 2024 17:30:00"
        );
    }
}
