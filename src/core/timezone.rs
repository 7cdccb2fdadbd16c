use chrono::{DateTime, FixedOffset, Utc};

const JAKARTA_OFFSET_SECS: i32 = 7 * 3600;

/// Format expected by the gateway's `datetime` request field
pub const GATEWAY_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Convert UTC timestamp to Asia/Jakarta timezone (UTC+7)
pub fn utc_to_jakarta(utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
    let jakarta_offset = FixedOffset::east_opt(JAKARTA_OFFSET_SECS).expect("Valid offset");
    utc_time.with_timezone(&jakarta_offset)
}

/// Gateway wall-clock timestamp, e.g. `2025-11-01 17:00:00`
pub fn gateway_datetime(utc_time: DateTime<Utc>) -> String {
    utc_to_jakarta(utc_time)
        .format(GATEWAY_DATETIME_FORMAT)
        .to_string()
}
