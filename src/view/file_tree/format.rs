//! Display formatting for the Size and Date Modified columns

use chrono::{DateTime, Local};
use std::time::{SystemTime, UNIX_EPOCH};

const KIB: i64 = 1024;
const MIB: i64 = KIB * 1024;
const GIB: i64 = MIB * 1024;

/// Format a byte count for the Size column
///
/// Picks the largest unit the value strictly exceeds. Zero and negative
/// values (the "not applicable" sentinel used by directories) format as an
/// empty string.
pub fn format_size(size: i64) -> String {
    if size <= 0 {
        return String::new();
    }
    if size > GIB {
        return format!("{:.2} GB", size as f64 / GIB as f64);
    }
    if size > MIB {
        return format!("{:.2} MB", size as f64 / MIB as f64);
    }
    if size > KIB {
        return format!("{:.2} KB", size as f64 / KIB as f64);
    }
    format!("{} B", size)
}

/// Format epoch seconds as local time, empty for 0
pub fn format_time(epoch_secs: i64) -> String {
    if epoch_secs == 0 {
        return String::new();
    }
    match DateTime::from_timestamp(epoch_secs, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => String::new(),
    }
}

/// Convert a modification time to epoch seconds, 0 if unavailable
///
/// Times before the epoch come out negative.
pub fn epoch_secs(time: Option<SystemTime>) -> i64 {
    match time.map(|t| t.duration_since(UNIX_EPOCH)) {
        Some(Ok(since)) => since.as_secs() as i64,
        Some(Err(e)) => -(e.duration().as_secs() as i64),
        None => 0,
    }
}
