use chrono::{DateTime, Utc};

pub fn get_utc_iso_datetime() -> String {
    let timestamp = Utc::now().to_rfc3339();
    return timestamp;
}

/// Convert a spreadsheet serial day number into a calendar date, using
/// `epoch_offset_days` as the serial number of 1970-01-01.
/// Returns `None` when the result falls outside chrono's range.
pub fn serial_to_utc_datetime(serial: f64, epoch_offset_days: i64) -> Option<DateTime<Utc>> {
    if !serial.is_finite() {
        return None;
    }
    let unix_days = serial - epoch_offset_days as f64;
    let seconds = (unix_days * 86_400.0).round();
    if seconds < i64::MIN as f64 || seconds > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(seconds as i64, 0)
}
