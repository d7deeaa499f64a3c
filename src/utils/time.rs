use chrono::NaiveDateTime;

/// Splits a reservation time into the `rdate` (`YYYYMMDD`) and `rtime` (`HHMM`) fields.
pub fn reservation_parts(at: &NaiveDateTime) -> (String, String) {
    (at.format("%Y%m%d").to_string(), at.format("%H%M").to_string())
}
