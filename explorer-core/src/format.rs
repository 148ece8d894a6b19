//! Display-only formatting for event dates and times. These never fail: input
//! that does not parse is shown as-is.

use chrono::NaiveDate;

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // Accept full timestamps by looking at the calendar-date prefix only.
    let day = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// `2025-03-15` → `March 15, 2025`
pub fn long_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

/// `2025-03-15` → `Mar 15`
pub fn short_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => date.format("%b %-d").to_string(),
        None => raw.to_string(),
    }
}

/// `7:00 PM - 10:00 PM` → `7:00 PM`
pub fn start_time(raw: &str) -> &str {
    raw.split_once(" - ").map_or(raw, |(start, _)| start)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_date() {
        assert_eq!(long_date("2025-03-15"), "March 15, 2025");
        assert_eq!(long_date("2025-11-02"), "November 2, 2025");
        assert_eq!(long_date("2025-03-15T19:00:00Z"), "March 15, 2025");
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date("2025-03-15"), "Mar 15");
        assert_eq!(short_date("2024-12-01"), "Dec 1");
    }

    #[test]
    fn test_unparseable_date_is_returned_verbatim() {
        assert_eq!(long_date("sometime soon"), "sometime soon");
        assert_eq!(short_date("TBD"), "TBD");
        assert_eq!(short_date(""), "");
    }

    #[test]
    fn test_start_time() {
        assert_eq!(start_time("7:00 PM - 10:00 PM"), "7:00 PM");
        assert_eq!(start_time("All day"), "All day");
        assert_eq!(start_time("9:00 AM-5:00 PM"), "9:00 AM-5:00 PM");
    }
}
