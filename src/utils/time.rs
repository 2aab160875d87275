//! Date parsing and id generation

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};

/// Formats tried, in order, when reading an event's display date
const DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // December 21, 2024
    "%b %d, %Y", // Dec 21, 2024
    "%B %d %Y",  // December 21 2024
    "%d %B %Y",  // 21 December 2024
    "%Y-%m-%d",  // 2024-12-21
    "%m/%d/%Y",  // 12/21/2024
];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
    "mon",
    "tue",
    "wed",
    "thu",
    "fri",
    "sat",
    "sun",
];

/// Get current Unix timestamp in milliseconds
pub fn current_timestamp_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Parse an event display date into a calendar date.
///
/// Returns `None` for anything not recognized; callers sort those last.
pub fn parse_event_date(input: &str) -> Option<NaiveDate> {
    let trimmed = strip_weekday(input.trim());
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Sort key for an event date: every parseable date orders before every
/// unparsable one, whatever the parsed value.
pub fn event_date_sort_key(input: &str) -> (bool, NaiveDate) {
    match parse_event_date(input) {
        Some(date) => (false, date),
        None => (true, NaiveDate::MAX),
    }
}

/// Drop a leading "Saturday, " style prefix
fn strip_weekday(input: &str) -> &str {
    if let Some((head, rest)) = input.split_once(',') {
        if WEEKDAYS.contains(&head.trim().to_ascii_lowercase().as_str()) {
            return rest.trim();
        }
    }
    input
}

/// Issues unique, strictly increasing record ids derived from the
/// millisecond clock.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id; never repeats within this generator even if the clock stalls
    /// or steps backwards.
    pub fn next_id(&self) -> String {
        let now = current_timestamp_millis();
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_long_month_format() {
        assert_eq!(
            parse_event_date("December 21, 2024"),
            NaiveDate::from_ymd_opt(2024, 12, 21)
        );
        assert_eq!(
            parse_event_date("March 3, 2025"),
            NaiveDate::from_ymd_opt(2025, 3, 3)
        );
    }

    #[test]
    fn test_parse_other_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 21);
        assert_eq!(parse_event_date("2024-12-21"), expected);
        assert_eq!(parse_event_date("12/21/2024"), expected);
        assert_eq!(parse_event_date("Dec 21, 2024"), expected);
        assert_eq!(parse_event_date("Saturday, December 21, 2024"), expected);
        assert_eq!(parse_event_date("2024-12-21T20:00:00Z"), expected);
        assert_eq!(parse_event_date("  December 21, 2024  "), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_event_date("not-a-date"), None);
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("TBA"), None);
        assert_eq!(parse_event_date("February 30, 2025"), None);
    }

    #[test]
    fn test_unparsable_sorts_after_far_future() {
        let far = event_date_sort_key("December 31, 9999");
        let bad = event_date_sort_key("soon");
        assert!(far < bad);
        assert!(event_date_sort_key("January 1, 2020") < far);
    }

    #[test]
    fn test_id_generator_is_unique_and_increasing() {
        let ids = IdGenerator::new();
        let issued: Vec<u64> = (0..500)
            .map(|_| ids.next_id().parse().unwrap())
            .collect();

        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        let unique: HashSet<_> = issued.iter().collect();
        assert_eq!(unique.len(), issued.len());
    }
}
