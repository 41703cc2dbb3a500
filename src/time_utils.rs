// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format the "<Month name> <Day>" part of a workout description.
pub fn format_description_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_description_date_has_no_padding() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        assert_eq!(format_description_date(date), "March 5");
    }

    #[test]
    fn test_rfc3339_uses_z_suffix() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(format_utc_rfc3339(date), "2024-01-15T10:30:00.000Z");
    }
}
