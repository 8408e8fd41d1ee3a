// src/datefmt.rs
//
// Single home for the date/time string handling the public pages need.
// Fixtures store their date and kick-off time as strings exactly as the admin
// entered them; everything display-facing goes through these functions.

use chrono::NaiveDate;

/// Parses the recognized stored date shapes: "YYYY-MM-DD", "DD/MM/YYYY", or a
/// full ISO datetime whose date prefix is taken.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Some(date);
    }
    if let Some(prefix) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }
    None
}

/// "Saturday 14 March" style display label.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%A %-d %B").to_string()
}

/// "March 2026" grouping label. Fixtures are bucketed by this, so grouping
/// follows the calendar month of the match date rather than the raw string.
pub fn format_month_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Normalizes any recognized hour:minute[am/pm] shape into a 12-hour string
/// with no leading zero, e.g. "09:00" -> "9:00 AM", "21:00" -> "9:00 PM".
/// Malformed input is returned unchanged.
pub fn normalize_time(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();

    let (body, meridiem) = if let Some(rest) = lower.strip_suffix("am") {
        (rest.trim_end(), Some("AM"))
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest.trim_end(), Some("PM"))
    } else {
        (lower.as_str(), None)
    };

    let mut parts = body.splitn(3, ':');
    let (hour_part, minute_part) = match (parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), None) => (h.trim(), m.trim()),
        _ => return raw.to_string(),
    };

    let hour: u32 = match hour_part.parse() {
        Ok(value) => value,
        Err(_) => return raw.to_string(),
    };
    let minute: u32 = match minute_part.parse() {
        Ok(value) => value,
        Err(_) => return raw.to_string(),
    };
    if minute > 59 {
        return raw.to_string();
    }

    match meridiem {
        Some(suffix) => {
            // Already 12-hour; just strip the leading zero and tidy the suffix.
            if hour == 0 || hour > 12 {
                return raw.to_string();
            }
            format!("{}:{:02} {}", hour, minute, suffix)
        }
        None => {
            if hour > 23 {
                return raw.to_string();
            }
            let (display_hour, suffix) = match hour {
                0 => (12, "AM"),
                12 => (12, "PM"),
                h if h > 12 => (h - 12, "PM"),
                h => (h, "AM"),
            };
            format!("{}:{:02} {}", display_hour, minute, suffix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_date("2026-03-14"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn parses_slash_date() {
        assert_eq!(
            parse_date("14/03/2026"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn parses_datetime_prefix() {
        assert_eq!(
            parse_date("2026-03-14T15:00:00Z"),
            NaiveDate::from_ymd_opt(2026, 3, 14)
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert_eq!(parse_date("next saturday"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn date_label_has_no_leading_zero() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(format_date_label(date), "Saturday 7 March");
    }

    #[test]
    fn month_label_is_month_and_year() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        assert_eq!(format_month_label(date), "March 2026");
    }

    #[test]
    fn morning_time_with_suffix_kept_as_am() {
        assert_eq!(normalize_time("9:00 AM"), "9:00 AM");
    }

    #[test]
    fn padded_24h_morning_normalizes() {
        assert_eq!(normalize_time("09:00"), "9:00 AM");
    }

    #[test]
    fn evening_24h_normalizes_to_pm() {
        assert_eq!(normalize_time("21:00"), "9:00 PM");
    }

    #[test]
    fn midnight_and_noon() {
        assert_eq!(normalize_time("00:30"), "12:30 AM");
        assert_eq!(normalize_time("12:00"), "12:00 PM");
    }

    #[test]
    fn lowercase_suffix_without_space() {
        assert_eq!(normalize_time("3:15pm"), "3:15 PM");
    }

    #[test]
    fn malformed_times_returned_unchanged() {
        assert_eq!(normalize_time("kick-off"), "kick-off");
        assert_eq!(normalize_time("25:00"), "25:00");
        assert_eq!(normalize_time("9:75"), "9:75");
        assert_eq!(normalize_time("13:00 PM"), "13:00 PM");
    }
}
