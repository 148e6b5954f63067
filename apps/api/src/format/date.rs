use chrono::NaiveDate;

/// Formats a stored `YYYY-MM` (or `YYYY-MM-DD`) date as `Mon YYYY`.
///
/// Empty input yields an empty string. Anything else that does not parse is
/// returned unchanged, so re-formatting a malformed value is a fixed point.
pub fn format_date(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    match parse_year_month(trimmed) {
        Some(date) => date.format("%b %Y").to_string(),
        None => value.to_string(),
    }
}

fn parse_year_month(value: &str) -> Option<NaiveDate> {
    let mut parts = value.split('-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let numeric = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    if !numeric(year, 4) || !numeric(month, 2) || day.is_some_and(|d| !numeric(d, 2)) {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if let Some(day) = day {
        // Reject impossible full dates like 2022-02-31.
        NaiveDate::from_ymd_opt(year, month, day.parse().ok()?)?;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Builds `"<start> - <end>"`, where `is_current` forces the end to `Present`.
///
/// Empty halves are dropped; `None` when neither side has a value.
pub fn date_range(start: &str, end: &str, is_current: bool) -> Option<String> {
    let start = format_date(start);
    let end = if is_current {
        "Present".to_string()
    } else {
        format_date(end)
    };

    let parts: Vec<String> = [start, end].into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" - "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_year_month() {
        assert_eq!(format_date("2022-03"), "Mar 2022");
        assert_eq!(format_date("2019-12"), "Dec 2019");
        assert_eq!(format_date(" 2022-01 "), "Jan 2022");
        assert_eq!(format_date("2022-03-15"), "Mar 2022");
    }

    #[test]
    fn test_empty_is_empty() {
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("   "), "");
    }

    #[test]
    fn test_malformed_returns_raw_and_is_fixed_point() {
        for raw in ["Spring 2021", "2022-13", "20-01", "abcd-ef", "2022", "2022-02-31", "2022-1"] {
            let once = format_date(raw);
            assert_eq!(once, raw);
            assert_eq!(format_date(&once), raw);
        }
    }

    #[test]
    fn test_date_range_current_overrides_end() {
        assert_eq!(
            date_range("2022-01", "2023-05", true).as_deref(),
            Some("Jan 2022 - Present")
        );
        assert_eq!(
            date_range("2022-01", "", true).as_deref(),
            Some("Jan 2022 - Present")
        );
    }

    #[test]
    fn test_date_range_partial_and_empty() {
        assert_eq!(
            date_range("2020-06", "2021-02", false).as_deref(),
            Some("Jun 2020 - Feb 2021")
        );
        assert_eq!(date_range("2020-06", "", false).as_deref(), Some("Jun 2020"));
        assert_eq!(date_range("", "", false), None);
    }
}
