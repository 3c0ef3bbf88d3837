use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Provider identifiers are short stable slugs, e.g. `chicago`.
pub type ProviderId = String;

/// Parse a date as supplied by callers or providers.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps, naive ISO timestamps (with or
/// without fractional seconds, as Socrata emits them) and `MM/DD/YYYY`.
/// Returns `None` for blank or unrecognised input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(ts.date());
    }
    NaiveDate::parse_from_str(raw, "%m/%d/%Y").ok()
}

/// Trim a string and drop it entirely when nothing is left.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_date("2024-03-15"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn parses_socrata_floating_timestamp() {
        assert_eq!(
            parse_date("2024-03-15T00:00:00.000"),
            Some(ymd(2024, 3, 15))
        );
    }

    #[test]
    fn parses_rfc3339() {
        assert_eq!(
            parse_date("2024-03-15T10:30:00Z"),
            Some(ymd(2024, 3, 15))
        );
    }

    #[test]
    fn parses_us_format() {
        assert_eq!(parse_date("03/15/2024"), Some(ymd(2024, 3, 15)));
    }

    #[test]
    fn rejects_garbage_and_blank() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("   "), None);
    }

    #[test]
    fn non_blank_trims_and_drops_empty() {
        assert_eq!(non_blank(Some("  IL ".into())), Some("IL".to_string()));
        assert_eq!(non_blank(Some("   ".into())), None);
        assert_eq!(non_blank(None), None);
    }
}
