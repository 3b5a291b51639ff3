//! Cleaning and normalization of extracted transcript text.

use chrono::NaiveDateTime;
use regex::Regex;

/// Cleans text by removing unwanted patterns and normalizing whitespace.
///
/// Newlines/tabs collapse into single spaces, runs of whitespace are
/// squeezed, and the result is trimmed. Empty input stays empty.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut out = text.to_string();
    if let Ok(re) = Regex::new(r"[\r\n\t]+") {
        out = re.replace_all(&out, " ").into_owned();
    }
    if let Ok(re) = Regex::new(r"\s+") {
        out = re.replace_all(&out, " ").into_owned();
    }

    out.trim().to_string()
}

/// Parses a PDF date string (`D:YYYYMMDDHHmmSS...`) into an ISO 8601 timestamp.
///
/// Returns `None` for inputs without the `D:` prefix or with an unparseable
/// date body.
pub fn parse_pdf_date(date_str: &str) -> Option<String> {
    let body = date_str.strip_prefix("D:")?;

    // Take YYYYMMDDHHmmSS, drop any timezone suffix.
    let stamp = body.get(..14)?;
    let dt = NaiveDateTime::parse_from_str(stamp, "%Y%m%d%H%M%S").ok()?;
    Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        let raw = "Q3 revenue\twas strong.\r\n\r\nGuidance   raised.";
        assert_eq!(clean_text(raw), "Q3 revenue was strong. Guidance raised.");
    }

    #[test]
    fn empty_stays_empty() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
    }

    #[test]
    fn pdf_date_roundtrip() {
        assert_eq!(
            parse_pdf_date("D:20240215093000Z").as_deref(),
            Some("2024-02-15T09:30:00")
        );
        assert_eq!(parse_pdf_date("20240215093000"), None);
        assert_eq!(parse_pdf_date("D:2024"), None);
    }
}
