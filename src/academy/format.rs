//! Display formatting for record fields.
//!
//! All functions are pure and never fail: bad input yields a sentinel string
//! (`"N/A"`, `"Invalid Date"`) or is passed through unchanged.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const ELLIPSIS: char = '…';

/// Parses the date formats found in stored documents.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` and plain
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Short date such as `Jan 5, 2024`.
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_date(value) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Short date with a 12-hour clock, such as `Jan 5, 2024, 02:30 PM`.
pub fn format_date_time(value: &str) -> String {
    if value.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_date(value) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Converts `HH:MM` to a 12-hour clock. Input already carrying AM/PM, or not parseable
/// as hours and minutes, is returned as given.
pub fn format_time(value: &str) -> String {
    if value.is_empty() || value.contains("AM") || value.contains("PM") {
        return value.to_string();
    }
    let mut parts = value.splitn(2, ':');
    let (Some(h), Some(m)) = (parts.next(), parts.next()) else {
        return value.to_string();
    };
    let (Ok(hours), Ok(minutes)) = (h.trim().parse::<u32>(), m.trim().parse::<u32>()) else {
        return value.to_string();
    };
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display = match hours % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display, minutes, period)
}

/// Buckets the time elapsed since `value`.
///
/// `just now` under a minute (including future timestamps), then minutes, hours and days;
/// a week or more falls back to [`format_date`].
pub fn relative_time(value: &str, now: DateTime<Utc>) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    let Some(then) = parse_date(value) else {
        return format_date(value);
    };
    let secs = (now - then).num_seconds();
    let mins = secs.div_euclid(60);
    let hours = mins.div_euclid(60);
    let days = hours.div_euclid(24);

    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{} minute{} ago", mins, plural(mins))
    } else if hours < 24 {
        format!("{} hour{} ago", hours, plural(hours))
    } else if days < 7 {
        format!("{} day{} ago", days, plural(days))
    } else {
        format_date(value)
    }
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Shortens `text` to at most `max_chars` characters plus an ellipsis, breaking on the
/// last whitespace inside the limit when there is one.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    let kept = match cut.rfind(char::is_whitespace) {
        Some(pos) if pos > 0 => &cut[..pos],
        _ => cut.as_str(),
    };
    let mut out = kept.to_string();
    out.push(ELLIPSIS);
    out
}

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\d.\-]").expect("valid regex"));

/// Formats an amount with Indian digit grouping (`1,25,000`) behind `symbol`.
///
/// Formatting characters in string input are stripped first. Input with no number in
/// it is returned unchanged.
pub fn format_currency(amount: &str, symbol: &str) -> String {
    if amount.trim().is_empty() {
        return String::new();
    }
    let cleaned = NON_NUMERIC.replace_all(amount, "");
    let Ok(value) = cleaned.parse::<f64>() else {
        return amount.to_string();
    };
    if !value.is_finite() {
        return amount.to_string();
    }
    format!("{}{}", symbol, group_indian(value))
}

fn group_indian(value: f64) -> String {
    let negative = value < 0.0;
    // en-IN shows at most three fraction digits.
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    if digits.len() > 3 {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let lead = head.len() % 2;
        for (i, c) in head.iter().enumerate() {
            if i > 0 && (i + 2 - lead) % 2 == 0 {
                grouped.push(',');
            }
            grouped.push(*c);
        }
        grouped.push(',');
        grouped.extend(tail);
    } else {
        grouped.extend(digits);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

static SCRIPT_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<script\b[^>]*/?>").expect("valid regex"));
static OPEN_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[a-zA-Z][^>]*>").expect("valid regex"));
static EVENT_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+on[a-z0-9_-]*\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).expect("valid regex")
});
static SCRIPT_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\s+href\s*=\s*(?:"\s*javascript:[^"]*"|'\s*javascript:[^']*'|javascript:[^\s>]*)"#)
        .expect("valid regex")
});

/// Strips script elements, `on*` event handler attributes and `javascript:` links from
/// rich-text content before it is embedded in a page.
pub fn sanitize_html(html: &str) -> String {
    let without_scripts = SCRIPT_ELEMENT.replace_all(html, "");
    OPEN_TAG
        .replace_all(&without_scripts, |caps: &regex::Captures| {
            let tag = EVENT_ATTR.replace_all(&caps[0], "");
            SCRIPT_HREF.replace_all(&tag, "").into_owned()
        })
        .into_owned()
}

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").expect("valid regex"));

pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lower, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

/// Icon name for an attachment, chosen by file extension.
pub fn file_icon(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => "file-pdf",
        "doc" | "docx" => "file-word",
        "xls" | "xlsx" => "file-excel",
        "ppt" | "pptx" => "file-powerpoint",
        "jpg" | "jpeg" | "png" | "gif" => "file-image",
        "txt" => "file-alt",
        "zip" | "rar" => "file-archive",
        _ => "file",
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", size, UNITS[unit])
}

/// Ten digits display as `987-654-3210`; longer numbers get a country code prefix
/// (`+91 98765 43210`). Anything else is returned as given.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..]),
        n if n > 10 => {
            let (code, local) = digits.split_at(n - 10);
            format!("+{} {} {}", code, &local[..5], &local[5..])
        }
        _ => phone.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(value: &str) -> DateTime<Utc> {
        parse_date(value).unwrap()
    }

    #[test]
    fn date_sentinels() {
        assert_eq!(format_date(""), "N/A");
        assert_eq!(format_date("next tuesday"), "Invalid Date");
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2024-11-20T09:15:00Z"), "Nov 20, 2024");
    }

    #[test]
    fn date_time_uses_twelve_hour_clock() {
        assert_eq!(format_date_time("2024-01-05T14:30:00"), "Jan 5, 2024, 02:30 PM");
        assert_eq!(format_date_time(""), "N/A");
    }

    #[test]
    fn time_conversion() {
        assert_eq!(format_time("14:30"), "2:30 PM");
        assert_eq!(format_time("00:05"), "12:05 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("10:00 AM"), "10:00 AM");
        assert_eq!(format_time("noon"), "noon");
    }

    #[test]
    fn relative_time_buckets() {
        let then = "2026-10-01T12:00:00Z";
        assert_eq!(relative_time(then, at("2026-10-01T12:00:30Z")), "just now");
        assert_eq!(relative_time(then, at("2026-10-01T12:01:00Z")), "1 minute ago");
        assert_eq!(relative_time(then, at("2026-10-01T12:45:00Z")), "45 minutes ago");
        assert_eq!(relative_time(then, at("2026-10-01T13:00:00Z")), "1 hour ago");
        assert_eq!(relative_time(then, at("2026-10-03T12:00:00Z")), "2 days ago");
        assert_eq!(relative_time(then, at("2026-10-09T12:00:00Z")), "Oct 1, 2026");
    }

    #[test]
    fn relative_time_never_moves_back_a_bucket() {
        fn rank(s: &str) -> u8 {
            if s == "just now" {
                0
            } else if s.contains("minute") {
                1
            } else if s.contains("hour") {
                2
            } else if s.contains("day") {
                3
            } else {
                4
            }
        }
        let then = "2026-01-01T00:00:00Z";
        let start = at(then);
        let mut last = 0;
        for step in 0..2000 {
            let now = start + chrono::Duration::minutes(step * 7);
            let r = rank(&relative_time(then, now));
            assert!(r >= last, "bucket went backwards at step {step}");
            last = r;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn truncate_short_text_is_unchanged() {
        assert_eq!(truncate("Exam schedule", 20), "Exam schedule");
        assert_eq!(truncate("exactly", 7), "exactly");
    }

    #[test]
    fn truncate_breaks_on_last_whitespace() {
        let text = "Admissions open for the new batch";
        let out = truncate(text, 20);
        assert_eq!(out, "Admissions open for…");
        assert!(out.chars().count() <= 21);
        assert!(text.starts_with(out.trim_end_matches(ELLIPSIS)));
    }

    #[test]
    fn truncate_without_whitespace_cuts_hard() {
        assert_eq!(truncate("Supercalifragilistic", 5), "Super…");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("पाठ्यक्रम सूची", 4).chars().count(), 5);
    }

    #[test]
    fn currency_grouping() {
        assert_eq!(format_currency("125000", "₹"), "₹1,25,000");
        assert_eq!(format_currency("₹ 12,500", "₹"), "₹12,500");
        assert_eq!(format_currency("999", "₹"), "₹999");
        assert_eq!(format_currency("10000000", "₹"), "₹1,00,00,000");
        assert_eq!(format_currency("1500.50", "$"), "$1,500.5");
        assert_eq!(format_currency("-2500", "₹"), "₹-2,500");
    }

    #[test]
    fn currency_passes_through_non_numeric() {
        assert_eq!(format_currency("Contact us", "₹"), "Contact us");
        assert_eq!(format_currency("", "₹"), "");
    }

    #[test]
    fn sanitize_strips_scripts_and_handlers() {
        let dirty = r#"<p onclick="steal()">Hi</p><script>alert(1)</script><a href="javascript:go()">x</a><a href="/ok">y</a>"#;
        assert_eq!(
            sanitize_html(dirty),
            r#"<p>Hi</p><a>x</a><a href="/ok">y</a>"#
        );
    }

    #[test]
    fn sanitize_leaves_text_alone() {
        let text = "<p>Bring onion=3 and javascript: notes</p>";
        assert_eq!(sanitize_html(text), text);
    }

    #[test]
    fn slugs() {
        assert_eq!(slugify("JEE Main -- Results 2024!"), "jee-main-results-2024");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn icons_by_extension() {
        assert_eq!(file_icon("timetable.PDF"), "file-pdf");
        assert_eq!(file_icon("fees.xlsx"), "file-excel");
        assert_eq!(file_icon("README"), "file");
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512.0 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
    }

    #[test]
    fn phone_numbers() {
        assert_eq!(format_phone_number("9876543210"), "987-654-3210");
        assert_eq!(format_phone_number("+91 98765 43210"), "+91 98765 43210");
        assert_eq!(format_phone_number("919876543210"), "+91 98765 43210");
        assert_eq!(format_phone_number("1800"), "1800");
    }
}
