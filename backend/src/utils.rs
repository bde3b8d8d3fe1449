use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

lazy_static! {
    static ref CHANNEL_URL_REGEX: Regex =
        Regex::new(r"youtube\.com/@([a-zA-Z0-9_-]+)").expect("invalid channel URL regex");
}

/// Extract a channel handle from a channel URL (`youtube.com/@name`) or a
/// bare `@name` query. Returns None when the query is a plain search term.
pub fn extract_channel_handle(query: &str) -> Option<String> {
    if let Some(captures) = CHANNEL_URL_REGEX.captures(query) {
        return captures.get(1).map(|m| m.as_str().to_string());
    }

    query.strip_prefix('@').map(|name| name.to_string())
}

/// (likes + comments) / views * 100, rounded to two decimals.
/// Defined as 0 when views is 0.
pub fn engagement_rate(likes: u64, comments: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    let rate = (likes + comments) as f64 / views as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// YouTube statistics counts arrive as decimal strings in videos.list and as
/// plain numbers in commentThreads.list; absent counts default to 0.
pub fn parse_count(value: &Value) -> u64 {
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| value.as_u64())
        .unwrap_or(0)
}

/// Format an ISO8601 duration (PT1H23M45S) as H:MM:SS, or M:SS when there is
/// no hour component.
pub fn format_duration(duration: &str) -> String {
    let Some(fields) = duration.strip_prefix("PT") else {
        return duration.to_string();
    };

    let mut hours = 0u64;
    let mut minutes = 0u64;
    let mut seconds = 0u64;
    let mut current = String::new();

    for ch in fields.chars() {
        if ch.is_ascii_digit() {
            current.push(ch);
        } else {
            let value = current.parse().unwrap_or(0);
            match ch {
                'H' => hours = value,
                'M' => minutes = value,
                'S' => seconds = value,
                _ => {}
            }
            current.clear();
        }
    }

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_handle_from_channel_url() {
        assert_eq!(
            extract_channel_handle("https://youtube.com/@foo"),
            Some("foo".to_string())
        );
        assert_eq!(
            extract_channel_handle("https://www.youtube.com/@some_channel-42"),
            Some("some_channel-42".to_string())
        );
    }

    #[test]
    fn extracts_handle_from_at_prefix() {
        assert_eq!(extract_channel_handle("@foo"), Some("foo".to_string()));
    }

    #[test]
    fn at_trending_is_a_handle_not_the_sentinel() {
        assert_eq!(
            extract_channel_handle("@trending"),
            Some("trending".to_string())
        );
    }

    #[test]
    fn trending_and_plain_queries_are_not_handles() {
        assert_eq!(extract_channel_handle("trending"), None);
        assert_eq!(extract_channel_handle("rust tutorials"), None);
    }

    #[test]
    fn engagement_rate_rounds_to_two_decimals() {
        assert_eq!(engagement_rate(1234, 56, 100_000), 1.29);
        assert_eq!(engagement_rate(1, 0, 3), 33.33);
    }

    #[test]
    fn engagement_rate_is_zero_when_views_are_zero() {
        assert_eq!(engagement_rate(10, 5, 0), 0.0);
    }

    #[test]
    fn parses_counts_from_strings_and_numbers() {
        assert_eq!(parse_count(&json!("12345")), 12345);
        assert_eq!(parse_count(&json!(42)), 42);
        assert_eq!(parse_count(&json!(null)), 0);
        assert_eq!(parse_count(&json!("not a number")), 0);
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration("PT1H23M45S"), "1:23:45");
        assert_eq!(format_duration("PT4M2S"), "4:02");
        assert_eq!(format_duration("PT58S"), "0:58");
        assert_eq!(format_duration("PT2H5S"), "2:00:05");
        assert_eq!(format_duration("not-a-duration"), "not-a-duration");
    }
}
