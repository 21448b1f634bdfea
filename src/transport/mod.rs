//! Transport layer: wire rendering of validated requests and response decoding.

mod conversations;
mod meetings;
mod users;
mod verify;

use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 in UTC, truncated to whole seconds (`2023-12-18T09:56:08Z`).
fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Percent-encode ordered `key=value` pairs.
fn encode_query(params: &[(&str, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

/// Percent-encode one path segment; `/`, `?` and spaces cannot leak into the route.
fn encode_path_segment(segment: &str) -> String {
    // byte_serialize emits `+` only for spaces, a literal `+` becomes `%2B`.
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn to_form(params: Vec<(&str, String)>) -> Vec<(String, String)> {
    params
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_drop_fractional_seconds() {
        let date: DateTime<Utc> = "2023-12-18T09:56:08.952Z".parse().unwrap();
        assert_eq!(format_date(&date), "2023-12-18T09:56:08Z");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let query = encode_query(&[
            ("date_start", "2023-12-18T09:56:08Z".to_owned()),
            ("order_by", "a b&c".to_owned()),
        ]);
        assert_eq!(query, "date_start=2023-12-18T09%3A56%3A08Z&order_by=a+b%26c");
    }

    #[test]
    fn path_segments_escape_reserved_characters() {
        assert_eq!(encode_path_segment("US-123"), "US-123");
        assert_eq!(encode_path_segment("US 1/../x?y=1"), "US%201%2F..%2Fx%3Fy%3D1");
        assert_eq!(encode_path_segment("a+b#c"), "a%2Bb%23c");
    }

    #[test]
    fn empty_params_encode_to_empty_query() {
        assert_eq!(encode_query(&[]), "");
    }
}
