//! Request parameter sanitisation.
//!
//! This module contains functions that clean user-supplied query parameters before they are
//! used to query the record source.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::strip_all_tags;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\r\n\t ]+").expect("whitespace pattern is valid"));

static PERCENT_OCTET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)%[a-f0-9]{2}").expect("octet pattern is valid"));

static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("space pattern is valid"));

/// Sanitise a single-line text parameter.
///
/// - strips tags (a `<` that does not open a tag is encoded as `&lt;`)
/// - collapses line breaks, tabs and runs of spaces into one space
/// - removes percent-encoded octets
/// - trims surrounding whitespace
pub fn sanitize_text_field(raw: &str) -> String {
    let mut filtered = if raw.contains('<') {
        strip_all_tags(&encode_lone_less_than(raw))
    } else {
        raw.to_string()
    };

    filtered = WHITESPACE_RUN.replace_all(&filtered, " ").trim().to_string();

    if PERCENT_OCTET.is_match(&filtered) {
        // Removing one octet can splice together another (`%%4141`), so repeat until stable.
        while PERCENT_OCTET.is_match(&filtered) {
            filtered = PERCENT_OCTET.replace_all(&filtered, "").to_string();
        }
        filtered = SPACE_RUN.replace_all(&filtered, " ").trim().to_string();
    }

    filtered
}

/// Encode every `<` that is not closed by a `>` before the next `<` or the end of the text.
fn encode_lone_less_than(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for (i, c) in raw.char_indices() {
        if c != '<' {
            encoded.push(c);
            continue;
        }

        let rest = &raw[i + 1..];
        let closes = match (rest.find('>'), rest.find('<')) {
            (Some(gt), Some(lt)) => gt < lt,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if closes {
            encoded.push('<');
        } else {
            encoded.push_str("&lt;");
        }
    }
    encoded
}

/// Read an integer parameter the way a loose integer cast would.
///
/// Leading whitespace is skipped, then an optional sign and as many digits as follow are used.
/// Anything without leading digits (including an empty string) yields `0`. Values outside the
/// `i64` range saturate.
pub fn loose_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn sanitize_text_field_strips_tags_and_collapses_whitespace() {
        assert_eq!(
            sanitize_text_field("  <b>hello</b>\n\tworld  "),
            "hello world"
        );
    }

    #[test]
    fn sanitize_text_field_removes_percent_octets() {
        assert_eq!(sanitize_text_field("news%20today"), "newstoday");
        assert_eq!(sanitize_text_field("a %41 b"), "a b");
        assert_eq!(sanitize_text_field("%%4141"), "");
    }

    #[test]
    fn sanitize_text_field_encodes_lone_less_than() {
        assert_eq!(sanitize_text_field("1 < 2"), "1 &lt; 2");
        assert_eq!(sanitize_text_field("a < b <c>"), "a &lt; b");
        assert_eq!(sanitize_text_field("<<b>x</b>"), "&lt;x");
    }

    #[test]
    fn sanitize_text_field_leaves_plain_text_alone() {
        assert_eq!(sanitize_text_field("News"), "News");
        assert_eq!(sanitize_text_field("50% off"), "50% off");
    }

    #[test]
    fn loose_int_reads_leading_number() {
        assert_eq!(loose_int("3"), 3);
        assert_eq!(loose_int(" 12abc"), 12);
        assert_eq!(loose_int("-2"), -2);
        assert_eq!(loose_int("+5"), 5);
        assert_eq!(loose_int("abc"), 0);
        assert_eq!(loose_int(""), 0);
        assert_eq!(loose_int("99999999999999999999999"), i64::MAX);
    }
}
