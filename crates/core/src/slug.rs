//! Slug derivation for menu entries.

use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::markup::strip_all_tags;

static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&[^;\s]+?;").expect("entity pattern is valid"));

/// Derive a URL-safe slug from a display name.
///
/// The name is stripped of markup and HTML entities and lowercased. Latin accented letters are
/// folded to their base letter, whitespace, dots, slashes and dashes become single dashes, other
/// ASCII punctuation is dropped, and remaining non-ASCII letters are percent-encoded as UTF-8.
/// Leading and trailing dashes are removed.
pub fn slugify(name: &str) -> String {
    let stripped = strip_all_tags(name);
    let text = ENTITY.replace_all(&stripped, "");

    let mut slug = String::with_capacity(text.len());
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if c.is_whitespace() || matches!(c, '-' | '.' | '/') {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else if let Some(folded) = fold_accent(c) {
            slug.push_str(folded);
        } else if c.is_alphanumeric() {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                // Writing to a String cannot fail.
                let _ = write!(slug, "%{byte:02x}");
            }
        }
    }

    slug.trim_matches('-').to_string()
}

fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'č' => "c",
        'ď' | 'đ' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => "e",
        'ğ' => "g",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'ı' => "i",
        'ł' | 'ľ' => "l",
        'ñ' | 'ń' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'œ' => "oe",
        'ř' => "r",
        'ß' => "ss",
        'ś' | 'š' | 'ş' => "s",
        'ť' | 'ţ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => "u",
        'ý' | 'ÿ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'þ' => "th",
        'ð' => "d",
        _ => return None,
    };
    Some(folded)
}
