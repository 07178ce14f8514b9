//! Markup stripping and sanitisation for post bodies.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_OR_STYLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("script/style pattern is valid")
});

static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove every tag from `html`.
///
/// `<script>` and `<style>` elements are dropped together with their contents, comments are
/// removed, and all remaining tags are removed while their text is kept. The result is trimmed.
pub fn strip_all_tags(html: &str) -> String {
    let without_code = SCRIPT_OR_STYLE.replace_all(html, "");
    let without_comments = HTML_COMMENT.replace_all(&without_code, "");
    TAG.replace_all(&without_comments, "").trim().to_string()
}

/// Plain-text rendition of a post body: tags stripped, then every line break turned into a
/// single space, then trimmed.
pub fn plain_text(html: &str) -> String {
    strip_all_tags(html)
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Sanitise a post body for embedding as HTML.
///
/// Keeps the tags and attributes authors normally use in post content and removes everything
/// else (scripts, event handlers, `javascript:` URLs).
pub fn sanitize_post_html(html: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder
        .add_generic_attributes(&["class", "id"])
        .add_tags(&["figure", "figcaption"])
        .link_rel(None);
    builder.clean(html).to_string()
}
