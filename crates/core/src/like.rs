//! LIKE-style title matching.
//!
//! Search requests are turned into a [`LikePattern`] and handed to the record source as part of
//! the query itself, so a match rule only ever applies to the call it was built for.
//!
//! Pattern syntax follows SQL `LIKE`: `%` matches any run of characters, `_` matches exactly one,
//! and `\` makes the next character literal. Matching is case-insensitive.

#[derive(Debug, Clone, PartialEq, Eq)]
enum LikeToken {
    Literal(char),
    AnyOne,
    AnyMany,
}

/// A compiled, case-insensitive LIKE pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    source: String,
    tokens: Vec<LikeToken>,
}

impl LikePattern {
    /// Compile a raw LIKE pattern. A trailing lone `\` is treated as a literal backslash.
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                '%' => {
                    // Consecutive `%` are equivalent to one.
                    if tokens.last() != Some(&LikeToken::AnyMany) {
                        tokens.push(LikeToken::AnyMany);
                    }
                }
                '_' => tokens.push(LikeToken::AnyOne),
                '\\' => {
                    let escaped = chars.next().unwrap_or('\\');
                    tokens.extend(escaped.to_lowercase().map(LikeToken::Literal));
                }
                other => tokens.extend(other.to_lowercase().map(LikeToken::Literal)),
            }
        }

        Self {
            source: pattern.to_string(),
            tokens,
        }
    }

    /// Pattern matching any text that contains `needle` literally (`%needle%`).
    pub fn contains(needle: &str) -> Self {
        Self::new(&format!("%{}%", escape_like(needle)))
    }

    /// The raw pattern text, as it would appear in a SQL `LIKE` clause.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, text: &str) -> bool {
        let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
        let tokens = &self.tokens;

        let (mut p, mut t) = (0usize, 0usize);
        // Position of the last `%` seen and the text index it is currently absorbing up to.
        let mut backtrack: Option<(usize, usize)> = None;

        while t < text.len() {
            match tokens.get(p) {
                Some(LikeToken::AnyMany) => {
                    backtrack = Some((p, t));
                    p += 1;
                    continue;
                }
                Some(LikeToken::AnyOne) => {
                    p += 1;
                    t += 1;
                    continue;
                }
                Some(LikeToken::Literal(c)) if *c == text[t] => {
                    p += 1;
                    t += 1;
                    continue;
                }
                _ => {}
            }

            match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            }
        }

        tokens[p..].iter().all(|token| *token == LikeToken::AnyMany)
    }
}

/// Escape `%`, `_` and `\` so they match literally inside a LIKE pattern.
pub fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod like_tests {
    use super::*;

    #[test]
    fn contains_is_case_insensitive_substring() {
        let pattern = LikePattern::contains("rust");
        assert_eq!(pattern.as_str(), "%rust%");
        assert!(pattern.matches("Learning Rust in 2024"));
        assert!(pattern.matches("RUST"));
        assert!(!pattern.matches("Ruby"));
    }

    #[test]
    fn contains_escapes_wildcards() {
        let pattern = LikePattern::contains("50%");
        assert_eq!(pattern.as_str(), "%50\\%%");
        assert!(pattern.matches("Save 50% today"));
        assert!(!pattern.matches("Save 500 today"));

        let underscore = LikePattern::contains("a_b");
        assert!(underscore.matches("x a_b y"));
        assert!(!underscore.matches("x axb y"));
    }

    #[test]
    fn raw_wildcards_behave_like_sql() {
        assert!(LikePattern::new("h_llo").matches("Hello"));
        assert!(!LikePattern::new("h_llo").matches("Heello"));
        assert!(LikePattern::new("a%c%e").matches("abcde"));
        assert!(!LikePattern::new("a%c%e").matches("abcd"));
        assert!(LikePattern::new("%").matches(""));
        assert!(!LikePattern::new("_").matches(""));
    }

    #[test]
    fn backtracking_finds_later_occurrence() {
        assert!(LikePattern::new("%aab").matches("aaab"));
        assert!(LikePattern::new("%ab%ab").matches("abxab"));
    }

    #[test]
    fn non_ascii_titles_match_case_insensitively() {
        assert!(LikePattern::contains("café").matches("Le CAFÉ du coin"));
    }

    #[test]
    fn escape_like_escapes_backslash() {
        assert_eq!(escape_like(r"a\b"), r"a\\b");
        assert!(LikePattern::contains(r"a\b").matches(r"xa\by"));
    }
}
