//! Text sanitizing for the single-byte standard fonts.
//!
//! The standard fonts can only show Latin-1. Common typographic characters are replaced by a
//! close ASCII spelling; anything else outside Latin-1 becomes `?`. Substitution never fails.

use std::borrow::Cow;

const REPLACEMENT: char = '?';

fn substitute(ch: char) -> Option<&'static str> {
    let replacement = match ch {
        '\u{2014}' | '\u{2013}' => "-",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201c}' | '\u{201d}' => "\"",
        '\u{2026}' => "...",
        '\u{2022}' => "-",
        '\u{2192}' => "->",
        '\u{2190}' => "<-",
        '\u{2265}' => ">=",
        '\u{2264}' => "<=",
        '\u{2260}' => "!=",
        '\u{00a0}' => " ",
        _ => return None,
    };
    Some(replacement)
}

fn is_representable(ch: char) -> bool {
    (ch as u32) <= 0xff && ch != '\u{00a0}'
}

/// Returns `text` restricted to characters the standard fonts can draw.
///
/// Borrows when nothing needs replacing.
pub fn to_latin1(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_representable) {
        return Cow::Borrowed(text);
    }

    let mut sanitized = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some(replacement) = substitute(ch) {
            sanitized.push_str(replacement);
        } else if is_representable(ch) {
            sanitized.push(ch);
        } else {
            log::warn!("no Latin-1 equivalent for {ch:?}, drawing {REPLACEMENT:?} instead");
            sanitized.push(REPLACEMENT);
        }
    }
    Cow::Owned(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_borrowed() {
        assert!(matches!(to_latin1("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn latin1_passes_through() {
        assert!(matches!(to_latin1("caf\u{e9}"), Cow::Borrowed(_)));
    }

    #[test]
    fn typographic_characters_become_ascii() {
        assert_eq!(
            to_latin1("Flutter \u{2014} \u{201c}UI\u{201d} \u{2192} done\u{2026}"),
            "Flutter - \"UI\" -> done..."
        );
        assert_eq!(to_latin1("a\u{a0}b \u{2264} c"), "a b <= c");
    }

    #[test]
    fn unknown_characters_become_question_marks() {
        assert_eq!(to_latin1("emoji \u{1f680}!"), "emoji ?!");
    }
}
