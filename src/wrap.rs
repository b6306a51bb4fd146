//! Greedy word wrapping against an injected width function.

/// Characters kept from the original text when wrapping yields no line at all.
pub const FALLBACK_CHARS: usize = 40;

/// Splits `text` into lines no wider than `max_width`.
///
/// Text that already fits is returned unchanged as a single line. Otherwise whitespace
/// separated words are packed greedily: a word joins the current line while
/// `measure(current + " " + word) <= max_width`, and starts a new line when it does not.
/// A word wider than `max_width` on its own is placed on its own line without hyphenation.
///
/// The result always holds at least one line. If packing produced nothing (the text is only
/// whitespace and still too wide), the first [`FALLBACK_CHARS`] characters followed by `...`
/// are returned instead.
pub fn wrap<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    if measure(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        let mut fallback: String = text.chars().take(FALLBACK_CHARS).collect();
        fallback.push_str("...");
        lines.push(fallback);
    }
    lines
}

/// Wraps text that may contain explicit line breaks.
///
/// Each `\n` separated segment is wrapped on its own; an empty segment yields an empty line.
pub fn wrap_lines<F>(text: &str, max_width: f64, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f64,
{
    text.split('\n')
        .flat_map(|segment| wrap(segment, max_width, &measure))
        .collect()
}

/// Shortens `text` until it fits `max_width`. Text that fits is returned as is.
pub fn clip_to_width<F>(text: &str, max_width: f64, measure: F) -> String
where
    F: Fn(&str) -> f64,
{
    let mut clipped = text.to_string();
    while !clipped.is_empty() && measure(&clipped) > max_width {
        clipped.pop();
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> f64 {
        text.chars().count() as f64
    }

    #[test]
    fn packs_two_words_per_line() {
        assert_eq!(
            wrap("alpha beta gamma", 10.0, chars),
            vec!["alpha beta", "gamma"]
        );
    }

    #[test]
    fn fitting_text_is_returned_unchanged() {
        assert_eq!(wrap("a  b", 10.0, chars), vec!["a  b"]);
        assert_eq!(wrap("", 10.0, chars), vec![""]);
    }

    #[test]
    fn overwide_word_gets_its_own_line() {
        assert_eq!(
            wrap("a supercalifragilistic b", 5.0, chars),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn whitespace_only_overflow_falls_back_to_truncation() {
        let text = " ".repeat(50);
        let lines = wrap(&text, 3.0, chars);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], format!("{}...", " ".repeat(FALLBACK_CHARS)));
    }

    #[test]
    fn explicit_newlines_are_kept() {
        assert_eq!(
            wrap_lines("one two three\n\nfour", 8.0, chars),
            vec!["one two", "three", "", "four"]
        );
    }

    #[test]
    fn clipping_stops_at_width() {
        assert_eq!(clip_to_width("abcdef", 4.0, chars), "abcd");
        assert_eq!(clip_to_width("abc", 4.0, chars), "abc");
        assert_eq!(clip_to_width("abc", -1.0, chars), "");
    }
}
