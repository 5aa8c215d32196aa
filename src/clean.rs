//! Text normalization for scraped blog and listing content

use regex::Regex;
use std::sync::OnceLock;

fn paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.*?\)").expect("valid pattern"))
}

fn breaks_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n\r\t]").expect("valid pattern"))
}

fn spaces_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid pattern"))
}

fn emoji_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Pictographs plus the joiners and modifiers that ride along with them:
    // variation selector 16, zero-width joiner, combining keycap.
    RE.get_or_init(|| {
        Regex::new(r"[\p{Extended_Pictographic}\u{FE0F}\u{200D}\u{20E3}]").expect("valid pattern")
    })
}

/// Normalize scraped text: drop parenthesized spans (promotional asides like
/// sponsorship disclaimers), collapse newline/tab/whitespace runs to single
/// spaces, trim, and strip emoji and other pictographs.
///
/// Pure and total on any input string.
///
/// # Examples
///
/// ```
/// assert_eq!(trendcrawl::clean("  hello   world (ad) \n\n"), "hello world");
/// ```
pub fn clean(text: &str) -> String {
    let text = paren_re().replace_all(text, "");
    let text = breaks_re().replace_all(&text, " ");
    let text = spaces_re().replace_all(&text, " ");
    let text = text.trim();
    emoji_re().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_drops_parens() {
        assert_eq!(clean("  hello   world (광고문구) \n\n"), "hello world");
    }

    #[test]
    fn test_strips_emoji_without_adding_whitespace() {
        assert_eq!(clean("좋아요😊👍"), "좋아요");
    }

    #[test]
    fn test_keeps_plain_korean_text() {
        assert_eq!(clean("올해 유행하는 니트"), "올해 유행하는 니트");
    }

    #[test]
    fn test_non_greedy_paren_removal() {
        assert_eq!(clean("a (one) b (two) c"), "a b c");
    }

    #[test]
    fn test_tabs_and_newlines_become_single_spaces() {
        assert_eq!(clean("a\t\tb\nc"), "a b c");
    }

    #[test]
    fn test_total_on_empty_input() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   "), "");
    }
}
