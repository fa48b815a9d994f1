//! Definition text formatting
//!
//! Sense text from the API carries inline `{token}` markers: `{bc}` for the
//! bold colon that opens a definition, `{sx|word||}` for a synonymous
//! cross-reference, `{it}...{/it}` for italics, link tokens, and so on.
//! [`format_text`] turns that into styled fragments the UI can draw.

use std::sync::OnceLock;

use regex::Regex;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    // Markers never nest braces
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("token regex is valid"))
}

/// Style of a fragment of definition text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStyle {
    Normal,
    Bold,
    Italic,
    /// A word pointing at another dictionary entry
    Reference,
}

/// A run of text drawn with one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub style: FragmentStyle,
}

impl Fragment {
    fn new(text: impl Into<String>, style: FragmentStyle) -> Self {
        Fragment {
            text: text.into(),
            style,
        }
    }
}

/// Split marked-up definition text into styled fragments
pub fn format_text(text: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut bold = false;
    let mut italic = false;
    let mut last = 0;

    let current = |bold: bool, italic: bool| {
        if bold {
            FragmentStyle::Bold
        } else if italic {
            FragmentStyle::Italic
        } else {
            FragmentStyle::Normal
        }
    };

    for caps in token_regex().captures_iter(text) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push(&mut fragments, &text[last..whole.start()], current(bold, italic));
        last = whole.end();

        let mut fields = body.as_str().split('|');
        let tag = fields.next().unwrap_or_default();

        match tag {
            "bc" => push(&mut fragments, ": ", FragmentStyle::Bold),
            "ldquo" => push(&mut fragments, "\u{201c}", current(bold, italic)),
            "rdquo" => push(&mut fragments, "\u{201d}", current(bold, italic)),
            "b" => bold = true,
            "/b" => bold = false,
            "it" | "qword" | "wi" | "phrase" => italic = true,
            "/it" | "/qword" | "/wi" | "/phrase" => italic = false,
            "sx" => {
                if let Some(word) = fields.next().filter(|w| !w.is_empty()) {
                    push(&mut fragments, "SEE ", FragmentStyle::Normal);
                    push(&mut fragments, word, FragmentStyle::Reference);
                }
            }
            "a_link" | "d_link" | "i_link" | "et_link" | "mat" | "dxt" => {
                if let Some(word) = fields.next().filter(|w| !w.is_empty()) {
                    push(&mut fragments, word, FragmentStyle::Reference);
                }
            }
            _ => {}
        }
    }

    push(&mut fragments, &text[last..], current(bold, italic));
    fragments
}

/// Append text, merging with the previous fragment when the style matches
fn push(fragments: &mut Vec<Fragment>, text: &str, style: FragmentStyle) {
    if text.is_empty() {
        return;
    }
    match fragments.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => fragments.push(Fragment::new(text, style)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_text(text: &str) -> String {
        format_text(text).into_iter().map(|f| f.text).collect()
    }

    #[test]
    fn test_bold_colon() {
        assert_eq!(
            format_text("{bc}a small domesticated carnivore"),
            vec![
                Fragment::new(": ", FragmentStyle::Bold),
                Fragment::new("a small domesticated carnivore", FragmentStyle::Normal),
            ]
        );
    }

    #[test]
    fn test_synonymous_cross_reference() {
        assert_eq!(plain_text("{bc}{sx|feline||}"), ": SEE feline");
        let fragments = format_text("{sx|big cat||}");
        assert_eq!(fragments[1], Fragment::new("big cat", FragmentStyle::Reference));
    }

    #[test]
    fn test_italics_and_quotes() {
        let fragments = format_text("the {it}cat{/it} {ldquo}meows{rdquo}");
        assert_eq!(
            fragments,
            vec![
                Fragment::new("the ", FragmentStyle::Normal),
                Fragment::new("cat", FragmentStyle::Italic),
                Fragment::new(" \u{201c}meows\u{201d}", FragmentStyle::Normal),
            ]
        );
    }

    #[test]
    fn test_links_keep_their_word() {
        assert_eq!(
            plain_text("a kind of {a_link|lion} or {d_link|tiger|tiger:1}"),
            "a kind of lion or tiger"
        );
    }

    #[test]
    fn test_unknown_markers_are_stripped() {
        assert_eq!(plain_text("{dx}compare {/dx}{inf}2{/inf}x"), "compare 2x");
        assert_eq!(plain_text("no markers"), "no markers");
        assert!(format_text("").is_empty());
    }
}
