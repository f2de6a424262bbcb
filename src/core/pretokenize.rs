//! Text cleaning and pretokenization.
//!
//! Before BPE, text is normalized and split into pretokens, each of which is
//! merged independently. Cleaning runs these steps once, in order:
//!
//! 1. decode HTML entities (`&amp;` → `&`), trim
//! 2. collapse every whitespace run to a single space, trim
//! 3. lowercase
//!
//! Pretokens are the leftmost non-overlapping matches of [`CLIP_PATTERN`].
//! Whitespace between matches is dropped.

use regex::{Matches, Regex};

use super::tokenizer::TokenizerError;

/// Pretokenization pattern for CLIP. Alternatives are tried in order.
pub const CLIP_PATTERN: &str = r"<\|startoftext\|>|<\|endoftext\|>|'s|'t|'re|'ve|'m|'ll|'d|\p{L}+|\p{N}|[^\s\p{L}\p{N}]+";

/// Unicode whitespace plus the byte-order mark, which cleaning also strips.
const WHITESPACE_PATTERN: &str = r"[\s\x{FEFF}]+";

fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{FEFF}'
}

/// Cleans text and splits it into pretokens.
#[derive(Debug, Clone)]
pub struct Pretokenizer {
    pattern: Regex,
    whitespace: Regex,
}

impl Pretokenizer {
    /// Compile the CLIP pretokenization pattern.
    pub fn new() -> Result<Self, TokenizerError> {
        Ok(Self {
            pattern: Regex::new(CLIP_PATTERN)?,
            whitespace: Regex::new(WHITESPACE_PATTERN)?,
        })
    }

    /// Apply entity decoding, whitespace collapsing and lowercasing.
    pub fn clean(&self, text: &str) -> String {
        let decoded = html_escape::decode_html_entities(text);
        let collapsed = self.whitespace.replace_all(decoded.trim_matches(is_blank), " ");
        collapsed.trim_matches(is_blank).to_lowercase()
    }

    /// Split already-cleaned text into pretokens.
    ///
    /// The returned iterator is lazy; call again to restart.
    pub fn pretokenize<'r, 'h>(&'r self, text: &'h str) -> Pretokens<'r, 'h> {
        Pretokens {
            matches: self.pattern.find_iter(text),
        }
    }
}

/// Lazy sequence of pretokens borrowed from the cleaned text.
#[derive(Debug)]
pub struct Pretokens<'r, 'h> {
    matches: Matches<'r, 'h>,
}

impl<'h> Iterator for Pretokens<'_, 'h> {
    type Item = &'h str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.matches.next().map(|m| m.as_str())
    }
}
