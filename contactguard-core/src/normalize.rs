//! Invisible-character folding with index mapping.
//!
//! Zero-width and format characters can be sprinkled inside a contact token
//! (`555\u{200B}123\u{200B}4567`) to slip past pattern matching. Rules are
//! run against a folded view of the text and each match span is mapped back
//! onto the original string before replacement.
//!
//! License: MIT OR APACHE 2.0

use std::borrow::Cow;
use std::ops::Range;

/// Characters removed from the matching view.
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' // soft hyphen
            | '\u{034F}' // combining grapheme joiner
            | '\u{180E}' // mongolian vowel separator
            | '\u{200B}'..='\u{200F}' // zero-width space/joiners, LRM/RLM
            | '\u{202A}'..='\u{202E}' // bidi embeddings and overrides
            | '\u{2060}'..='\u{2064}' // word joiner, invisible operators
            | '\u{FEFF}' // byte order mark
    )
}

/// A folded view of a string plus a map from folded byte offsets back to
/// original byte offsets.
#[derive(Debug)]
pub struct FoldedText<'a> {
    original: &'a str,
    folded: Cow<'a, str>,
    /// `map[i]` is the original offset of folded byte `i`; has one extra
    /// trailing entry equal to `original.len()`. Empty when nothing was folded.
    map: Vec<usize>,
}

impl<'a> FoldedText<'a> {
    pub fn new(original: &'a str) -> Self {
        if !original.chars().any(is_invisible) {
            return Self { original, folded: Cow::Borrowed(original), map: Vec::new() };
        }

        let mut folded = String::with_capacity(original.len());
        let mut map = Vec::with_capacity(original.len() + 1);
        for (idx, c) in original.char_indices() {
            if is_invisible(c) {
                continue;
            }
            folded.push(c);
            map.extend(std::iter::repeat(idx).take(c.len_utf8()));
        }
        map.push(original.len());

        Self { original, folded: Cow::Owned(folded), map }
    }

    /// The text rules should be matched against.
    pub fn as_str(&self) -> &str {
        &self.folded
    }

    pub fn original(&self) -> &'a str {
        self.original
    }

    pub fn was_folded(&self) -> bool {
        matches!(self.folded, Cow::Owned(_))
    }

    /// Maps a span of the folded text to the corresponding span of the original.
    ///
    /// The end maps to the start of the next visible character, so invisible
    /// characters inside or directly after the span are covered by it.
    pub fn map_range(&self, folded: Range<usize>) -> Range<usize> {
        if self.map.is_empty() {
            return folded;
        }
        let last = self.map.len() - 1;
        let start = self.map[folded.start.min(last)];
        let end = self.map[folded.end.min(last)];
        start..end
    }
}
