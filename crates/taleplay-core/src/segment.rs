//! Paragraph segmentation into highlightable units.
//!
//! Text is split on maximal runs of delimiter characters (sentence and clause
//! punctuation, line breaks, brackets). Each delimiter run becomes its own
//! [`UnitKind::Punctuation`] unit instead of being folded into the text around
//! it, so the split is lossless: concatenating the units reproduces the input.
//!
//! Offsets and lengths count `char`s, matching the character indices a
//! narrator reports in its boundary events.

use serde::{Deserialize, Serialize};

/// Classification of a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Content,
    Punctuation,
}

/// Smallest highlightable span of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub text: String,
    pub kind: UnitKind,
    /// Offset of the first char, counted from the start of the paragraph.
    pub start_offset: usize,
    /// Length in chars.
    pub length: usize,
}

impl Unit {
    /// Offset one past the last char.
    pub const fn end_offset(&self) -> usize {
        self.start_offset + self.length
    }

    pub fn is_punctuation(&self) -> bool {
        self.kind == UnitKind::Punctuation
    }
}

/// Whether `c` separates units.
///
/// Covers CJK and ASCII sentence/clause punctuation, CR/LF, round and corner
/// brackets, and the U+FE30–U+FFA0 block of compatibility, small, halfwidth
/// and fullwidth forms.
pub const fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        '。' | '.' | '?' | '!' | ';' | '\r' | '\n' | '(' | ')' | '「' | '」' | '\u{FE30}'..='\u{FFA0}'
    )
}

/// Split `text` into ordered units.
///
/// Deterministic and lossless. Empty input yields no units.
pub fn segment(text: &str) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut run_start_byte = 0;
    let mut run_start_offset = 0;
    let mut run_len = 0;
    let mut run_is_delimiter = false;

    for (byte_idx, c) in text.char_indices() {
        let delimiter = is_delimiter(c);
        if run_len > 0 && delimiter != run_is_delimiter {
            units.push(make_unit(
                &text[run_start_byte..byte_idx],
                run_is_delimiter,
                run_start_offset,
                run_len,
            ));
            run_start_byte = byte_idx;
            run_start_offset += run_len;
            run_len = 0;
        }
        run_is_delimiter = delimiter;
        run_len += 1;
    }

    if run_len > 0 {
        units.push(make_unit(
            &text[run_start_byte..],
            run_is_delimiter,
            run_start_offset,
            run_len,
        ));
    }

    units
}

fn make_unit(text: &str, delimiter: bool, start_offset: usize, length: usize) -> Unit {
    Unit {
        text: text.to_string(),
        kind: if delimiter {
            UnitKind::Punctuation
        } else {
            UnitKind::Content
        },
        start_offset,
        length,
    }
}
