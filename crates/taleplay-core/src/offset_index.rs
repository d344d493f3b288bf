//! Character offset → unit index lookup.

use std::cmp::Ordering;
use std::ops::Range;

use crate::segment::Unit;

/// Sorted, non-overlapping char ranges of a paragraph's units.
///
/// Built once per paragraph. Ranges are half-open and sorted by construction
/// because [`segment`](crate::segment::segment) emits units in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffsetIndex {
    ranges: Vec<Range<usize>>,
}

impl OffsetIndex {
    /// Build the index from segmenter output.
    pub fn new(units: &[Unit]) -> Self {
        Self {
            ranges: units
                .iter()
                .map(|u| u.start_offset..u.end_offset())
                .collect(),
        }
    }

    /// Index of the unit containing `char_index`.
    ///
    /// Returns `None` when the offset lies past the last unit (or the index is
    /// empty). Out-of-range offsets are never clamped to the nearest unit.
    pub fn lookup(&self, char_index: usize) -> Option<usize> {
        self.ranges
            .binary_search_by(|range| {
                if char_index < range.start {
                    Ordering::Greater
                } else if char_index >= range.end {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total chars covered by the index.
    pub fn total_chars(&self) -> usize {
        self.ranges.last().map_or(0, |r| r.end)
    }
}
