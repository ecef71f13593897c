#![forbid(unsafe_code)]

//! Half-open character ranges.

use std::fmt;

/// A half-open range `[start, end)` of character offsets.
///
/// Construction through [`TextRange::new`] normalizes reversed endpoints so
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    /// First character offset (inclusive).
    pub start: usize,
    /// One past the last character offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// The empty range at offset zero.
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Create a range, swapping the endpoints if they are reversed.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Range of `len` characters starting at `start`.
    #[must_use]
    pub const fn with_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start.saturating_add(len),
        }
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this range reaches outside `scanned` on either side.
    #[must_use]
    pub const fn exceeds(&self, scanned: &Self) -> bool {
        self.start < scanned.start || self.end > scanned.end
    }

    /// Overlap of two ranges, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }

    /// Extend the end by `n` characters.
    #[must_use]
    pub const fn extend_end(self, n: usize) -> Self {
        Self {
            start: self.start,
            end: self.end.saturating_add(n),
        }
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_reversed() {
        let r = TextRange::new(9, 3);
        assert_eq!(r.start, 3);
        assert_eq!(r.end, 9);
        assert_eq!(r.len(), 6);
    }

    #[test]
    fn empty_range() {
        assert!(TextRange::EMPTY.is_empty());
        assert!(TextRange::new(4, 4).is_empty());
        assert!(!TextRange::new(4, 5).is_empty());
    }

    #[test]
    fn exceeds_either_side() {
        let scanned = TextRange::new(10, 50);
        assert!(!TextRange::new(10, 50).exceeds(&scanned));
        assert!(!TextRange::new(20, 30).exceeds(&scanned));
        assert!(!TextRange::new(30, 30).exceeds(&scanned));
        assert!(TextRange::new(5, 30).exceeds(&scanned));
        assert!(TextRange::new(20, 51).exceeds(&scanned));
    }

    #[test]
    fn intersection_disjoint() {
        let a = TextRange::new(0, 3);
        let b = TextRange::new(3, 6);
        assert_eq!(a.intersection(&b), None);
        assert_eq!(
            TextRange::new(0, 5).intersection(&TextRange::new(3, 9)),
            Some(TextRange::new(3, 5))
        );
    }

    #[test]
    fn extend_end_saturates() {
        assert_eq!(TextRange::new(1, 2).extend_end(1), TextRange::new(1, 3));
        assert_eq!(TextRange::new(1, usize::MAX).extend_end(1).end, usize::MAX);
    }

    #[test]
    fn display_as_dotted_range() {
        assert_eq!(TextRange::new(3, 7).to_string(), "3..7");
    }
}
