// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// An `(offset, length)` span of the offset space.
///
/// Unlike `Range<usize>`, a `Region` may have a negative offset and a negative length. A negative
/// length describes reversed or undefined coverage, for example the extent of a presentation seen
/// through a clip window that lies entirely outside of it.
///
/// Bounds saturate at the ends of the `i64` range instead of overflowing.
///
/// ## Example
///
/// ```
/// use text_presentation::Region;
///
/// let region = Region::new(4, 16);
/// assert_eq!(region.end(), 20);
/// assert!(!region.is_empty());
/// assert!(Region::new(10, -5).is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Region {
    offset: i64,
    length: i64,
}

impl Region {
    /// Creates a region starting at `offset` spanning `length` positions.
    #[must_use]
    #[inline]
    pub const fn new(offset: i64, length: i64) -> Self {
        Self { offset, length }
    }

    /// Creates the region covering `start..end`.
    #[must_use]
    #[inline]
    pub const fn from_bounds(start: i64, end: i64) -> Self {
        Self {
            offset: start,
            length: end.saturating_sub(start),
        }
    }

    /// The first offset covered by this region.
    #[must_use]
    #[inline]
    pub const fn offset(self) -> i64 {
        self.offset
    }

    /// The number of covered offsets. May be negative.
    #[must_use]
    #[inline]
    pub const fn length(self) -> i64 {
        self.length
    }

    /// The offset one past the last covered offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> i64 {
        self.offset.saturating_add(self.length)
    }

    /// Returns `true` if this region covers no offsets (zero or negative length).
    #[must_use]
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.length <= 0
    }

    /// Returns `true` if `self` and `other` share at least one offset.
    #[must_use]
    #[inline]
    pub const fn overlaps(self, other: Self) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }

    /// Returns the part of `self` that lies within `other`, if any.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let start = self.offset.max(other.offset);
        let end = self.end().min(other.end());
        (start < end).then(|| Self::from_bounds(start, end))
    }

    /// Expresses `self` relative to `window`.
    ///
    /// The start is moved to the window start if it lies before it, the end is cut at the window
    /// end, and both are re-based so the window start maps to `0`. The result has a negative
    /// length when `self` and `window` do not intersect.
    #[must_use]
    pub fn relative_to(self, window: Self) -> Self {
        let start = self.offset.saturating_sub(window.offset).max(0);
        let end = self.end().min(window.end()).saturating_sub(window.offset);
        Self::from_bounds(start, end)
    }

    /// Returns this region shifted by `delta` offsets.
    #[must_use]
    #[inline]
    pub const fn translate(self, delta: i64) -> Self {
        Self {
            offset: self.offset.saturating_add(delta),
            length: self.length,
        }
    }
}

impl core::fmt::Display for Region {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{}, {})", self.offset, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::Region;
    use alloc::format;

    #[test]
    fn end_and_emptiness() {
        let r = Region::new(3, 4);
        assert_eq!(r.end(), 7);
        assert!(!r.is_empty());
        assert!(Region::new(3, 0).is_empty());
        assert!(Region::new(3, -1).is_empty());
        assert_eq!(Region::from_bounds(2, 9), Region::new(2, 7));
    }

    #[test]
    fn intersection_and_overlap() {
        let a = Region::new(0, 10);
        assert_eq!(a.intersection(Region::new(-5, 8)), Some(Region::new(0, 3)));
        assert_eq!(a.intersection(Region::new(4, 2)), Some(Region::new(4, 2)));
        assert_eq!(a.intersection(Region::new(10, 5)), None);
        assert!(a.overlaps(Region::new(9, 5)));
        assert!(!a.overlaps(Region::new(10, 5)));
    }

    #[test]
    fn relative_to_window() {
        let extent = Region::new(0, 160);
        assert_eq!(extent.relative_to(Region::new(-10, 5)), Region::new(10, -5));
        assert_eq!(extent.relative_to(Region::new(-10, 30)), Region::new(10, 20));
        assert_eq!(extent.relative_to(Region::new(150, 30)), Region::new(0, 10));
        assert_eq!(extent.relative_to(Region::new(200, 30)), Region::new(0, -40));
        assert_eq!(extent.relative_to(Region::new(100, 10)), Region::new(0, 10));
    }

    #[test]
    fn bounds_saturate() {
        let r = Region::new(i64::MAX - 5, 100);
        assert_eq!(r.end(), i64::MAX);
        assert_eq!(Region::from_bounds(i64::MIN, 0).length(), i64::MAX);
        assert_eq!(
            r.intersection(Region::new(i64::MAX - 10, 8)),
            Some(Region::new(i64::MAX - 5, 3))
        );
        assert_eq!(Region::new(i64::MAX, 1).translate(1).offset(), i64::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Region::new(4, 16)), "[4, 20)");
        assert_eq!(Region::new(4, 16).translate(-4), Region::new(0, 16));
    }
}
