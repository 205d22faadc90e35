// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iteration over the resolved styling of a [`PresentationEngine`].

use core::iter::FusedIterator;

use crate::{AttributeSet, Error, PresentationEngine, Region, StyleInterval};

/// Iterator over the styled intervals of a [`PresentationEngine`].
///
/// Stored intervals are yielded in offset order. Parts of the default region not covered by a
/// stored interval are yielded as synthetic intervals carrying the default attributes. When the
/// engine has a clip window, intervals are truncated to it and re-based so that the window start
/// maps to `0`.
///
/// Items are clones; the iterator borrows the engine, so the engine cannot change underneath it.
/// Calling [`PresentationEngine::all_style_ranges`] again restarts the sequence.
///
/// The iterator is fused. Use [`try_next`](Self::try_next) where advancing past the end is a
/// logic error that must not go unnoticed.
///
/// # Examples
///
/// ```
/// use text_presentation::{AttributeSet, ErrorKind, FontWeight, PresentationEngine, Region};
///
/// let mut engine = PresentationEngine::new();
/// engine.set_default(
///     Some(AttributeSet::new().weight(FontWeight::Normal)),
///     Some(Region::new(0, 10)),
/// );
/// engine.set_clip_window(Some(Region::new(5, 20)));
///
/// let mut ranges = engine.all_style_ranges();
/// let first = ranges.try_next().unwrap();
/// assert_eq!(first.region, Region::new(0, 5));
/// assert_eq!(ranges.try_next().unwrap_err().kind(), ErrorKind::Exhausted);
/// ```
#[derive(Clone, Debug)]
pub struct StyleRanges<'a> {
    stored: &'a [StyleInterval],
    default: Option<(&'a AttributeSet, Region)>,
    window: Option<Region>,
    skip_default: bool,
    /// Index of the next stored interval.
    index: usize,
    /// Absolute offset up to which output has been produced.
    cursor: i64,
}

impl<'a> StyleRanges<'a> {
    pub(crate) fn new(engine: &'a PresentationEngine, skip_default: bool) -> Self {
        let stored = engine.stored();
        let default = engine.default_parts();
        let window = engine.clip_window();
        let (index, cursor) = match window {
            Some(window) => (
                stored.partition_point(|range| range.end() <= window.offset()),
                window.offset(),
            ),
            None => (0, i64::MIN),
        };
        Self {
            stored,
            default,
            window,
            skip_default: skip_default && default.is_some(),
            index,
            cursor,
        }
    }

    /// Advances the iterator, failing once the sequence is exhausted.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::Exhausted`](crate::ErrorKind::Exhausted) when there are no more
    /// intervals.
    pub fn try_next(&mut self) -> Result<StyleInterval, Error> {
        self.next().ok_or_else(Error::exhausted)
    }

    /// The next interval in absolute offsets, before clipping.
    fn next_absolute(&mut self) -> Option<StyleInterval> {
        let next_stored = self.stored.get(self.index);
        if let Some((attrs, region)) = self.default {
            let fill_start = self.cursor.max(region.offset());
            let fill_end = next_stored.map_or(region.end(), |range| {
                range.offset().min(region.end())
            });
            if fill_start < fill_end {
                self.cursor = fill_end;
                return Some(StyleInterval::new(
                    Region::from_bounds(fill_start, fill_end),
                    attrs.clone(),
                ));
            }
        }
        let range = next_stored?;
        self.index += 1;
        self.cursor = range.end();
        Some(range.clone())
    }

    fn is_default(&self, interval: &StyleInterval) -> bool {
        self.default
            .is_some_and(|(attrs, _)| interval.attrs.is_similar_to(attrs))
    }
}

impl Iterator for StyleRanges<'_> {
    type Item = StyleInterval;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut interval = self.next_absolute()?;
            if let Some(window) = self.window {
                let Some(visible) = interval.region.intersection(window) else {
                    if interval.offset() >= window.end() {
                        // Nothing after this can be visible either.
                        self.index = self.stored.len();
                        self.default = None;
                        return None;
                    }
                    continue;
                };
                interval.region = visible.translate(-window.offset());
            }
            if self.skip_default && self.is_default(&interval) {
                continue;
            }
            return Some(interval);
        }
    }
}

impl FusedIterator for StyleRanges<'_> {}

#[cfg(test)]
mod tests {
    use crate::{AttributeSet, ErrorKind, FontWeight, PresentationEngine, Region, StyleInterval};
    use alloc::vec::Vec;

    fn normal() -> AttributeSet {
        AttributeSet::new().weight(FontWeight::Normal)
    }

    fn bold() -> AttributeSet {
        AttributeSet::new().weight(FontWeight::Bold)
    }

    fn engine() -> PresentationEngine {
        let mut engine = PresentationEngine::new();
        engine.set_default(Some(normal()), Some(Region::new(0, 30)));
        engine.merge(StyleInterval::new(Region::new(10, 5), bold()));
        engine
    }

    #[test]
    fn fills_gaps_with_default() {
        let engine = engine();
        let all: Vec<_> = engine.all_style_ranges().collect();
        assert_eq!(
            all,
            [
                StyleInterval::new(Region::new(0, 10), normal()),
                StyleInterval::new(Region::new(10, 5), bold()),
                StyleInterval::new(Region::new(15, 15), normal()),
            ]
        );
        let non_default: Vec<_> = engine.non_default_style_ranges().collect();
        assert_eq!(non_default, [StyleInterval::new(Region::new(10, 5), bold())]);
    }

    #[test]
    fn stored_outside_default_region_is_kept() {
        let mut engine = PresentationEngine::new();
        engine.merge(StyleInterval::new(Region::new(-5, 5), bold()));
        engine.merge(StyleInterval::new(Region::new(40, 5), bold()));
        engine.set_default(Some(normal()), Some(Region::new(0, 10)));
        let regions: Vec<_> = engine.all_style_ranges().map(|r| r.region).collect();
        assert_eq!(
            regions,
            [Region::new(-5, 5), Region::new(0, 10), Region::new(40, 5)]
        );
    }

    #[test]
    fn window_truncates_and_rebases() {
        let mut engine = engine();
        engine.set_clip_window(Some(Region::new(12, 10)));
        let all: Vec<_> = engine.all_style_ranges().collect();
        assert_eq!(
            all,
            [
                StyleInterval::new(Region::new(0, 3), bold()),
                StyleInterval::new(Region::new(3, 7), normal()),
            ]
        );
    }

    #[test]
    fn window_outside_yields_nothing() {
        let mut engine = engine();
        engine.set_clip_window(Some(Region::new(100, 10)));
        assert_eq!(engine.all_style_ranges().count(), 0);
        engine.set_clip_window(Some(Region::new(5, -3)));
        assert_eq!(engine.all_style_ranges().count(), 0);
    }

    #[test]
    fn over_read_is_observable() {
        let engine = engine();
        let mut ranges = engine.all_style_ranges();
        for _ in 0..3 {
            assert!(ranges.try_next().is_ok());
        }
        for _ in 0..10 {
            assert_eq!(ranges.try_next().unwrap_err().kind(), ErrorKind::Exhausted);
        }
        assert!(ranges.next().is_none());
    }

    #[test]
    fn restartable() {
        let engine = engine();
        assert_eq!(engine.all_style_ranges().count(), 3);
        assert_eq!(engine.all_style_ranges().count(), 3);
        let mut partial = engine.all_style_ranges();
        partial.next();
        let restarted = partial.clone().count();
        assert_eq!(restarted, 2);
    }
}
