// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::{AttributeSet, Error, Region, StyleInterval, StyleRanges};

/// How an incoming attribute set combines with the styling it lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Composition {
    Merge,
    Replace,
}

impl Composition {
    fn compose(self, occupant: &AttributeSet, incoming: &AttributeSet) -> AttributeSet {
        match self {
            Self::Merge => occupant.merged(incoming),
            Self::Replace => incoming.clone(),
        }
    }
}

#[derive(Clone, Debug)]
struct DefaultStyle {
    attrs: AttributeSet,
    region: Region,
}

/// Styling of a text buffer, stored as ordered, non-overlapping [`StyleInterval`]s.
///
/// Offsets not covered by a stored interval take the default attributes, if a default is set
/// and its region covers them. Iteration fills those gaps on the fly, so the default is never
/// materialized.
///
/// All queries are relative to the clip window when one is set: intervals outside the window are
/// skipped, intervals crossing its bounds are truncated, and offsets are re-based so the window
/// start maps to `0`. Edits always use absolute offsets.
///
/// Invariants maintained by every mutation:
///
/// - stored intervals are sorted by offset and pairwise disjoint,
/// - every stored interval has a positive length.
#[derive(Clone, Debug, Default)]
pub struct PresentationEngine {
    ranges: Vec<StyleInterval>,
    default: Option<DefaultStyle>,
    window: Option<Region>,
    extent: Option<Region>,
}

impl PresentationEngine {
    /// Creates an empty engine without default, clip window or explicit extent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty engine whose [extent](Self::extent) is `extent`.
    pub fn with_extent(extent: Region) -> Self {
        Self {
            extent: Some(extent),
            ..Self::default()
        }
    }

    /// Creates an empty engine with room for `capacity` stored intervals.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ranges: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Sets or clears the default attributes.
    ///
    /// The default applies to every offset in `region` that no stored interval covers. Passing
    /// `None` for `attrs` clears the default entirely. If `region` is `None`, the default covers
    /// the explicit extent, or else the span of the stored intervals.
    pub fn set_default(&mut self, attrs: Option<AttributeSet>, region: Option<Region>) {
        self.default = match attrs {
            Some(attrs) => {
                let region = region
                    .or(self.extent)
                    .or_else(|| self.stored_span())
                    .unwrap_or_default();
                Some(DefaultStyle { attrs, region })
            }
            None => None,
        };
    }

    /// The default attributes, if set.
    pub fn default_attributes(&self) -> Option<&AttributeSet> {
        self.default.as_ref().map(|default| &default.attrs)
    }

    /// The region covered by the default attributes, in absolute offsets.
    pub fn default_region(&self) -> Option<Region> {
        self.default.as_ref().map(|default| default.region)
    }

    /// The default attributes and their region relative to the clip window.
    pub fn default_style(&self) -> Option<StyleInterval> {
        self.default.as_ref().map(|default| {
            StyleInterval::new(self.window_relative(default.region), default.attrs.clone())
        })
    }

    /// Restricts all queries to `window`, or lifts the restriction with `None`.
    pub fn set_clip_window(&mut self, window: Option<Region>) {
        self.window = window;
    }

    /// The current clip window.
    pub fn clip_window(&self) -> Option<Region> {
        self.window
    }

    /// Removes all stored intervals.
    ///
    /// The default and the clip window are kept.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Returns `true` if there are no stored intervals and no default.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty() && self.default.is_none()
    }

    /// The number of stored intervals, not counting default fill.
    pub fn stored_len(&self) -> usize {
        self.ranges.len()
    }

    /// The full addressable span, relative to the clip window.
    ///
    /// This is the explicit extent if one was given at construction, else the default region,
    /// else the span of the stored intervals. The result may have a negative length when the
    /// clip window lies outside that span. An engine with none of the above reports an empty
    /// region at `0`.
    pub fn extent(&self) -> Region {
        self.extent
            .or_else(|| self.default_region())
            .or_else(|| self.stored_span())
            .map(|extent| self.window_relative(extent))
            .unwrap_or_default()
    }

    /// The region that has styling, relative to the clip window.
    ///
    /// This is the default region when a default is set, else the span of the stored intervals
    /// visible through the clip window. Returns `None` when neither exists.
    pub fn coverage(&self) -> Option<Region> {
        if let Some(default) = &self.default {
            return Some(self.window_relative(default.region));
        }
        let first = self.first()?;
        let last = self.last()?;
        Some(Region::from_bounds(first.offset(), last.end()))
    }

    /// The number of intervals yielded by [`all_style_ranges`](Self::all_style_ranges).
    ///
    /// Returns `None` when there is no [coverage](Self::coverage).
    pub fn denumerable_count(&self) -> Option<usize> {
        self.coverage()
            .map(|_| self.all_style_ranges().count())
    }

    /// Iterates over all styled intervals, including default fill, in offset order.
    pub fn all_style_ranges(&self) -> StyleRanges<'_> {
        StyleRanges::new(self, false)
    }

    /// Iterates over the intervals whose attributes differ from the default.
    ///
    /// Without a default this yields the same intervals as
    /// [`all_style_ranges`](Self::all_style_ranges).
    pub fn non_default_style_ranges(&self) -> StyleRanges<'_> {
        StyleRanges::new(self, true)
    }

    /// The first interval of [`all_style_ranges`](Self::all_style_ranges).
    pub fn first(&self) -> Option<StyleInterval> {
        self.all_style_ranges().next()
    }

    /// The last interval of [`all_style_ranges`](Self::all_style_ranges).
    pub fn last(&self) -> Option<StyleInterval> {
        self.all_style_ranges().last()
    }

    /// The first interval of [`non_default_style_ranges`](Self::non_default_style_ranges).
    pub fn first_non_default(&self) -> Option<StyleInterval> {
        self.non_default_style_ranges().next()
    }

    /// The last interval of [`non_default_style_ranges`](Self::non_default_style_ranges).
    pub fn last_non_default(&self) -> Option<StyleInterval> {
        self.non_default_style_ranges().last()
    }

    /// Overlays `interval.attrs` onto the styling within `interval.region`.
    ///
    /// Stored intervals crossing the region bounds are split; each piece inside the region is
    /// [merged](AttributeSet::merge) independently. Parts of the region covered only by the
    /// default become stored intervals holding the default merged with the incoming attributes.
    ///
    /// The region is first clipped to the explicit extent given at construction, if any, and
    /// then to the default region, if one is set. Empty or negative regions are ignored.
    pub fn merge(&mut self, interval: StyleInterval) {
        self.apply(interval, Composition::Merge);
    }

    /// Overwrites the styling within `interval.region` with `interval.attrs`.
    ///
    /// Splitting and clipping follow [`merge`](Self::merge), but previous attributes inside the
    /// region are discarded.
    pub fn replace(&mut self, interval: StyleInterval) {
        self.apply(interval, Composition::Replace);
    }

    /// Merges a batch of disjoint intervals in a single pass.
    ///
    /// The intervals need not be sorted and the result does not depend on their order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OverlappingBatch`](crate::ErrorKind::OverlappingBatch) if two
    /// intervals overlap after clipping. The engine is left unchanged in that case.
    pub fn merge_all(
        &mut self,
        intervals: impl IntoIterator<Item = StyleInterval>,
    ) -> Result<(), Error> {
        self.apply_batch(intervals, Composition::Merge)
    }

    /// Replaces a batch of disjoint intervals in a single pass.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OverlappingBatch`](crate::ErrorKind::OverlappingBatch) if two
    /// intervals overlap after clipping. The engine is left unchanged in that case.
    pub fn replace_all(
        &mut self,
        intervals: impl IntoIterator<Item = StyleInterval>,
    ) -> Result<(), Error> {
        self.apply_batch(intervals, Composition::Replace)
    }

    /// Appends `interval` after the stored intervals without composing it with anything.
    ///
    /// This is the cheap path for building a presentation from already ordered styling. The
    /// region is clipped like in [`merge`](Self::merge), and empty regions are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::OutOfOrder`](crate::ErrorKind::OutOfOrder) if the interval starts
    /// before the end of the last stored interval.
    pub fn push(&mut self, interval: StyleInterval) -> Result<(), Error> {
        let Some(region) = clip_request(interval.region, self.clip_bounds()) else {
            return Ok(());
        };
        if let Some(last) = self.ranges.last() {
            if region.offset() < last.end() {
                let err = Error::out_of_order(region, last.region);
                log::debug!("rejecting append: {err}");
                return Err(err);
            }
        }
        self.ranges.push(StyleInterval::new(region, interval.attrs));
        Ok(())
    }

    pub(crate) fn stored(&self) -> &[StyleInterval] {
        &self.ranges
    }

    pub(crate) fn default_parts(&self) -> Option<(&AttributeSet, Region)> {
        self.default
            .as_ref()
            .map(|default| (&default.attrs, default.region))
    }

    /// Regions that edits are clipped to, outermost first.
    fn clip_bounds(&self) -> [Option<Region>; 2] {
        [self.extent, self.default_region()]
    }

    fn window_relative(&self, region: Region) -> Region {
        match self.window {
            Some(window) => region.relative_to(window),
            None => region,
        }
    }

    fn stored_span(&self) -> Option<Region> {
        let first = self.ranges.first()?;
        let last = self.ranges.last()?;
        Some(Region::from_bounds(first.offset(), last.end()))
    }

    fn apply(&mut self, interval: StyleInterval, composition: Composition) {
        let Some(region) = clip_request(interval.region, self.clip_bounds()) else {
            log::trace!("ignoring {composition:?} of empty region {}", interval.region);
            return;
        };
        log::trace!(
            "{composition:?} over {region} with {} stored ranges",
            self.ranges.len()
        );
        let edit = StyleInterval::new(region, interval.attrs);
        self.splice(core::slice::from_ref(&edit), composition);
    }

    fn apply_batch(
        &mut self,
        intervals: impl IntoIterator<Item = StyleInterval>,
        composition: Composition,
    ) -> Result<(), Error> {
        let bounds = self.clip_bounds();
        let mut edits: Vec<StyleInterval> = intervals
            .into_iter()
            .filter_map(|interval| {
                let region = clip_request(interval.region, bounds)?;
                Some(StyleInterval::new(region, interval.attrs))
            })
            .collect();
        edits.sort_by_key(StyleInterval::offset);
        if let Some(pair) = edits.windows(2).find(|pair| pair[1].offset() < pair[0].end()) {
            let err = Error::overlapping_batch(pair[1].region, pair[0].region);
            log::debug!("rejecting batch {composition:?}: {err}");
            return Err(err);
        }
        log::trace!(
            "batch {composition:?} of {} ranges over {} stored ranges",
            edits.len(),
            self.ranges.len()
        );
        self.splice(&edits, composition);
        Ok(())
    }

    /// Rebuilds the stored intervals touched by `edits`.
    ///
    /// `edits` must be sorted, disjoint and non-empty regions. Only the slice of stored
    /// intervals overlapping `edits[0].offset()..edits[last].end()` is rebuilt.
    fn splice(&mut self, edits: &[StyleInterval], composition: Composition) {
        let (Some(first_edit), Some(last_edit)) = (edits.first(), edits.last()) else {
            return;
        };
        let first = self
            .ranges
            .partition_point(|range| range.end() <= first_edit.offset());
        let last = first
            + self.ranges[first..].partition_point(|range| range.offset() < last_edit.end());

        let gap = self
            .default
            .as_ref()
            .map(|default| default.attrs.clone())
            .unwrap_or_default();
        let mut spliced: SmallVec<[StyleInterval; 4]> = SmallVec::new();
        let mut stored = self.ranges[first..last].iter();
        let mut current = stored.next().cloned();

        for edit in edits {
            let (start, end) = (edit.offset(), edit.end());

            // Stored material between the previous edit and this one is kept as is.
            while let Some(range) = current.take() {
                if range.end() > start {
                    current = Some(range);
                    break;
                }
                spliced.push(range);
                current = stored.next().cloned();
            }

            let mut cursor = start;
            while let Some(range) = current.take() {
                if range.offset() >= end {
                    current = Some(range);
                    break;
                }
                if range.offset() < cursor {
                    spliced.push(range.slice(range.offset(), cursor));
                } else if cursor < range.offset() {
                    spliced.push(StyleInterval::new(
                        Region::from_bounds(cursor, range.offset()),
                        composition.compose(&gap, &edit.attrs),
                    ));
                }
                let piece_start = range.offset().max(cursor);
                let piece_end = range.end().min(end);
                spliced.push(StyleInterval::new(
                    Region::from_bounds(piece_start, piece_end),
                    composition.compose(&range.attrs, &edit.attrs),
                ));
                cursor = piece_end;
                if range.end() > end {
                    current = Some(range.slice(end, range.end()));
                    break;
                }
                current = stored.next().cloned();
            }
            if cursor < end {
                spliced.push(StyleInterval::new(
                    Region::from_bounds(cursor, end),
                    composition.compose(&gap, &edit.attrs),
                ));
            }
        }
        spliced.extend(current);
        spliced.extend(stored.cloned());

        self.ranges.splice(first..last, spliced);
        debug_assert!(
            self.ranges
                .windows(2)
                .all(|pair| pair[0].end() <= pair[1].offset()),
            "stored ranges must stay ordered and disjoint"
        );
    }
}

/// Clips a requested region to each present bound. Returns `None` for empty requests.
fn clip_request(region: Region, bounds: [Option<Region>; 2]) -> Option<Region> {
    if region.is_empty() {
        return None;
    }
    bounds
        .into_iter()
        .flatten()
        .try_fold(Region::from_bounds(region.offset(), region.end()), Region::intersection)
}
