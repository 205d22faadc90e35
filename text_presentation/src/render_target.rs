// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::{PresentationEngine, StyleInterval};

/// A renderer-side style table that a [`PresentationEngine`] can be [applied](apply) to.
///
/// Implementors replace their whole style table with the given intervals. The intervals are
/// ordered by offset, non-overlapping, and already clipped to the engine's clip window.
pub trait RenderTarget {
    /// Replace the target's style table with `ranges`, in order.
    fn set_style_ranges(&mut self, ranges: &[StyleInterval]);
}

impl RenderTarget for Vec<StyleInterval> {
    fn set_style_ranges(&mut self, ranges: &[StyleInterval]) {
        self.clear();
        self.extend_from_slice(ranges);
    }
}

/// Hands the fully resolved styling of `engine` to `target`.
///
/// The intervals passed on are exactly those of [`PresentationEngine::all_style_ranges`].
///
/// ## Example
///
/// ```
/// use text_presentation::{AttributeSet, PresentationEngine, Region, StyleInterval, apply};
///
/// let mut engine = PresentationEngine::new();
/// engine.merge(StyleInterval::new(Region::new(0, 4), AttributeSet::new().underline(true)));
///
/// let mut table: Vec<StyleInterval> = Vec::new();
/// apply(&engine, &mut table);
/// assert_eq!(table.len(), 1);
/// ```
pub fn apply<R: RenderTarget + ?Sized>(engine: &PresentationEngine, target: &mut R) {
    let ranges: Vec<StyleInterval> = engine.all_style_ranges().collect();
    log::trace!("applying {} style ranges to render target", ranges.len());
    target.set_style_ranges(&ranges);
}

#[cfg(test)]
mod tests {
    use super::{RenderTarget, apply};
    use crate::{AttributeSet, FontWeight, PresentationEngine, Region, StyleInterval};
    use alloc::vec;
    use alloc::vec::Vec;

    /// A target that records how often it was updated.
    #[derive(Default)]
    struct CountingTarget {
        updates: usize,
        table: Vec<(i64, i64)>,
    }

    impl RenderTarget for CountingTarget {
        fn set_style_ranges(&mut self, ranges: &[StyleInterval]) {
            self.updates += 1;
            self.table = ranges
                .iter()
                .map(|range| (range.offset(), range.end()))
                .collect();
        }
    }

    #[test]
    fn replaces_previous_table() {
        let mut engine = PresentationEngine::new();
        engine.set_default(
            Some(AttributeSet::new().weight(FontWeight::Normal)),
            Some(Region::new(0, 10)),
        );
        engine.merge(StyleInterval::new(
            Region::new(2, 3),
            AttributeSet::new().weight(FontWeight::Bold),
        ));

        let mut table = vec![StyleInterval::default(); 5];
        apply(&engine, &mut table);
        assert_eq!(table, engine.all_style_ranges().collect::<Vec<_>>());

        let mut target = CountingTarget::default();
        apply(&engine, &mut target);
        engine.set_clip_window(Some(Region::new(3, 4)));
        apply(&engine, &mut target);
        assert_eq!(target.updates, 2);
        assert_eq!(target.table, [(0, 2), (2, 4)]);
    }
}
