// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{AttributeSet, Region};

/// A region of the offset space paired with the attributes applied to it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleInterval {
    /// The covered offsets.
    pub region: Region,
    /// The attributes applied to `region`.
    pub attrs: AttributeSet,
}

impl StyleInterval {
    /// Creates an interval applying `attrs` to `region`.
    #[inline]
    pub fn new(region: Region, attrs: AttributeSet) -> Self {
        Self { region, attrs }
    }

    /// The first covered offset.
    #[inline]
    pub fn offset(&self) -> i64 {
        self.region.offset()
    }

    /// The offset one past the last covered offset.
    #[inline]
    pub fn end(&self) -> i64 {
        self.region.end()
    }

    /// Returns a copy of this interval restricted to `start..end`.
    #[must_use]
    pub(crate) fn slice(&self, start: i64, end: i64) -> Self {
        Self {
            region: Region::from_bounds(start, end),
            attrs: self.attrs.clone(),
        }
    }

    /// Returns `true` if `self` and `other` carry similar attributes, regardless of region.
    pub fn is_similar_to(&self, other: &Self) -> bool {
        self.attrs.is_similar_to(&other.attrs)
    }
}
