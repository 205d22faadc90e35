// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Region;

/// Rich error type for presentation operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the region the caller supplied and, when the
/// failure is a conflict, the region it conflicted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The region of the rejected request, if any.
    region: Option<Region>,

    /// The already present region that caused the conflict, if any.
    conflict: Option<Region>,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The region of the rejected request, if the error refers to one.
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    /// The region the request conflicted with, if any.
    pub fn conflict(&self) -> Option<Region> {
        self.conflict
    }

    pub(crate) fn exhausted() -> Self {
        Self {
            kind: ErrorKind::Exhausted,
            region: None,
            conflict: None,
        }
    }

    pub(crate) fn out_of_order(region: Region, last: Region) -> Self {
        Self {
            kind: ErrorKind::OutOfOrder,
            region: Some(region),
            conflict: Some(last),
        }
    }

    pub(crate) fn overlapping_batch(region: Region, previous: Region) -> Self {
        Self {
            kind: ErrorKind::OverlappingBatch,
            region: Some(region),
            conflict: Some(previous),
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.kind, self.region, self.conflict) {
            (ErrorKind::Exhausted, ..) => write!(f, "style range iterator is exhausted"),
            (ErrorKind::OutOfOrder, Some(region), Some(last)) => write!(
                f,
                "range {region} starts before the end of the last stored range {last}"
            ),
            (ErrorKind::OverlappingBatch, Some(region), Some(previous)) => {
                write!(f, "batch range {region} overlaps batch range {previous}")
            }
            (ErrorKind::OutOfOrder, ..) => write!(f, "range out of order"),
            (ErrorKind::OverlappingBatch, ..) => write!(f, "overlapping batch ranges"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A style range iterator was advanced past its last element.
    Exhausted,

    /// An appended range started before the end of the last stored range.
    OutOfOrder,

    /// Two ranges of a batch merge or replace overlapped.
    OverlappingBatch,
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use crate::Region;
    use alloc::format;

    #[test]
    fn messages() {
        let err = Error::out_of_order(Region::new(3, 2), Region::new(0, 10));
        assert_eq!(err.kind(), ErrorKind::OutOfOrder);
        assert_eq!(err.region(), Some(Region::new(3, 2)));
        assert_eq!(err.conflict(), Some(Region::new(0, 10)));
        let msg = format!("{err}");
        assert!(msg.contains("[3, 5)"));
        assert!(msg.contains("[0, 10)"));

        let err = Error::overlapping_batch(Region::new(4, 4), Region::new(2, 4));
        assert_eq!(err.kind(), ErrorKind::OverlappingBatch);
        assert!(format!("{err}").contains("overlaps"));

        let err = Error::exhausted();
        assert_eq!(err.region(), None);
        assert!(format!("{err}").contains("exhausted"));
    }
}
