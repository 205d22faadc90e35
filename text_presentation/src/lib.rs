// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Presentation records which visual attributes apply to which ranges of a text buffer.
//!
//! A [`PresentationEngine`] owns an ordered list of non-overlapping [`StyleInterval`]s, an
//! optional default [`AttributeSet`] covering a default [`Region`], and an optional clip window.
//! New styling is composed onto existing styling either by **merge** (attribute-wise overlay) or
//! by **replace** (full overwrite), splitting stored intervals wherever the edit boundaries fall.
//!
//! The engine does not lay out or tokenize text and does not decide what style to apply; it only
//! resolves how overlapping style contributions compose. The resolved sequence is handed to a
//! renderer through [`RenderTarget`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Forwards to `peniko/std`.
//! - `libm`: Forwards to `peniko/libm` for `no_std` targets.
//!
//! ## Example
//!
//! ```
//! use text_presentation::{AttributeSet, FontWeight, PresentationEngine, Region, StyleInterval};
//!
//! let mut engine = PresentationEngine::new();
//! engine.set_default(
//!     Some(AttributeSet::new().weight(FontWeight::Normal)),
//!     Some(Region::new(0, 20)),
//! );
//! engine.merge(StyleInterval::new(
//!     Region::new(4, 6),
//!     AttributeSet::new().weight(FontWeight::Bold),
//! ));
//!
//! let regions: Vec<_> = engine.all_style_ranges().map(|r| r.region).collect();
//! assert_eq!(
//!     regions,
//!     [Region::new(0, 4), Region::new(4, 6), Region::new(10, 10)]
//! );
//! assert_eq!(engine.non_default_style_ranges().count(), 1);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;

mod attributes;
mod error;
mod interval;
mod presentation;
mod ranges;
mod region;
mod render_target;


pub use peniko::color::Rgba8;

pub use crate::attributes::{
    AttributeSet, BorderStyle, FontRef, FontSlant, FontWeight, GlyphMetrics, UnderlineKind,
};
pub use crate::error::{Error, ErrorKind};
pub use crate::interval::StyleInterval;
pub use crate::presentation::PresentationEngine;
pub use crate::ranges::StyleRanges;
pub use crate::region::Region;
pub use crate::render_target::{RenderTarget, apply};
