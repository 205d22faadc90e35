// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual attributes and their composition rules.

use alloc::sync::Arc;

use peniko::color::Rgba8;

/// Font weight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// Font slant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontSlant {
    /// Upright glyphs.
    Normal,
    /// Italic glyphs.
    Italic,
}

/// Line style of the border drawn around a range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    /// A continuous line.
    Solid,
    /// A dashed line.
    Dash,
    /// A dotted line.
    Dot,
}

/// Shape of an underline decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnderlineKind {
    /// A single straight line.
    Single,
    /// Two straight lines.
    Double,
    /// A wavy line, typically used for problem markers.
    Squiggle,
    /// A hyperlink underline.
    ///
    /// Link styling is sticky under merge: once a range is a link, merging cannot turn the
    /// underline off or change its kind. Only a replace can.
    Link,
}

/// Overrides the metrics of the glyphs in a range, e.g. to reserve room for an inline object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GlyphMetrics {
    /// Ascent above the baseline.
    pub ascent: i32,
    /// Descent below the baseline.
    pub descent: i32,
    /// Advance width.
    pub width: i32,
}

impl GlyphMetrics {
    /// Creates glyph metrics from their parts.
    pub const fn new(ascent: i32, descent: i32, width: i32) -> Self {
        Self {
            ascent,
            descent,
            width,
        }
    }
}

/// A shared reference to a font description.
///
/// Cloning is cheap and two references are equal when they name the same font.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FontRef(Arc<str>);

impl FontRef {
    /// Creates a reference to the font described by `name`.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// The font description.
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A set of independently settable visual attributes.
///
/// Every field is optional. An absent field does not participate in [merging](Self::merge), so
/// an `AttributeSet` describes a partial style that can be layered over existing styling.
///
/// ## Example
///
/// ```
/// use text_presentation::{AttributeSet, FontWeight, Rgba8};
///
/// let red = Rgba8 { r: 255, g: 0, b: 0, a: 255 };
/// let base = AttributeSet::new().weight(FontWeight::Bold);
/// let merged = base.merged(&AttributeSet::new().foreground(red));
///
/// assert_eq!(merged.weight, Some(FontWeight::Bold));
/// assert_eq!(merged.foreground, Some(red));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSet {
    /// Text color.
    pub foreground: Option<Rgba8>,
    /// Color behind the text.
    pub background: Option<Rgba8>,
    /// Font to render with.
    pub font: Option<FontRef>,
    /// Font weight.
    pub weight: Option<FontWeight>,
    /// Font slant.
    pub slant: Option<FontSlant>,
    /// Border line style.
    pub border_style: Option<BorderStyle>,
    /// Border color.
    pub border_color: Option<Rgba8>,
    /// Whether the text is struck out.
    pub strikeout: Option<bool>,
    /// Strikeout line color.
    pub strikeout_color: Option<Rgba8>,
    /// Whether the text is underlined.
    pub underline: Option<bool>,
    /// Underline color.
    pub underline_color: Option<Rgba8>,
    /// Underline shape.
    pub underline_kind: Option<UnderlineKind>,
    /// Glyph metrics override.
    pub metrics: Option<GlyphMetrics>,
}

impl AttributeSet {
    /// Creates a set with no attributes.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text color.
    #[inline]
    pub fn foreground(mut self, color: Rgba8) -> Self {
        self.foreground = Some(color);
        self
    }

    /// Sets the background color.
    #[inline]
    pub fn background(mut self, color: Rgba8) -> Self {
        self.background = Some(color);
        self
    }

    /// Sets the font.
    #[inline]
    pub fn font(mut self, font: FontRef) -> Self {
        self.font = Some(font);
        self
    }

    /// Sets the font weight.
    #[inline]
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the font slant.
    #[inline]
    pub fn slant(mut self, slant: FontSlant) -> Self {
        self.slant = Some(slant);
        self
    }

    /// Sets the border style and color.
    #[inline]
    pub fn border(mut self, style: BorderStyle, color: Rgba8) -> Self {
        self.border_style = Some(style);
        self.border_color = Some(color);
        self
    }

    /// Turns the strikeout on or off.
    #[inline]
    pub fn strikeout(mut self, enabled: bool) -> Self {
        self.strikeout = Some(enabled);
        self
    }

    /// Sets the strikeout color.
    #[inline]
    pub fn strikeout_color(mut self, color: Rgba8) -> Self {
        self.strikeout_color = Some(color);
        self
    }

    /// Turns the underline on or off.
    #[inline]
    pub fn underline(mut self, enabled: bool) -> Self {
        self.underline = Some(enabled);
        self
    }

    /// Sets the underline color.
    #[inline]
    pub fn underline_color(mut self, color: Rgba8) -> Self {
        self.underline_color = Some(color);
        self
    }

    /// Sets the underline shape.
    #[inline]
    pub fn underline_kind(mut self, kind: UnderlineKind) -> Self {
        self.underline_kind = Some(kind);
        self
    }

    /// Sets the glyph metrics override.
    #[inline]
    pub fn metrics(mut self, metrics: GlyphMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Returns `true` if no attribute is set.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if `self` and `other` render identically.
    ///
    /// Similarity ignores where a set came from and compares only the attributes themselves.
    pub fn is_similar_to(&self, other: &Self) -> bool {
        self == other
    }

    /// Returns `true` if this set carries link styling.
    pub fn is_link(&self) -> bool {
        self.underline_kind == Some(UnderlineKind::Link)
    }

    /// Overlays `incoming` onto `self`, attribute by attribute.
    ///
    /// Attributes present in `incoming` replace those in `self` and absent ones leave `self`
    /// untouched, with two exceptions for link styling:
    ///
    /// - If `self` is a link, its underline flag and kind are kept.
    /// - If `incoming` is a link, its foreground is taken even when absent.
    pub fn merge(&mut self, incoming: &Self) {
        overlay(&mut self.font, &incoming.font);
        overlay(&mut self.weight, &incoming.weight);
        overlay(&mut self.slant, &incoming.slant);
        overlay(&mut self.metrics, &incoming.metrics);
        overlay(&mut self.background, &incoming.background);
        overlay(&mut self.strikeout, &incoming.strikeout);
        overlay(&mut self.strikeout_color, &incoming.strikeout_color);
        overlay(&mut self.underline_color, &incoming.underline_color);
        overlay(&mut self.border_style, &incoming.border_style);
        overlay(&mut self.border_color, &incoming.border_color);

        let link = LinkFields::of(self).merge(LinkFields::of(incoming));
        self.underline = link.underline;
        self.underline_kind = link.kind;
        self.foreground = link.foreground;
    }

    /// Returns the result of [merging](Self::merge) `incoming` onto a copy of `self`.
    #[must_use]
    pub fn merged(&self, incoming: &Self) -> Self {
        let mut result = self.clone();
        result.merge(incoming);
        result
    }
}

#[inline]
fn overlay<T: Clone>(current: &mut Option<T>, incoming: &Option<T>) {
    if let Some(value) = incoming {
        *current = Some(value.clone());
    }
}

/// The attributes that take part in link stickiness.
#[derive(Clone, Copy, Debug, PartialEq)]
struct LinkFields {
    underline: Option<bool>,
    kind: Option<UnderlineKind>,
    foreground: Option<Rgba8>,
}

impl LinkFields {
    fn of(attrs: &AttributeSet) -> Self {
        Self {
            underline: attrs.underline,
            kind: attrs.underline_kind,
            foreground: attrs.foreground,
        }
    }

    fn is_link(self) -> bool {
        self.kind == Some(UnderlineKind::Link)
    }

    fn merge(self, incoming: Self) -> Self {
        let foreground = if incoming.is_link() {
            incoming.foreground
        } else {
            incoming.foreground.or(self.foreground)
        };
        if self.is_link() {
            return Self {
                foreground,
                ..self
            };
        }
        Self {
            underline: incoming.underline.or(self.underline),
            kind: incoming.kind.or(self.kind),
            foreground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AttributeSet, BorderStyle, FontRef, FontSlant, FontWeight, GlyphMetrics, LinkFields,
        UnderlineKind,
    };
    use peniko::color::Rgba8;

    const fn grey(v: u8) -> Rgba8 {
        Rgba8 {
            r: v,
            g: v,
            b: v,
            a: 255,
        }
    }

    #[test]
    fn absent_fields_leave_target_untouched() {
        let base = AttributeSet::new()
            .weight(FontWeight::Bold)
            .foreground(grey(1))
            .strikeout(true);
        assert_eq!(base.merged(&AttributeSet::new()), base);
    }

    #[test]
    fn present_fields_overwrite() {
        let base = AttributeSet::new()
            .weight(FontWeight::Bold)
            .underline(true)
            .background(grey(2));
        let incoming = AttributeSet::new()
            .weight(FontWeight::Normal)
            .underline(false)
            .slant(FontSlant::Italic);
        let merged = base.merged(&incoming);
        assert_eq!(merged.weight, Some(FontWeight::Normal));
        assert_eq!(merged.underline, Some(false));
        assert_eq!(merged.slant, Some(FontSlant::Italic));
        assert_eq!(merged.background, Some(grey(2)));
    }

    #[test]
    fn merge_covers_every_field() {
        let incoming = AttributeSet::new()
            .foreground(grey(1))
            .background(grey(2))
            .font(FontRef::new("Monospace 10"))
            .weight(FontWeight::Bold)
            .slant(FontSlant::Italic)
            .border(BorderStyle::Dash, grey(3))
            .strikeout(true)
            .strikeout_color(grey(4))
            .underline(true)
            .underline_color(grey(5))
            .underline_kind(UnderlineKind::Squiggle)
            .metrics(GlyphMetrics::new(0, 0, 10));
        let merged = AttributeSet::new()
            .weight(FontWeight::Normal)
            .merged(&incoming);
        assert_eq!(merged, incoming);
        assert_eq!(merged.font.as_ref().map(FontRef::name), Some("Monospace 10"));
    }

    #[test]
    fn link_kind_is_sticky() {
        let link = AttributeSet::new()
            .underline(true)
            .underline_kind(UnderlineKind::Link);
        let merged = link.merged(
            &AttributeSet::new()
                .underline(false)
                .underline_kind(UnderlineKind::Squiggle),
        );
        assert_eq!(merged.underline, Some(true));
        assert_eq!(merged.underline_kind, Some(UnderlineKind::Link));
    }

    #[test]
    fn link_keeps_other_fields_mergeable() {
        let link = AttributeSet::new()
            .underline_kind(UnderlineKind::Link)
            .foreground(grey(9));
        let merged = link.merged(&AttributeSet::new().foreground(grey(7)).underline_color(grey(3)));
        assert_eq!(merged.foreground, Some(grey(7)));
        assert_eq!(merged.underline_color, Some(grey(3)));
        assert!(merged.is_link());
    }

    #[test]
    fn merging_link_takes_incoming_foreground() {
        let colored = AttributeSet::new().foreground(grey(1));

        let without_color = colored.merged(&AttributeSet::new().underline_kind(UnderlineKind::Link));
        assert_eq!(without_color.foreground, None);
        assert!(without_color.is_link());

        let with_color = colored.merged(
            &AttributeSet::new()
                .underline_kind(UnderlineKind::Link)
                .foreground(grey(200)),
        );
        assert_eq!(with_color.foreground, Some(grey(200)));
    }

    #[test]
    fn link_state_machine() {
        let plain = LinkFields {
            underline: Some(true),
            kind: Some(UnderlineKind::Double),
            foreground: Some(grey(1)),
        };
        let to_link = LinkFields {
            underline: None,
            kind: Some(UnderlineKind::Link),
            foreground: None,
        };
        let linked = plain.merge(to_link);
        assert_eq!(
            linked,
            LinkFields {
                underline: Some(true),
                kind: Some(UnderlineKind::Link),
                foreground: None,
            }
        );

        let back = linked.merge(LinkFields {
            underline: Some(false),
            kind: Some(UnderlineKind::Single),
            foreground: None,
        });
        assert_eq!(back, linked);
    }

    #[test]
    fn similarity_is_field_equality() {
        let a = AttributeSet::new().weight(FontWeight::Normal);
        let b = AttributeSet {
            weight: Some(FontWeight::Normal),
            ..AttributeSet::default()
        };
        assert!(a.is_similar_to(&b));
        assert!(!a.is_similar_to(&AttributeSet::new()));
        assert!(AttributeSet::new().is_unset());
        assert!(!a.is_unset());
    }
}
