//! Graphic metadata: view box and suggested palette

use crate::color::{Color, Rgba};
use crate::geom::{Point, Rectangle};

/// Metadata chunk identifier of the view box
pub(crate) const MID_VIEW_BOX: u32 = 0;
/// Metadata chunk identifier of the suggested palette
pub(crate) const MID_SUGGESTED_PALETTE: u32 = 1;

/// View box assumed by decoders when the graphic does not declare one
pub const DEFAULT_VIEW_BOX: Rectangle =
    Rectangle::new(Point::new(-32.0, -32.0), Point::new(32.0, 32.0));

/// Palette assumed by decoders when the graphic does not suggest one
pub const DEFAULT_PALETTE: Palette = Palette([Rgba::BLACK; 64]);

/// The 64 custom palette colors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette(pub [Rgba; 64]);

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

impl Palette {
    /// Number of leading entries that must be written out, i.e. the
    /// position after the last entry that differs from the default
    pub(crate) fn explicit_len(&self) -> usize {
        self.0
            .iter()
            .rposition(|c| *c != Rgba::BLACK)
            .map_or(0, |i| i + 1)
    }

    /// Bytes of the suggested palette chunk payload: one header byte
    /// (entry count minus one, and the color width in the top two bits)
    /// followed by the entries in the narrowest encoding all of them fit
    pub(crate) fn encode(&self) -> Vec<u8> {
        let n = self.explicit_len().max(1);
        let colors: Vec<Color> = self.0[..n].iter().map(|c| Color::Rgba(*c)).collect();

        let mut out = Vec::with_capacity(1 + 4 * n);
        if colors.iter().all(|c| c.encode_1().is_some()) {
            out.push((n - 1) as u8);
            out.extend(colors.iter().filter_map(Color::encode_1));
        } else if colors.iter().all(|c| c.encode_2().is_some()) {
            out.push((n - 1) as u8 | 0x40);
            out.extend(colors.iter().filter_map(Color::encode_2).flatten());
        } else if colors.iter().all(|c| c.encode_3_direct().is_some()) {
            out.push((n - 1) as u8 | 0x80);
            out.extend(colors.iter().filter_map(Color::encode_3_direct).flatten());
        } else {
            out.push((n - 1) as u8 | 0xc0);
            out.extend(colors.iter().filter_map(Color::encode_4).flatten());
        }
        out
    }
}

/// Graphic-wide settings written right after the magic bytes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metadata {
    pub view_box: Rectangle,
    pub palette: Palette,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            view_box: DEFAULT_VIEW_BOX,
            palette: DEFAULT_PALETTE,
        }
    }
}

impl Metadata {
    pub fn new(view_box: Rectangle) -> Self {
        Self {
            view_box,
            ..Self::default()
        }
    }
}
