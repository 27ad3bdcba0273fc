//! Mapping from source image coordinates to the icon coordinate space
//!
//! Icons are always emitted into a square of side [`OUT_SIZE`] centered at
//! the origin, whatever the width, height and view box of the source.

use std::str::FromStr;

use ivg_encoder::{Point, Rectangle};

use crate::document::Circle;
use crate::error::SvgError;

/// Width and height of the output coordinate space
pub const OUT_SIZE: f32 = 48.0;

/// The output view box, `[-24, +24]` on both axes
pub const OUT_VIEW_BOX: Rectangle = Rectangle::new(
    Point::new(-OUT_SIZE / 2.0, -OUT_SIZE / 2.0),
    Point::new(OUT_SIZE / 2.0, OUT_SIZE / 2.0),
);

/// The `viewBox` attribute of an SVG image
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub const fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }
}

impl FromStr for ViewBox {
    type Err = SvgError;

    /// Parse four numbers separated by whitespace and/or commas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |source| SvgError::MalformedViewBox {
            value: s.to_string(),
            source,
        };

        let values = s
            .split(|c: char| c.is_ascii_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f32>().map_err(|e| malformed(Some(e))))
            .collect::<Result<Vec<_>, _>>()?;

        match values[..] {
            [min_x, min_y, width, height] => Ok(Self::new(min_x, min_y, width, height)),
            _ => Err(malformed(None)),
        }
    }
}

/// Which offset components apply to a command's arguments
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axes {
    /// Arguments alternate x, y, x, y, ...
    Alternating,
    /// A single x argument
    X,
    /// A single y argument
    Y,
}

/// Scales and recenters source coordinates into the output space
///
/// Path arguments are scaled by `OUT_SIZE / width` on both axes. The
/// view-box offset divides the x origin by the height and the y origin by
/// the width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normalizer {
    size: f32,
    offset: [f32; 2],
}

impl Normalizer {
    pub fn new(width: f32, height: f32, view_box: &ViewBox) -> Self {
        Self {
            size: width,
            offset: [
                view_box.min_x * OUT_SIZE / height,
                view_box.min_y * OUT_SIZE / width,
            ],
        }
    }

    /// The view-box origin in output units
    pub fn offset(&self) -> [f32; 2] {
        self.offset
    }

    /// Normalize the arguments of one command in place
    ///
    /// Relative arguments are only scaled. Absolute ones are also shifted
    /// by half the output size and by the offset of their axis.
    pub fn normalize(&self, args: &mut [f32], axes: Axes, relative: bool) {
        let scale = OUT_SIZE / self.size;
        for (i, arg) in args.iter_mut().enumerate() {
            *arg *= scale;
            if relative {
                continue;
            }
            *arg -= OUT_SIZE / 2.0;
            *arg -= match axes {
                Axes::Alternating => self.offset[i & 0x01],
                Axes::X => self.offset[0],
                Axes::Y => self.offset[1],
            };
        }
    }

    /// Center and radius of a circle in output units
    pub fn circle(&self, circle: &Circle) -> (Point, f32) {
        let cx = circle.cx * OUT_SIZE / self.size - (OUT_SIZE / 2.0 + self.offset[0]);
        let cy = circle.cy * OUT_SIZE / self.size - (OUT_SIZE / 2.0 + self.offset[1]);
        let r = circle.r * OUT_SIZE / self.size;
        (Point::new(cx, cy), r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> Normalizer {
        Normalizer::new(size, size, &ViewBox::new(0.0, 0.0, size, size))
    }

    #[test]
    fn test_parse_view_box() {
        let vb: ViewBox = "0 0 24 24".parse().unwrap();
        assert_eq!(vb, ViewBox::new(0.0, 0.0, 24.0, 24.0));

        let vb: ViewBox = "-1,2.5, 10  20".parse().unwrap();
        assert_eq!(vb, ViewBox::new(-1.0, 2.5, 10.0, 20.0));
    }

    #[test]
    fn test_malformed_view_box() {
        assert!(matches!(
            "0 0 a 24".parse::<ViewBox>(),
            Err(SvgError::MalformedViewBox {
                source: Some(_),
                ..
            })
        ));
        assert!(matches!(
            "0 0 24".parse::<ViewBox>(),
            Err(SvgError::MalformedViewBox { source: None, .. })
        ));
        assert!("".parse::<ViewBox>().is_err());
    }

    #[test]
    fn test_absolute_recenters() {
        let n = square(48.0);
        let mut args = [0.0, 0.0, 48.0, 24.0];
        n.normalize(&mut args, Axes::Alternating, false);
        assert_eq!(args, [-24.0, -24.0, 24.0, 0.0]);
    }

    #[test]
    fn test_absolute_scales_by_width() {
        let n = square(24.0);
        let mut args = [12.0, 6.0];
        n.normalize(&mut args, Axes::Alternating, false);
        assert_eq!(args, [0.0, -12.0]);
    }

    #[test]
    fn test_zero_relative_offsets_stay_zero() {
        for size in [1.0, 24.0, 48.0, 512.0] {
            let n = Normalizer::new(size, size * 2.0, &ViewBox::new(3.0, 5.0, size, size));
            let mut args = [0.0; 6];
            n.normalize(&mut args, Axes::Alternating, true);
            assert_eq!(args, [0.0; 6]);
        }
    }

    #[test]
    fn test_relative_only_scales() {
        let n = Normalizer::new(24.0, 24.0, &ViewBox::new(4.0, 4.0, 24.0, 24.0));
        let mut args = [1.0, -2.0];
        n.normalize(&mut args, Axes::Alternating, true);
        assert_eq!(args, [2.0, -4.0]);
    }

    #[test]
    fn test_offset_swaps_width_and_height() {
        let n = Normalizer::new(24.0, 48.0, &ViewBox::new(2.0, 4.0, 24.0, 48.0));
        // x origin is scaled by OUT_SIZE / height, y origin by OUT_SIZE / width
        assert_eq!(n.offset(), [2.0, 8.0]);
    }

    #[test]
    fn test_single_axis_offsets() {
        let n = Normalizer::new(48.0, 48.0, &ViewBox::new(1.0, 2.0, 48.0, 48.0));

        let mut h = [10.0];
        n.normalize(&mut h, Axes::X, false);
        assert_eq!(h, [10.0 - 24.0 - 1.0]);

        let mut v = [10.0];
        n.normalize(&mut v, Axes::Y, false);
        assert_eq!(v, [10.0 - 24.0 - 2.0]);
    }

    #[test]
    fn test_circle() {
        let n = square(48.0);
        let (center, r) = n.circle(&Circle::new(24.0, 24.0, 10.0));
        assert_eq!(center, Point::new(0.0, 0.0));
        assert_eq!(r, 10.0);

        let n = square(24.0);
        let (center, r) = n.circle(&Circle::new(0.0, 12.0, 1.5));
        assert_eq!(center, Point::new(-24.0, 0.0));
        assert_eq!(r, 3.0);
    }
}
