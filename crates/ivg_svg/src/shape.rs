//! Conversion of path and circle records into encoder operations

use ivg_encoder::{Color, EncodeError, EncoderSink, Point, Position, Segment, Vec2};
use rustc_hash::FxHashMap;

use crate::document::{Circle, PathElement};
use crate::error::SvgError;
use crate::geometry::Normalizer;
use crate::path;

/// Maps opacities to the color register adjustments that hold them
///
/// Each distinct opacity gets the next slot, starting at 1; slot 0 is the
/// opaque fill. Opacities are keyed by exact value.
#[derive(Debug, Default)]
pub struct OpacityRegistry {
    slots: FxHashMap<u32, u8>,
}

impl OpacityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered opacities
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot for `opacity`, registering it with the sink on first use
    ///
    /// A new slot's register is set to a blend of the transparent color and
    /// the first custom palette color, weighted by the opacity.
    pub fn slot<S: EncoderSink + ?Sized>(
        &mut self,
        sink: &mut S,
        opacity: f32,
    ) -> Result<u8, EncodeError> {
        if opacity == 1.0 {
            return Ok(0);
        }

        // 0.0 and -0.0 compare equal and must share a slot
        let key = if opacity == 0.0 { 0 } else { opacity.to_bits() };
        if let Some(&slot) = self.slots.get(&key) {
            return Ok(slot);
        }

        let slot = u8::try_from(self.slots.len() + 1)
            .map_err(|_| EncodeError::InvalidSelectorAdjustment(u8::MAX))?;
        let t = (opacity * 255.0) as u8;
        sink.set_creg(
            slot,
            false,
            Color::blend(t, Color::TRANSPARENT_CODE, Color::palette_code(0)),
        )?;
        self.slots.insert(key, slot);

        tracing::debug!(opacity, slot, "registered opacity blend");
        Ok(slot)
    }
}

/// The image's circles, claimed by at most one record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CirclePool {
    circles: Vec<Circle>,
}

impl CirclePool {
    pub fn new(circles: Vec<Circle>) -> Self {
        Self { circles }
    }

    pub fn len(&self) -> usize {
        self.circles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.circles.is_empty()
    }
}

/// Emits records into a sink, resolving their fill adjustments
pub struct ShapeTranslator<'a, S: EncoderSink + ?Sized> {
    sink: &'a mut S,
    normalizer: Normalizer,
    registry: OpacityRegistry,
}

impl<'a, S: EncoderSink + ?Sized> ShapeTranslator<'a, S> {
    pub fn new(sink: &'a mut S, normalizer: Normalizer) -> Self {
        Self {
            sink,
            normalizer,
            registry: OpacityRegistry::new(),
        }
    }

    pub fn registry(&self) -> &OpacityRegistry {
        &self.registry
    }

    /// Emit record `index`
    ///
    /// Records with `fill="none"` emit nothing and leave `circles` alone.
    /// Any other record with something to draw takes the circle pool and
    /// appends its circles after the path data. Every emitted record ends
    /// with exactly one close-path-end-path.
    pub fn translate(
        &mut self,
        index: usize,
        element: &PathElement,
        circles: &mut Option<CirclePool>,
    ) -> Result<(), SvgError> {
        if element.is_hidden() {
            tracing::debug!(path = index, "skipping path with fill=none");
            return Ok(());
        }

        let data = element.data.trim();
        let has_circles = circles.as_ref().is_some_and(|pool| !pool.is_empty());
        if data.is_empty() && !has_circles {
            tracing::trace!(path = index, "skipping empty path");
            return Ok(());
        }
        let pool = circles.take().unwrap_or_default();

        let encode_err = |source| SvgError::PathEncode {
            path: index,
            source,
        };

        let adj = self
            .registry
            .slot(&mut *self.sink, element.effective_opacity())
            .map_err(encode_err)?;

        let mut started = false;
        if !data.is_empty() {
            started = true;
            path::interpret(&mut *self.sink, data, adj, &self.normalizer, index)?;
        }

        if !pool.is_empty() {
            tracing::trace!(path = index, circles = pool.len(), "appending circles");
        }
        for circle in &pool.circles {
            let (center, r) = self.normalizer.circle(circle);
            let (x, y) = (center.x - r, center.y);
            let moved = if started {
                self.sink.close_path_move_to(Position::Absolute, x, y)
            } else {
                started = true;
                self.sink.start_path(adj, x, y)
            };
            moved.map_err(encode_err)?;

            // Two half turns: a single full-turn arc would start and end on
            // the same point, which does not define a circle
            for dx in [2.0 * r, -2.0 * r] {
                self.sink
                    .draw(
                        Position::Relative,
                        Segment::ArcTo {
                            radii: Vec2::new(r, r),
                            rotation: 0.0,
                            large_arc: false,
                            sweep: true,
                            end: Point::new(dx, 0.0),
                        },
                    )
                    .map_err(encode_err)?;
            }
        }

        self.sink.close_path_end_path().map_err(encode_err)
    }
}
