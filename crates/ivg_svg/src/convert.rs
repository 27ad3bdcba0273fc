//! Whole-image conversion

use ivg_encoder::{Encoder, EncoderSink, Metadata};

use crate::document::{PathElement, SvgImage};
use crate::error::SvgError;
use crate::geometry::{Normalizer, OUT_VIEW_BOX};
use crate::shape::{CirclePool, ShapeTranslator};

/// Encoder settings for [`convert`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Keep coordinates at full precision instead of 1/64 units
    pub high_resolution_coordinates: bool,
}

/// Convert an image to IconVG bytes
pub fn convert(image: &SvgImage, options: ConvertOptions) -> Result<Vec<u8>, SvgError> {
    let mut encoder =
        Encoder::new().with_high_resolution_coordinates(options.high_resolution_coordinates);
    convert_with(image, &mut encoder)
}

/// Convert an image into any sink and return what the sink finishes with
///
/// The sink is reset first. Paths are emitted in document order; circles
/// go with the first visible path, or with an empty record after the last
/// path when every path is hidden. The first error stops the conversion.
pub fn convert_with<S: EncoderSink + ?Sized>(
    image: &SvgImage,
    sink: &mut S,
) -> Result<Vec<u8>, SvgError> {
    check_dimension("width", image.width)?;
    check_dimension("height", image.height)?;

    sink.reset(Metadata::new(OUT_VIEW_BOX));

    let normalizer = Normalizer::new(image.width, image.height, &image.view_box);
    let mut circles = (!image.circles.is_empty()).then(|| CirclePool::new(image.circles.clone()));

    let mut translator = ShapeTranslator::new(&mut *sink, normalizer);
    for (index, element) in image.paths.iter().enumerate() {
        translator.translate(index, element, &mut circles)?;
    }
    if circles.is_some() {
        translator.translate(image.paths.len(), &PathElement::default(), &mut circles)?;
    }
    let slots = translator.registry().len();

    let bytes = sink.finish()?;
    tracing::debug!(
        paths = image.paths.len(),
        circles = image.circles.len(),
        slots,
        bytes = bytes.len(),
        "converted image"
    );
    Ok(bytes)
}

fn check_dimension(attribute: &'static str, value: f32) -> Result<(), SvgError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SvgError::InvalidDimension {
            attribute,
            value: value.to_string(),
        })
    }
}
