//! SVG image type and loading

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};

use crate::convert::{convert, ConvertOptions};
use crate::error::SvgError;
use crate::geometry::ViewBox;

/// A `<path>` element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathElement {
    /// The `d` attribute
    pub data: String,
    pub fill: Option<String>,
    pub fill_opacity: Option<f32>,
    pub opacity: Option<f32>,
}

impl PathElement {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Whether the path is painted with `fill="none"`
    pub fn is_hidden(&self) -> bool {
        self.fill.as_deref() == Some("none")
    }

    /// `opacity`, falling back to `fill-opacity`, then to fully opaque
    pub fn effective_opacity(&self) -> f32 {
        self.opacity.or(self.fill_opacity).unwrap_or(1.0)
    }
}

/// A `<circle>` element, in source units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub r: f32,
}

impl Circle {
    pub const fn new(cx: f32, cy: f32, r: f32) -> Self {
        Self { cx, cy, r }
    }
}

/// A loaded SVG image
#[derive(Clone, Debug, PartialEq)]
pub struct SvgImage {
    pub width: f32,
    pub height: f32,
    pub view_box: ViewBox,
    /// Paths in document order
    pub paths: Vec<PathElement>,
    /// Circles in document order
    pub circles: Vec<Circle>,
}

impl SvgImage {
    /// An empty image whose view box covers `width` x `height`
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            view_box: ViewBox::new(0.0, 0.0, width, height),
            paths: Vec::new(),
            circles: Vec::new(),
        }
    }

    /// Load an SVG image from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SvgError> {
        let data = fs::read(path)?;
        Self::from_data(&data)
    }

    /// Load an SVG image from raw bytes
    pub fn from_data(data: &[u8]) -> Result<Self, SvgError> {
        Self::from_str(std::str::from_utf8(data)?)
    }

    /// Load an SVG image from a string
    ///
    /// Only `<path>` and `<circle>` elements directly under the root are
    /// read; everything else is ignored.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(svg_str: &str) -> Result<Self, SvgError> {
        let doc = Document::parse(svg_str)?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(SvgError::MissingRoot(root.tag_name().name().to_string()));
        }

        let view_box = root
            .attribute("viewBox")
            .map(str::parse::<ViewBox>)
            .transpose()?;
        let width = root.attribute("width").map(|v| dimension("width", v)).transpose()?;
        let height = root.attribute("height").map(|v| dimension("height", v)).transpose()?;

        let (width, height) = match (width, height, view_box) {
            (Some(w), Some(h), _) => (w, h),
            (w, h, Some(vb)) => (w.unwrap_or(vb.width), h.unwrap_or(vb.height)),
            (None, _, None) => return Err(missing_dimension("width")),
            (_, None, None) => return Err(missing_dimension("height")),
        };

        let mut image = Self::new(width, height);
        if let Some(view_box) = view_box {
            image.view_box = view_box;
        }

        for node in root.children().filter(Node::is_element) {
            match node.tag_name().name() {
                "path" => image.paths.push(path_element(&node)?),
                "circle" => image.circles.push(circle(&node)?),
                other => tracing::trace!(element = other, "ignoring element"),
            }
        }

        tracing::debug!(
            width,
            height,
            paths = image.paths.len(),
            circles = image.circles.len(),
            "loaded svg"
        );
        Ok(image)
    }

    /// Convert to IconVG with default options
    pub fn to_ivg(&self) -> Result<Vec<u8>, SvgError> {
        convert(self, ConvertOptions::default())
    }
}

fn dimension(attribute: &'static str, value: &str) -> Result<f32, SvgError> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed);
    number.parse().map_err(|_| SvgError::InvalidDimension {
        attribute,
        value: value.to_string(),
    })
}

fn missing_dimension(attribute: &'static str) -> SvgError {
    SvgError::InvalidDimension {
        attribute,
        value: String::new(),
    }
}

fn number(
    node: &Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<Option<f32>, SvgError> {
    node.attribute(attribute)
        .map(|value| {
            value.trim().parse().map_err(|_| SvgError::InvalidAttribute {
                element,
                attribute,
                value: value.to_string(),
            })
        })
        .transpose()
}

fn path_element(node: &Node) -> Result<PathElement, SvgError> {
    Ok(PathElement {
        data: node.attribute("d").unwrap_or_default().to_string(),
        fill: node.attribute("fill").map(str::to_string),
        fill_opacity: number(node, "path", "fill-opacity")?,
        opacity: number(node, "path", "opacity")?,
    })
}

fn circle(node: &Node) -> Result<Circle, SvgError> {
    Ok(Circle {
        cx: number(node, "circle", "cx")?.unwrap_or(0.0),
        cy: number(node, "circle", "cy")?.unwrap_or(0.0),
        r: number(node, "circle", "r")?.unwrap_or(0.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_paths_and_circles() {
        let image = SvgImage::from_str(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">
                <path d="M0 0h24v24H0z" fill="none"/>
                <path d="M12 2L2 22h20z" fill-opacity=".3"/>
                <circle cx="12" cy="12" r="3"/>
                <path d="M4 4h2" opacity="0.5" fill-opacity="0.9"/>
            </svg>"#,
        )
        .unwrap();

        assert_eq!((image.width, image.height), (24.0, 24.0));
        assert_eq!(image.view_box, ViewBox::new(0.0, 0.0, 24.0, 24.0));
        assert_eq!(image.paths.len(), 3);
        assert!(image.paths[0].is_hidden());
        assert_eq!(image.paths[1].effective_opacity(), 0.3);
        assert_eq!(image.paths[2].effective_opacity(), 0.5);
        assert_eq!(image.circles, vec![Circle::new(12.0, 12.0, 3.0)]);
    }

    #[test]
    fn test_px_suffix() {
        let image = SvgImage::from_str(r#"<svg width="48px" height=" 32px "/>"#).unwrap();
        assert_eq!((image.width, image.height), (48.0, 32.0));
        assert_eq!(image.view_box, ViewBox::new(0.0, 0.0, 48.0, 32.0));
    }

    #[test]
    fn test_dimensions_default_to_view_box() {
        let image = SvgImage::from_str(r#"<svg viewBox="2 4 20 10"/>"#).unwrap();
        assert_eq!((image.width, image.height), (20.0, 10.0));
        assert_eq!(image.view_box, ViewBox::new(2.0, 4.0, 20.0, 10.0));
    }

    #[test]
    fn test_missing_dimensions() {
        assert!(matches!(
            SvgImage::from_str("<svg/>"),
            Err(SvgError::InvalidDimension {
                attribute: "width",
                ..
            })
        ));
        assert!(matches!(
            SvgImage::from_str(r#"<svg width="10"/>"#),
            Err(SvgError::InvalidDimension {
                attribute: "height",
                ..
            })
        ));
        assert!(matches!(
            SvgImage::from_str(r#"<svg width="ten" height="10"/>"#),
            Err(SvgError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_wrong_root() {
        assert!(matches!(
            SvgImage::from_str("<g/>"),
            Err(SvgError::MissingRoot(name)) if name == "g"
        ));
    }

    #[test]
    fn test_malformed_markup() {
        assert!(matches!(
            SvgImage::from_str("<svg width=\"1\""),
            Err(SvgError::Xml(_))
        ));
        assert!(matches!(
            SvgImage::from_data(&[0x3c, 0xff, 0xfe]),
            Err(SvgError::Utf8(_))
        ));
    }

    #[test]
    fn test_invalid_attributes() {
        let err = SvgImage::from_str(r#"<svg width="1" height="1"><circle r="big"/></svg>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SvgError::InvalidAttribute {
                element: "circle",
                attribute: "r",
                ..
            }
        ));

        let err = SvgImage::from_str(r#"<svg width="1" height="1"><path opacity="x"/></svg>"#)
            .unwrap_err();
        assert!(matches!(
            err,
            SvgError::InvalidAttribute {
                element: "path",
                attribute: "opacity",
                ..
            }
        ));
    }

    #[test]
    fn test_nested_elements_ignored() {
        let image = SvgImage::from_str(
            r#"<svg width="1" height="1"><g><path d="M0 0"/><circle r="1"/></g><circle/></svg>"#,
        )
        .unwrap();
        assert!(image.paths.is_empty());
        assert_eq!(image.circles, vec![Circle::default()]);
    }
}
