//! Export: the flattened scene, failure classification, and PNG encoding.
//!
//! The browser crate measures the composite region, builds an
//! [`ExportScene`] from those measurements, draws it onto a canvas, and
//! hands the pixels back to [`encode_png`].

use image::ImageEncoder;

use crate::drag::CaptionTarget;
use crate::geometry::{Point, Rect};

/// Font family stack shared by the on-screen captions and the export.
pub const CAPTION_FONT_FAMILY: &str = "Impact, 'Anton', 'Arial Black', sans-serif";

/// Caption letter spacing, matching the on-screen stylesheet.
pub const CAPTION_LETTER_SPACING_PX: f64 = 1.0;

/// Browser error messages for a cross-origin read: an unreadable
/// stylesheet, a canvas tainted by foreign pixels, or Firefox's generic
/// `SecurityError` text for the same.
const CROSS_ORIGIN_MARKERS: &[&str] = &[
    "not allowed to access cross-origin stylesheet",
    "tainted by cross-origin data",
    "the operation is insecure",
];

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    PngEncode(#[from] image::ImageError),

    /// The pixel buffer does not match the stated dimensions.
    #[error("pixel buffer has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSize {
        /// Bytes received.
        actual: usize,
        /// Bytes required.
        expected: usize,
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },

    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    Browser(String),

    /// The template image could not be fetched or decoded.
    #[error("template {url} could not be loaded: {reason}")]
    TemplateLoad {
        /// Template URL.
        url: String,
        /// Browser-reported reason.
        reason: String,
    },

    /// A required DOM element was not found.
    #[error("element #{0} not found")]
    MissingElement(&'static str),

    /// The composite region has no area to draw.
    #[error("composite region is empty")]
    EmptyRegion,
}

/// How an export failure should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFailure {
    /// Cross-origin content could not be read. Logged as a warning.
    CrossOrigin,
    /// Anything else. Logged as an error.
    Other,
}

impl ExportFailure {
    /// Classify an export error.
    ///
    /// Only browser API errors can carry a recognized cross-origin
    /// message; every other variant is [`ExportFailure::Other`].
    #[must_use]
    pub fn of(error: &ExportError) -> Self {
        match error {
            ExportError::Browser(message) => Self::classify(message),
            _ => Self::Other,
        }
    }

    /// Classify a failure by its message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if CROSS_ORIGIN_MARKERS.iter().any(|m| lower.contains(m)) {
            Self::CrossOrigin
        } else {
            Self::Other
        }
    }

    /// Log `error` at the level its class calls for.
    pub fn report(error: &ExportError) {
        let message = error.to_string();
        match Self::of(error) {
            Self::CrossOrigin => log::warn!("ignoring cross-origin export error: {message}"),
            Self::Other => log::error!("error generating image: {message}"),
        }
    }
}

/// One caption as it should appear in the exported image.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCaption {
    /// Which caption this is.
    pub target: CaptionTarget,
    /// Text, drawn verbatim.
    pub text: String,
    /// Center of the rendered caption, relative to the scene origin.
    pub center: Point,
    /// Font size in CSS pixels.
    pub font_size_px: u32,
}

impl SceneCaption {
    /// Canvas `font` shorthand for this caption.
    #[must_use]
    pub fn canvas_font(&self) -> String {
        format!("bold {}px {CAPTION_FONT_FAMILY}", self.font_size_px)
    }

    /// Outline width for the text stroke, proportional to the font.
    #[must_use]
    pub fn outline_width(&self) -> f64 {
        (f64::from(self.font_size_px) / 15.0).max(1.0)
    }
}

/// Everything needed to redraw the composite region as a flat image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportScene {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Template image box, relative to the scene origin.
    pub image: Rect,
    /// Captions with visible text, top first.
    pub captions: Vec<SceneCaption>,
}

impl ExportScene {
    /// Build a scene from viewport measurements.
    ///
    /// `captions` pairs each caption's text with its rendered box.
    /// Blank captions are left out.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyRegion`] if `region` has no area.
    pub fn from_measurements(
        region: &Rect,
        image: &Rect,
        captions: &[(CaptionTarget, &str, Rect)],
        font_size_px: u32,
    ) -> Result<Self, ExportError> {
        if region.is_empty() {
            return Err(ExportError::EmptyRegion);
        }
        let captions = captions
            .iter()
            .filter(|(_, text, _)| !text.trim().is_empty())
            .map(|(target, text, rect)| SceneCaption {
                target: *target,
                text: (*text).to_owned(),
                center: rect.relative_to(region).center(),
                font_size_px,
            })
            .collect();

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (width, height) = (region.width.round() as u32, region.height.round() as u32);
        Ok(Self {
            width,
            height,
            image: image.relative_to(region),
            captions,
        })
    }

    /// Backing-store size for a canvas drawn at `scale` device pixels
    /// per CSS pixel. Non-finite or non-positive scales count as 1.
    #[must_use]
    pub fn pixel_size(&self, scale: f64) -> (u32, u32) {
        let scale = if scale.is_finite() && scale > 0.0 { scale } else { 1.0 };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = (
            (f64::from(self.width) * scale).round().max(1.0) as u32,
            (f64::from(self.height) * scale).round().max(1.0) as u32,
        );
        size
    }
}

/// Encode an RGBA pixel buffer as PNG.
///
/// # Errors
///
/// Returns [`ExportError::BufferSize`] if `rgba` is not exactly
/// `width * height * 4` bytes, or [`ExportError::PngEncode`] if the
/// encoder fails.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let expected = (width as usize) * (height as usize) * 4;
    if rgba.len() != expected {
        return Err(ExportError::BufferSize {
            actual: rgba.len(),
            expected,
            width,
            height,
        });
    }
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder.write_image(rgba, width, height, image::ExtendedColorType::Rgba8)?;
    Ok(png_bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_error_is_cross_origin() {
        let msg = "SecurityError: Not allowed to access cross-origin stylesheet";
        assert_eq!(ExportFailure::classify(msg), ExportFailure::CrossOrigin);
    }

    #[test]
    fn tainted_canvas_is_cross_origin() {
        let msg = "SecurityError: Failed to execute 'getImageData' on \
                   'CanvasRenderingContext2D': The canvas has been tainted by cross-origin data.";
        assert_eq!(ExportFailure::classify(msg), ExportFailure::CrossOrigin);
        assert_eq!(
            ExportFailure::classify("SecurityError: The operation is insecure."),
            ExportFailure::CrossOrigin
        );
    }

    #[test]
    fn failed_template_load_is_reported_as_error() {
        // A 404 or undecodable template is not a cross-origin failure.
        let err = ExportError::TemplateLoad {
            url: "https://i.imgflip.com/404.jpg".into(),
            reason: "EncodingError: The source image cannot be decoded.".into(),
        };
        let message = err.to_string();
        assert!(!message.to_ascii_lowercase().contains("cross-origin"));
        assert_eq!(ExportFailure::of(&err), ExportFailure::Other);
        assert_eq!(ExportFailure::classify(&message), ExportFailure::Other);
    }

    #[test]
    fn only_browser_errors_can_be_cross_origin() {
        let tainted = ExportError::Browser(
            "SecurityError: The canvas has been tainted by cross-origin data.".into(),
        );
        assert_eq!(ExportFailure::of(&tainted), ExportFailure::CrossOrigin);

        let network = ExportError::Browser("NetworkError: cross-origin request blocked".into());
        assert_eq!(ExportFailure::of(&network), ExportFailure::Other);
        assert_eq!(ExportFailure::of(&ExportError::EmptyRegion), ExportFailure::Other);
        assert_eq!(
            ExportFailure::of(&ExportError::MissingElement("meme-image")),
            ExportFailure::Other
        );
    }

    #[test]
    fn pixel_size_scales_with_device_ratio() {
        let region = Rect::new(0.0, 0.0, 300.0, 200.0);
        let scene = ExportScene::from_measurements(&region, &region, &[], 40).unwrap();
        assert_eq!(scene.pixel_size(1.0), (300, 200));
        assert_eq!(scene.pixel_size(2.0), (600, 400));
        assert_eq!(scene.pixel_size(1.5), (450, 300));
        assert_eq!(scene.pixel_size(0.0), (300, 200));
        assert_eq!(scene.pixel_size(f64::NAN), (300, 200));
    }

    #[test]
    fn other_errors_are_not_cross_origin() {
        assert_eq!(
            ExportFailure::classify("EncodingError: The source image cannot be decoded."),
            ExportFailure::Other
        );
        assert_eq!(
            ExportFailure::classify(&ExportError::EmptyRegion.to_string()),
            ExportFailure::Other
        );
    }

    #[test]
    fn scene_is_relative_to_region() {
        let region = Rect::new(100.0, 100.0, 400.0, 300.0);
        let image = Rect::new(110.0, 100.0, 380.0, 300.0);
        let top = Rect::new(200.0, 120.0, 200.0, 40.0);
        let scene = ExportScene::from_measurements(
            &region,
            &image,
            &[(CaptionTarget::Top, "TOP", top)],
            40,
        )
        .unwrap();

        assert_eq!((scene.width, scene.height), (400, 300));
        assert_eq!(scene.image, Rect::new(10.0, 0.0, 380.0, 300.0));
        assert_eq!(scene.captions.len(), 1);
        assert_eq!(scene.captions[0].center, Point::new(200.0, 40.0));
        assert_eq!(scene.captions[0].text, "TOP");
    }

    #[test]
    fn blank_captions_are_omitted() {
        let region = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scene = ExportScene::from_measurements(
            &region,
            &region,
            &[
                (CaptionTarget::Top, "", region),
                (CaptionTarget::Bottom, "   ", region),
            ],
            40,
        )
        .unwrap();
        assert!(scene.captions.is_empty());
    }

    #[test]
    fn empty_region_rejected() {
        let region = Rect::new(0.0, 0.0, 0.0, 0.0);
        let result = ExportScene::from_measurements(&region, &region, &[], 40);
        assert!(matches!(result, Err(ExportError::EmptyRegion)));
    }

    #[test]
    fn caption_text_is_not_interpreted() {
        let region = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scene = ExportScene::from_measurements(
            &region,
            &region,
            &[(CaptionTarget::Top, "<b>hi</b>", region)],
            40,
        )
        .unwrap();
        assert_eq!(scene.captions[0].text, "<b>hi</b>");
    }

    #[test]
    fn canvas_font_and_outline_follow_size() {
        let caption = SceneCaption {
            target: CaptionTarget::Bottom,
            text: "x".into(),
            center: Point::default(),
            font_size_px: 60,
        };
        assert!(caption.canvas_font().starts_with("bold 60px Impact"));
        assert!((caption.outline_width() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn encode_png_produces_decodable_image() {
        let (w, h) = (3, 2);
        let rgba: Vec<u8> = (0..w * h).flat_map(|_| [255, 0, 0, 255]).collect();
        let png = encode_png(&rgba, w, h).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn encode_png_rejects_short_buffer() {
        let result = encode_png(&[0; 10], 2, 2);
        assert!(matches!(
            result,
            Err(ExportError::BufferSize {
                actual: 10,
                expected: 16,
                ..
            })
        ));
    }
}
