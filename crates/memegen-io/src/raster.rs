//! Rasterize the composite region to PNG and download it.
//!
//! The on-screen composite is an `<img>` with two absolutely positioned
//! captions. Export measures those elements, redraws the same scene on
//! an offscreen canvas, reads the pixels back, and encodes them with the
//! `image` crate.
//!
//! The template is re-fetched with `crossOrigin="anonymous"` so the
//! canvas stays readable when the image host sends CORS headers. A
//! template that cannot be fetched at all is an
//! [`ExportError::TemplateLoad`]; a canvas the browser refuses to read
//! back is a cross-origin failure, which
//! [`ExportFailure`](memegen_core::ExportFailure) reports as a warning.
//!
//! The canvas is sized in device pixels so the PNG is as sharp as the
//! on-screen composite.

use memegen_core::{
    CAPTION_LETTER_SPACING_PX, CaptionTarget, ExportError, ExportScene, SceneCaption, encode_png,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::{dom, download};

/// Snapshot of what to export, taken when the button is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Template currently displayed.
    pub image_url: String,
    /// Top caption text.
    pub top_text: String,
    /// Bottom caption text.
    pub bottom_text: String,
    /// Font size currently applied to the captions.
    pub font_size_px: u32,
    /// Name of the downloaded file.
    pub filename: String,
}

fn browser_error(value: &JsValue) -> ExportError {
    ExportError::Browser(dom::js_error_message(value))
}

/// Measure the composite region, rasterize it, and download the PNG.
///
/// # Errors
///
/// Returns [`ExportError`] if measurement, image loading, drawing,
/// encoding, or the download fails. Nothing is retried.
#[allow(clippy::future_not_send)] // WASM is single-threaded; DOM handles are !Send
pub async fn export_composite(request: &ExportRequest) -> Result<(), ExportError> {
    let scene = measure_scene(request)?;
    let template = load_template(&request.image_url).await?;
    let device_ratio = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
    let (width, height) = scene.pixel_size(device_ratio);
    let rgba = render_scene(&scene, &template, width, height)?;
    let png = encode_png(&rgba, width, height)?;
    download::trigger_download(&png, &request.filename, "image/png")?;
    log::info!(
        "exported {width}x{height} meme as {} ({} bytes)",
        request.filename,
        png.len()
    );
    Ok(())
}

/// Build an [`ExportScene`] from the live DOM.
fn measure_scene(request: &ExportRequest) -> Result<ExportScene, ExportError> {
    let region = dom::bounding_rect(dom::COMPOSITE_ID)?;
    let image = dom::bounding_rect(dom::IMAGE_ID)?;
    let top = dom::bounding_rect(CaptionTarget::Top.element_id())?;
    let bottom = dom::bounding_rect(CaptionTarget::Bottom.element_id())?;
    ExportScene::from_measurements(
        &region,
        &image,
        &[
            (CaptionTarget::Top, request.top_text.as_str(), top),
            (CaptionTarget::Bottom, request.bottom_text.as_str(), bottom),
        ],
        request.font_size_px,
    )
}

/// Load the template into a detached, CORS-enabled image element.
#[allow(clippy::future_not_send)]
async fn load_template(url: &str) -> Result<HtmlImageElement, ExportError> {
    let img = HtmlImageElement::new().map_err(|e| browser_error(&e))?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(url);
    JsFuture::from(img.decode())
        .await
        .map_err(|e| ExportError::TemplateLoad {
            url: url.to_owned(),
            reason: dom::js_error_message(&e),
        })?;
    Ok(img)
}

/// Draw the scene on a `width` x `height` offscreen canvas and return
/// its RGBA pixels. The scene is drawn in CSS pixels and scaled up.
fn render_scene(
    scene: &ExportScene,
    template: &HtmlImageElement,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ExportError> {
    let canvas: HtmlCanvasElement = dom::document()?
        .create_element("canvas")
        .map_err(|e| browser_error(&e))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("failed to cast canvas element".into()))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| browser_error(&e))?
        .ok_or_else(|| ExportError::Browser("2d canvas context unavailable".into()))?
        .dyn_into()
        .map_err(|_| ExportError::Browser("failed to cast 2d context".into()))?;
    ctx.scale(
        f64::from(width) / f64::from(scene.width),
        f64::from(height) / f64::from(scene.height),
    )
    .map_err(|e| browser_error(&e))?;

    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        template,
        scene.image.left,
        scene.image.top,
        scene.image.width,
        scene.image.height,
    )
    .map_err(|e| browser_error(&e))?;

    for caption in &scene.captions {
        draw_caption(&ctx, caption)?;
    }

    let data = ctx
        .get_image_data(0.0, 0.0, f64::from(width), f64::from(height))
        .map_err(|e| browser_error(&e))?;
    Ok(data.data().0)
}

/// White text with a black outline, centered on the caption's box.
fn draw_caption(ctx: &CanvasRenderingContext2d, caption: &SceneCaption) -> Result<(), ExportError> {
    ctx.set_font(&caption.canvas_font());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_line_join("round");
    ctx.set_line_width(caption.outline_width());
    ctx.set_stroke_style_str("black");
    ctx.set_fill_style_str("white");
    set_letter_spacing(ctx, CAPTION_LETTER_SPACING_PX);
    let (x, y) = (caption.center.x, caption.center.y);
    ctx.stroke_text(&caption.text, x, y)
        .map_err(|e| browser_error(&e))?;
    ctx.fill_text(&caption.text, x, y)
        .map_err(|e| browser_error(&e))?;
    Ok(())
}

/// Match the stylesheet's caption `letter-spacing`. Older engines lack
/// the property; there the text is drawn without extra spacing.
fn set_letter_spacing(ctx: &CanvasRenderingContext2d, px: f64) {
    let applied = js_sys::Reflect::set(
        ctx,
        &JsValue::from_str("letterSpacing"),
        &JsValue::from_str(&format!("{px}px")),
    );
    if let Err(e) = applied {
        log::debug!("canvas letter spacing unavailable: {}", dom::js_error_message(&e));
    }
}
