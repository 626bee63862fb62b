//! DOM lookups and measurement.
//!
//! The editor renders a handful of elements with fixed ids; layout math
//! in `memegen-core` needs their bounding boxes in viewport pixels.

use memegen_core::{ExportError, Rect};
use wasm_bindgen::{JsCast, JsValue};

/// Id of the composite region (image + both captions).
pub const COMPOSITE_ID: &str = "meme-composite";

/// Id of the template `<img>`.
pub const IMAGE_ID: &str = "meme-image";

/// Errors from DOM access.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// There is no `window` or `document` (not running in a browser).
    #[error("no browser document available")]
    NoDocument,

    /// No element has the requested id.
    #[error("element #{0} not found")]
    MissingElement(&'static str),

    /// The element exists but is not of the expected type.
    #[error("element #{0} has an unexpected type")]
    WrongType(&'static str),
}

impl From<DomError> for ExportError {
    fn from(err: DomError) -> Self {
        match err {
            DomError::MissingElement(id) => Self::MissingElement(id),
            other => Self::Browser(other.to_string()),
        }
    }
}

/// The global `document`.
///
/// # Errors
///
/// Returns [`DomError::NoDocument`] outside a browser.
pub fn document() -> Result<web_sys::Document, DomError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or(DomError::NoDocument)
}

/// Look up an element by id.
///
/// # Errors
///
/// Returns [`DomError::MissingElement`] if nothing has that id.
pub fn element(id: &'static str) -> Result<web_sys::Element, DomError> {
    document()?
        .get_element_by_id(id)
        .ok_or(DomError::MissingElement(id))
}

/// Viewport bounding box of the element with the given id.
///
/// # Errors
///
/// Returns [`DomError::MissingElement`] if nothing has that id.
pub fn bounding_rect(id: &'static str) -> Result<Rect, DomError> {
    let rect = element(id)?.get_bounding_client_rect();
    Ok(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
}

/// Whether the `<img>` with the given id has finished loading.
///
/// A missing element counts as not loaded; its load event will do the
/// anchoring once it appears.
#[must_use]
pub fn image_complete(id: &'static str) -> bool {
    element(id)
        .ok()
        .and_then(|el| el.dyn_into::<web_sys::HtmlImageElement>().ok())
        .is_some_and(|img| img.complete())
}

/// Best-effort human-readable message from a rejected JS value.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!(
            "{}: {}",
            String::from(err.name()),
            String::from(err.message())
        );
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
