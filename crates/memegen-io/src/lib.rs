//! memegen-io: Browser I/O and Dioxus component library.
//!
//! Fetches the template catalog, measures the rendered DOM, rasterizes
//! the composite region to PNG, triggers Blob downloads, routes `log`
//! records to the browser console, and provides the UI components of
//! the meme editor.

pub mod catalog;
pub mod components;
pub mod dom;
pub mod download;
pub mod logger;
pub mod raster;

pub use catalog::fetch_catalog;
pub use components::{CaptionDrop, CaptionForm, ExportButton, Header, MemeCanvas};
pub use raster::ExportRequest;
