//! Dioxus UI components for the meme editor.
//!
//! Provides the branding header, caption and font controls, the
//! composite region with draggable captions, and the export button.

mod caption_form;
mod export;
mod header;
mod meme_canvas;

pub use caption_form::CaptionForm;
pub use export::ExportButton;
pub use header::Header;
pub use meme_canvas::{CaptionDrop, MemeCanvas};
