//! memegen-core: Pure editor logic (sans-IO)
//!
//! Everything the meme editor decides without touching the browser:
//! editor state transitions, template catalog parsing and random
//! selection, caption anchoring and drop geometry, the drag session,
//! and the export scene plus PNG encoding.
//!
//! The browser crate measures the DOM, feeds the numbers in here, and
//! applies what comes back.

pub mod catalog;
pub mod config;
pub mod drag;
pub mod editor;
pub mod export;
pub mod geometry;
pub mod layout;

pub use catalog::{
    CatalogError, IndexSource, SystemRandom, Template, TemplateCatalog, parse_listing,
};
pub use config::{ConfigError, EditorConfig};
pub use drag::{CaptionTarget, DragSession, UnknownPayload};
pub use editor::{EditorAction, EditorState, FONT_SIZE_STEP_PX, MIN_FONT_SIZE_PX};
pub use export::{
    CAPTION_FONT_FAMILY, CAPTION_LETTER_SPACING_PX, ExportError, ExportFailure, ExportScene,
    SceneCaption, encode_png,
};
pub use geometry::{Point, Rect, Size};
pub use layout::{
    AnchorGate, AnchorTrigger, CaptionLayout, CaptionPlacement, anchor_captions, drop_placement,
};
