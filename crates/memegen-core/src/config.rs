//! Compiled-in editor configuration.

use serde::{Deserialize, Serialize};

use crate::editor::MIN_FONT_SIZE_PX;

/// The imgflip "list memes" endpoint.
pub const DEFAULT_CATALOG_URL: &str = "https://api.imgflip.com/get_memes";

/// Template shown before the user asks for a new one.
pub const DEFAULT_PLACEHOLDER_IMAGE_URL: &str = "https://i.imgflip.com/39t1o.jpg";

/// Errors reported by [`EditorConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The starting font size is below [`MIN_FONT_SIZE_PX`].
    #[error("initial font size {0}px is below the {MIN_FONT_SIZE_PX}px minimum")]
    FontSizeTooSmall(u32),

    /// The anchoring margin is negative, NaN, or infinite.
    #[error("anchor margin must be a finite, non-negative number, got {0}")]
    InvalidAnchorMargin(f64),

    /// A required string field is empty.
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Settings for one editor session.
///
/// There are no config files or environment variables; the app uses
/// [`EditorConfig::default`] and validates it once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Endpoint returning the template listing.
    pub catalog_url: String,

    /// Image displayed at mount, before any random pick.
    pub placeholder_image_url: String,

    /// Caption font size at mount.
    pub initial_font_size_px: u32,

    /// Gap between an image edge and its anchored caption.
    pub anchor_margin_px: f64,

    /// Name given to the exported file.
    pub download_filename: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_owned(),
            placeholder_image_url: DEFAULT_PLACEHOLDER_IMAGE_URL.to_owned(),
            initial_font_size_px: 40,
            anchor_margin_px: 20.0,
            download_filename: "meme.png".to_owned(),
        }
    }
}

impl EditorConfig {
    /// Check the invariants the editor relies on.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_font_size_px < MIN_FONT_SIZE_PX {
            return Err(ConfigError::FontSizeTooSmall(self.initial_font_size_px));
        }
        if !self.anchor_margin_px.is_finite() || self.anchor_margin_px < 0.0 {
            return Err(ConfigError::InvalidAnchorMargin(self.anchor_margin_px));
        }
        if self.catalog_url.is_empty() {
            return Err(ConfigError::Empty("catalog_url"));
        }
        if self.placeholder_image_url.is_empty() {
            return Err(ConfigError::Empty("placeholder_image_url"));
        }
        if self.download_filename.is_empty() {
            return Err(ConfigError::Empty("download_filename"));
        }
        Ok(())
    }
}
