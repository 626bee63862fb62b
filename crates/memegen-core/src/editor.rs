//! Editor state and its transitions.
//!
//! [`EditorState`] is the single mutable record behind the editor view.
//! Every user interaction maps to one reducer-style method here, so the
//! view layer only forwards events and re-renders.

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, IndexSource, TemplateCatalog};
use crate::config::EditorConfig;

/// Amount each font-size button press adds or removes.
pub const FONT_SIZE_STEP_PX: u32 = 10;

/// Caption font size never drops below this.
pub const MIN_FONT_SIZE_PX: u32 = 10;

/// User-editable state of one editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorState {
    /// Text drawn near the top edge of the image.
    pub top_caption: String,
    /// Text drawn near the bottom edge of the image.
    pub bottom_caption: String,
    /// URL of the template currently shown.
    pub active_image_url: String,
    /// Caption font size in CSS pixels. Always at least [`MIN_FONT_SIZE_PX`].
    font_size_px: u32,
}

/// A single user interaction, for dispatch through [`EditorState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Replace the top caption.
    SetTopCaption(String),
    /// Replace the bottom caption.
    SetBottomCaption(String),
    /// Grow the caption font by one step.
    IncreaseFontSize,
    /// Shrink the caption font by one step, down to the floor.
    DecreaseFontSize,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl EditorState {
    /// Fresh state at mount: empty captions, the placeholder image, and
    /// the configured starting font size.
    #[must_use]
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            top_caption: String::new(),
            bottom_caption: String::new(),
            active_image_url: config.placeholder_image_url.clone(),
            font_size_px: config.initial_font_size_px.max(MIN_FONT_SIZE_PX),
        }
    }

    /// Current caption font size.
    #[must_use]
    pub const fn font_size_px(&self) -> u32 {
        self.font_size_px
    }

    /// Replace the top caption verbatim.
    pub fn set_top_caption(&mut self, text: impl Into<String>) {
        self.top_caption = text.into();
    }

    /// Replace the bottom caption verbatim.
    pub fn set_bottom_caption(&mut self, text: impl Into<String>) {
        self.bottom_caption = text.into();
    }

    /// Add one step to the font size. There is no upper bound.
    pub const fn increase_font_size(&mut self) {
        self.font_size_px = self.font_size_px.saturating_add(FONT_SIZE_STEP_PX);
    }

    /// Remove one step from the font size, stopping at [`MIN_FONT_SIZE_PX`].
    pub fn decrease_font_size(&mut self) {
        self.font_size_px = self
            .font_size_px
            .saturating_sub(FONT_SIZE_STEP_PX)
            .max(MIN_FONT_SIZE_PX);
    }

    /// Switch to a uniformly random template from `catalog`.
    ///
    /// Returns the newly active URL. On error the state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] if the catalog has not loaded
    /// (or loaded empty), and propagates random-source failures.
    pub fn pick_random_image(
        &mut self,
        catalog: &TemplateCatalog,
        rng: &mut impl IndexSource,
    ) -> Result<&str, CatalogError> {
        let template = catalog.pick(rng)?;
        self.active_image_url.clone_from(&template.url);
        Ok(&self.active_image_url)
    }

    /// Apply one [`EditorAction`].
    pub fn apply(&mut self, action: EditorAction) {
        match action {
            EditorAction::SetTopCaption(text) => self.set_top_caption(text),
            EditorAction::SetBottomCaption(text) => self.set_bottom_caption(text),
            EditorAction::IncreaseFontSize => self.increase_font_size(),
            EditorAction::DecreaseFontSize => self.decrease_font_size(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{SystemRandom, Template};

    #[test]
    fn defaults_at_mount() {
        let state = EditorState::default();
        assert_eq!(state.top_caption, "");
        assert_eq!(state.bottom_caption, "");
        assert_eq!(state.active_image_url, "https://i.imgflip.com/39t1o.jpg");
        assert_eq!(state.font_size_px(), 40);
    }

    #[test]
    fn font_size_steps() {
        let mut state = EditorState::default();
        state.increase_font_size();
        assert_eq!(state.font_size_px(), 50);
        state.decrease_font_size();
        state.decrease_font_size();
        assert_eq!(state.font_size_px(), 30);
    }

    #[test]
    fn font_size_never_below_floor() {
        let mut state = EditorState::default();
        for _ in 0..10 {
            state.decrease_font_size();
            assert!(state.font_size_px() >= MIN_FONT_SIZE_PX);
        }
        assert_eq!(state.font_size_px(), MIN_FONT_SIZE_PX);
        state.increase_font_size();
        assert_eq!(state.font_size_px(), 20);
    }

    #[test]
    fn font_size_floor_holds_for_mixed_sequences() {
        // Walk a fixed pseudo-random pattern of presses.
        let mut state = EditorState::default();
        let mut seed = 0x2545_f491_u32;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                state.apply(EditorAction::IncreaseFontSize);
            } else {
                state.apply(EditorAction::DecreaseFontSize);
            }
            assert!(state.font_size_px() >= MIN_FONT_SIZE_PX);
        }
    }

    #[test]
    fn low_configured_font_is_clamped() {
        let config = EditorConfig {
            initial_font_size_px: 3,
            ..EditorConfig::default()
        };
        assert_eq!(EditorState::new(&config).font_size_px(), MIN_FONT_SIZE_PX);
    }

    #[test]
    fn captions_update_independently_and_verbatim() {
        let mut state = EditorState::default();
        state.apply(EditorAction::SetTopCaption("<b>hi</b>".into()));
        assert_eq!(state.top_caption, "<b>hi</b>");
        assert_eq!(state.bottom_caption, "");

        state.set_bottom_caption("  spaced  ");
        assert_eq!(state.bottom_caption, "  spaced  ");
        assert_eq!(state.top_caption, "<b>hi</b>");
    }

    #[test]
    fn pick_random_image_sets_catalog_url() {
        let catalog = TemplateCatalog::new(vec![Template::from_url("a.jpg")]);
        let mut state = EditorState::default();
        let url = state.pick_random_image(&catalog, &mut SystemRandom).unwrap();
        assert_eq!(url, "a.jpg");
        assert_eq!(state.active_image_url, "a.jpg");
    }

    #[test]
    fn pick_random_image_result_is_in_catalog() {
        let catalog = TemplateCatalog::new(
            ["a.jpg", "b.jpg", "c.jpg"]
                .into_iter()
                .map(Template::from_url)
                .collect(),
        );
        let mut state = EditorState::default();
        for _ in 0..30 {
            state.pick_random_image(&catalog, &mut SystemRandom).unwrap();
            assert!(catalog.contains_url(&state.active_image_url));
        }
    }

    #[test]
    fn pick_from_empty_catalog_leaves_state() {
        let mut state = EditorState::default();
        let before = state.clone();
        let result = state.pick_random_image(&TemplateCatalog::default(), &mut SystemRandom);
        assert!(matches!(result, Err(CatalogError::Empty)));
        assert_eq!(state, before);
    }
}
