//! Caption placement inside the composite region.
//!
//! Two things move captions around:
//!
//! - **Anchoring** pins the top caption just below the image's top edge
//!   and the bottom caption just above its bottom edge. It runs once the
//!   image has loaded, and again whenever the image or font size changes.
//! - **Dropping** lets the user override a caption's position by
//!   dragging it. The override lasts until the next anchoring run.
//!
//! Placements are visual state only; they never enter
//! [`EditorState`](crate::EditorState).

use std::fmt::Write;

use crate::drag::CaptionTarget;
use crate::geometry::{Point, Rect, Size};

/// Where one caption sits, relative to the composite region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptionPlacement {
    /// Horizontally centered, `offset` pixels below the region's top edge.
    AnchoredTop {
        /// Distance from the region's top edge.
        offset: f64,
    },
    /// Horizontally centered, `offset` pixels above the region's bottom edge.
    AnchoredBottom {
        /// Distance from the region's bottom edge.
        offset: f64,
    },
    /// Placed by a drop: top-left corner at (`left`, `top`).
    Dropped {
        /// Distance from the region's left edge.
        left: f64,
        /// Distance from the region's top edge.
        top: f64,
    },
}

impl CaptionPlacement {
    /// Inline CSS positioning for an absolutely positioned caption.
    ///
    /// Anchored captions are centered with a translate; dropped captions
    /// are placed by their corner, so no transform is applied.
    #[must_use]
    pub fn to_css(&self) -> String {
        let mut css = String::from("position: absolute; ");
        match *self {
            Self::AnchoredTop { offset } => {
                let _ = write!(
                    css,
                    "left: 50%; transform: translateX(-50%); top: {offset}px;"
                );
            }
            Self::AnchoredBottom { offset } => {
                let _ = write!(
                    css,
                    "left: 50%; transform: translateX(-50%); bottom: {offset}px;"
                );
            }
            Self::Dropped { left, top } => {
                let _ = write!(css, "left: {left}px; top: {top}px;");
            }
        }
        css
    }
}

/// Placement and font size of both captions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionLayout {
    /// Top caption placement.
    pub top: CaptionPlacement,
    /// Bottom caption placement.
    pub bottom: CaptionPlacement,
    /// Font size last applied by anchoring.
    pub font_size_px: u32,
}

impl CaptionLayout {
    /// Layout before any measurement: captions `margin` pixels from the
    /// region edges.
    #[must_use]
    pub const fn initial(font_size_px: u32, margin: f64) -> Self {
        Self {
            top: CaptionPlacement::AnchoredTop { offset: margin },
            bottom: CaptionPlacement::AnchoredBottom { offset: margin },
            font_size_px,
        }
    }

    /// Placement of one caption.
    #[must_use]
    pub const fn placement(&self, target: CaptionTarget) -> CaptionPlacement {
        match target {
            CaptionTarget::Top => self.top,
            CaptionTarget::Bottom => self.bottom,
        }
    }

    /// Replace the placement of one caption.
    pub const fn set_placement(&mut self, target: CaptionTarget, placement: CaptionPlacement) {
        match target {
            CaptionTarget::Top => self.top = placement,
            CaptionTarget::Bottom => self.bottom = placement,
        }
    }

    /// Full inline CSS for one caption, including its font size.
    #[must_use]
    pub fn caption_css(&self, target: CaptionTarget) -> String {
        format!(
            "{} font-size: {}px;",
            self.placement(target).to_css(),
            self.font_size_px
        )
    }
}

/// Compute anchored placements from the rendered image box and its
/// containing composite region.
///
/// Top offset is `(image.top - container.top) + margin` from the
/// region's top; bottom offset is `(container.bottom - image.bottom) +
/// margin` from the region's bottom. Any earlier drop is discarded.
#[must_use]
pub fn anchor_captions(
    image: &Rect,
    container: &Rect,
    font_size_px: u32,
    margin: f64,
) -> CaptionLayout {
    let top = image.top - container.top;
    let bottom = container.bottom() - image.bottom();
    CaptionLayout {
        top: CaptionPlacement::AnchoredTop {
            offset: top + margin,
        },
        bottom: CaptionPlacement::AnchoredBottom {
            offset: bottom + margin,
        },
        font_size_px,
    }
}

/// Placement that centers a caption of `caption` size on `drop`.
///
/// `drop` is in viewport coordinates; the result is relative to
/// `region`'s top-left corner.
#[must_use]
pub fn drop_placement(drop: Point, region: &Rect, caption: Size) -> CaptionPlacement {
    let local = region.to_local(drop);
    CaptionPlacement::Dropped {
        left: local.x - caption.width / 2.0,
        top: local.y - caption.height / 2.0,
    }
}

/// What to do after the image or font size changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTrigger {
    /// The image is already loaded: anchor now.
    Now,
    /// Wait for the image's load event.
    Deferred,
}

/// One-shot subscription to "image finished loading".
///
/// Each [`sync`](Self::sync) tears down any pending subscription before
/// deciding whether to anchor immediately or arm a new one, and
/// [`image_loaded`](Self::image_loaded) consumes the subscription. The
/// result is at most one anchoring run per load completion, however
/// many times the image or font size changed while loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorGate {
    armed: bool,
}

impl AnchorGate {
    /// Create a gate with no pending subscription.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: false }
    }

    /// The image or font size changed. `image_complete` is whether the
    /// image element has already finished loading its current source.
    pub const fn sync(&mut self, image_complete: bool) -> AnchorTrigger {
        if image_complete {
            self.armed = false;
            AnchorTrigger::Now
        } else {
            self.armed = true;
            AnchorTrigger::Deferred
        }
    }

    /// The image fired its load event. Returns `true` if anchoring
    /// should run, which happens only once per armed subscription.
    pub const fn image_loaded(&mut self) -> bool {
        let fire = self.armed;
        self.armed = false;
        fire
    }

    /// Drop any pending subscription (effect cleanup).
    pub const fn cancel(&mut self) {
        self.armed = false;
    }

    /// Whether a load-completion subscription is pending.
    #[cfg(test)]
    const fn is_armed(&self) -> bool {
        self.armed
    }
}
