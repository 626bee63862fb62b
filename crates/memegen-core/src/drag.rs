//! Drag-and-drop protocol for repositioning captions.
//!
//! Drag-start records which caption is moving; drop reads it back. The
//! payload travels either as the `"top"` / `"bottom"` string (the form a
//! `DataTransfer` would carry) or through a [`DragSession`].

use std::fmt;
use std::str::FromStr;

/// Which caption a drag refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptionTarget {
    /// The caption anchored to the image's top edge.
    Top,
    /// The caption anchored to the image's bottom edge.
    Bottom,
}

impl CaptionTarget {
    /// Both captions, top first.
    pub const ALL: [Self; 2] = [Self::Top, Self::Bottom];

    /// Drag payload discriminator.
    #[must_use]
    pub const fn as_payload(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// DOM id of the rendered caption element.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Top => "meme-caption-top",
            Self::Bottom => "meme-caption-bottom",
        }
    }
}

impl fmt::Display for CaptionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_payload())
    }
}

/// A drag payload that is neither `"top"` nor `"bottom"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown caption drag payload: {0:?}")]
pub struct UnknownPayload(pub String);

impl FromStr for CaptionTarget {
    type Err = UnknownPayload;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            other => Err(UnknownPayload(other.to_owned())),
        }
    }
}

/// Carries one tagged payload from drag-start to drop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    active: Option<CaptionTarget>,
}

impl DragSession {
    /// A session with nothing being dragged.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Drag-start on a caption. Replaces any unfinished drag.
    pub const fn begin(&mut self, target: CaptionTarget) {
        self.active = Some(target);
    }

    /// Drop: consume the payload. `None` means nothing of ours was being
    /// dragged and the drop should be ignored.
    pub fn take(&mut self) -> Option<CaptionTarget> {
        self.active.take()
    }

    /// Drop with the event's `text/plain` data: consume the session and
    /// decide which caption, if any, the drop moves.
    ///
    /// A payload that does not name a caption (dropped text, a link) or
    /// names a different caption than the one in flight is a foreign
    /// drop and yields `None`. Without a payload the session decides.
    pub fn finish(&mut self, payload: Option<&str>) -> Option<CaptionTarget> {
        let active = self.take()?;
        match payload.filter(|p| !p.is_empty()) {
            None => Some(active),
            Some(p) => p.parse::<CaptionTarget>().ok().filter(|t| *t == active),
        }
    }

    /// Drag ended (dropped or cancelled). Any payload still held belongs
    /// to an abandoned drag.
    pub const fn clear(&mut self) {
        self.active = None;
    }

    /// The caption currently being dragged, if any.
    #[cfg(test)]
    const fn active(&self) -> Option<CaptionTarget> {
        self.active
    }
}
