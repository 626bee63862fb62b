//! The composite region: template image plus two draggable captions.
//!
//! The region is both the drop target for caption drags and the source
//! of the exported image. Captions are positioned with inline styles
//! taken from a [`CaptionLayout`]; the parent owns that layout and
//! decides when anchoring or a drop changes it.
//!
//! A caption drag carries its [`CaptionTarget`] payload as `text/plain`
//! drag data, so the drop handler can tell a caption drop from text or
//! files dragged in from elsewhere.

use dioxus::html::point_interaction::InteractionLocation;
use dioxus::prelude::*;
use memegen_core::{CaptionLayout, CaptionTarget, Point};

use crate::dom::{COMPOSITE_ID, IMAGE_ID};

const PAYLOAD_FORMAT: &str = "text/plain";

/// Something dropped on the composite region.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionDrop {
    /// Drop position in viewport coordinates.
    pub point: Point,
    /// The drag's `text/plain` data, if the browser exposed any.
    pub payload: Option<String>,
}

/// Props for the [`MemeCanvas`] component.
#[derive(Props, Clone, PartialEq)]
pub struct MemeCanvasProps {
    /// Template image URL.
    image_url: String,
    /// Top caption text, rendered as plain text.
    top_text: String,
    /// Bottom caption text, rendered as plain text.
    bottom_text: String,
    /// Caption positions and font size.
    layout: CaptionLayout,
    /// The image finished loading its current source.
    on_image_load: EventHandler<()>,
    /// The image failed to load its current source.
    on_image_error: EventHandler<()>,
    /// A caption started being dragged.
    on_drag_start: EventHandler<CaptionTarget>,
    /// A caption drag ended, whether or not it was dropped.
    on_drag_end: EventHandler<()>,
    /// Something was dropped on the region.
    on_drop: EventHandler<CaptionDrop>,
}

/// Renders the template with its captions and handles caption drops.
///
/// Only the region suppresses the default drag-over behavior, so drops
/// anywhere else on the page do nothing.
#[component]
pub fn MemeCanvas(props: MemeCanvasProps) -> Element {
    let on_image_load = props.on_image_load;
    let on_image_error = props.on_image_error;
    let on_drag_start = props.on_drag_start;
    let on_drag_end = props.on_drag_end;
    let on_drop = props.on_drop;

    rsx! {
        div {
            id: COMPOSITE_ID,
            class: "meme",
            ondragover: move |evt: DragEvent| evt.prevent_default(),
            ondrop: move |evt: DragEvent| {
                evt.prevent_default();
                let p = evt.client_coordinates();
                on_drop.call(CaptionDrop {
                    point: Point::new(p.x, p.y),
                    payload: evt.data_transfer().get_data(PAYLOAD_FORMAT),
                });
            },

            img {
                id: IMAGE_ID,
                class: "meme--image",
                src: "{props.image_url}",
                alt: "Random Meme",
                onload: move |_| on_image_load.call(()),
                onerror: move |_| on_image_error.call(()),
            }

            for target in CaptionTarget::ALL {
                h2 {
                    key: "{target}",
                    id: target.element_id(),
                    class: "meme--text {target}",
                    draggable: "true",
                    style: props.layout.caption_css(target),
                    ondragstart: move |evt: DragEvent| {
                        // Firefox only starts a drag that carries data.
                        if let Err(e) = evt.data_transfer().set_data(PAYLOAD_FORMAT, target.as_payload()) {
                            log::debug!("drag data not set for {target} caption: {e}");
                        }
                        on_drag_start.call(target);
                    },
                    ondragend: move |_| on_drag_end.call(()),
                    {caption_text(&props, target)}
                }
            }
        }
    }
}

/// Text for one caption.
fn caption_text(props: &MemeCanvasProps, target: CaptionTarget) -> String {
    match target {
        CaptionTarget::Top => props.top_text.clone(),
        CaptionTarget::Bottom => props.bottom_text.clone(),
    }
}
