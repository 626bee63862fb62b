use dioxus::prelude::*;
use memegen_core::{
    AnchorGate, AnchorTrigger, CaptionLayout, CaptionTarget, DragSession, EditorAction, EditorConfig,
    EditorState, SystemRandom, TemplateCatalog, anchor_captions, drop_placement,
};
use memegen_io::{CaptionDrop, CaptionForm, ExportButton, ExportRequest, Header, MemeCanvas, dom};

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = memegen_io::logger::init(log::LevelFilter::Info) {
        web_sys::console::warn_1(&format!("console logger not installed: {e}").into());
    }
    dioxus::launch(app);
}

/// Root application component: the header above the meme editor.
fn app() -> Element {
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        Header {}
        MemeEditor {}
    }
}

/// The meme editor view.
///
/// Owns the [`EditorState`], the fetched template catalog, and the
/// caption layout, and wires the form, composite region, and export
/// button to them.
#[component]
#[allow(clippy::too_many_lines)]
fn MemeEditor() -> Element {
    let config = use_hook(|| {
        let config = EditorConfig::default();
        if let Err(e) = config.validate() {
            log::error!("invalid editor configuration: {e}");
        }
        config
    });
    let margin = config.anchor_margin_px;

    // --- Editor state ---
    let mut state = use_signal(|| EditorState::new(&config));
    let mut catalog = use_signal(TemplateCatalog::default);
    let mut layout =
        use_signal(|| CaptionLayout::initial(config.initial_font_size_px, margin));
    let mut gate = use_signal(AnchorGate::new);
    let mut drag = use_signal(DragSession::new);

    // --- Catalog fetch ---
    // Runs once: the effect reads no signals. The task dies with the
    // component, so an unmount mid-flight discards the result.
    let catalog_url = config.catalog_url.clone();
    use_effect(move || {
        let url = catalog_url.clone();
        spawn(async move {
            match memegen_io::fetch_catalog(&url).await {
                Ok(fetched) => catalog.set(fetched),
                Err(e) => log::error!("failed to load meme templates: {e}"),
            }
        });
    });

    // --- Anchoring ---
    // Measure the rendered image and pin the captions to its edges.
    let mut apply_anchoring = move || {
        let font_size = state.peek().font_size_px();
        match (
            dom::bounding_rect(dom::IMAGE_ID),
            dom::bounding_rect(dom::COMPOSITE_ID),
        ) {
            (Ok(image), Ok(region)) => {
                layout.set(anchor_captions(&image, &region, font_size, margin));
            }
            (Err(e), _) | (_, Err(e)) => log::warn!("cannot anchor captions: {e}"),
        }
    };

    // Only image identity and font size re-trigger anchoring; caption
    // text edits leave dragged captions where they are.
    let anchor_key = use_memo(move || {
        let s = state.read();
        (s.active_image_url.clone(), s.font_size_px())
    });

    use_effect(move || {
        let _ = anchor_key();
        let complete = dom::image_complete(dom::IMAGE_ID);
        if gate.write().sync(complete) == AnchorTrigger::Now {
            apply_anchoring();
        }
    });

    let on_image_load = move |()| {
        if gate.write().image_loaded() {
            apply_anchoring();
        }
    };

    let on_image_error = move |()| {
        gate.write().cancel();
        log::warn!("meme image failed to load: {}", state.peek().active_image_url);
    };

    // --- Form handlers ---
    let on_top_input = move |text: String| state.write().apply(EditorAction::SetTopCaption(text));
    let on_bottom_input =
        move |text: String| state.write().apply(EditorAction::SetBottomCaption(text));
    let on_increase_font = move |()| state.write().apply(EditorAction::IncreaseFontSize);
    let on_decrease_font = move |()| state.write().apply(EditorAction::DecreaseFontSize);

    let on_new_image = move |()| {
        let catalog = catalog.read();
        let mut state = state.write();
        match state.pick_random_image(&catalog, &mut SystemRandom) {
            Ok(url) => log::debug!("switched template to {url}"),
            Err(e) => log::warn!("cannot pick a new image: {e}"),
        }
    };

    // --- Drag and drop ---
    let on_drag_start = move |target: CaptionTarget| drag.write().begin(target);

    // Fires after `on_drop` too; clearing an already-finished session is a no-op.
    let on_drag_end = move |()| drag.write().clear();

    let on_drop = move |CaptionDrop { point, payload }: CaptionDrop| {
        let Some(target) = drag.write().finish(payload.as_deref()) else {
            log::debug!("ignoring drop that is not a caption drag");
            return;
        };
        match (
            dom::bounding_rect(dom::COMPOSITE_ID),
            dom::bounding_rect(target.element_id()),
        ) {
            (Ok(region), Ok(caption)) => {
                let placement = drop_placement(point, &region, caption.size());
                layout.write().set_placement(target, placement);
            }
            (Err(e), _) | (_, Err(e)) => log::warn!("cannot place {target} caption: {e}"),
        }
    };

    // --- Layout ---
    let current = state();
    let current_layout = layout();
    let export_request = ExportRequest {
        image_url: current.active_image_url.clone(),
        top_text: current.top_caption.clone(),
        bottom_text: current.bottom_caption.clone(),
        font_size_px: current_layout.font_size_px,
        filename: config.download_filename.clone(),
    };

    rsx! {
        main {
            CaptionForm {
                top_text: current.top_caption.clone(),
                bottom_text: current.bottom_caption.clone(),
                font_size_px: current.font_size_px(),
                on_top_input,
                on_bottom_input,
                on_new_image,
                on_increase_font,
                on_decrease_font,
            }
            div { class: "meme-wrapper",
                div { class: "meme-container",
                    MemeCanvas {
                        image_url: current.active_image_url.clone(),
                        top_text: current.top_caption.clone(),
                        bottom_text: current.bottom_caption.clone(),
                        layout: current_layout,
                        on_image_load,
                        on_image_error,
                        on_drag_start,
                        on_drag_end,
                        on_drop,
                    }
                    ExportButton { request: export_request }
                }
            }
        }
    }
}
