//! Integration test: one editing session from catalog response to PNG bytes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use memegen_core::{
    AnchorGate, AnchorTrigger, CaptionLayout, CaptionPlacement, CaptionTarget, DragSession,
    EditorAction, EditorConfig, EditorState, ExportScene, Point, Rect, Size, SystemRandom,
    anchor_captions, drop_placement, encode_png, parse_listing,
};

const LISTING: &str = r#"{
    "success": true,
    "data": {
        "memes": [
            {"id": "1", "name": "Only", "url": "a.jpg", "width": 600, "height": 400, "box_count": 2}
        ]
    }
}"#;

#[test]
fn caption_pick_anchor_drag_export() {
    let config = EditorConfig::default();
    config.validate().unwrap();

    // Mount: defaults, then the catalog arrives.
    let mut state = EditorState::new(&config);
    let mut layout = CaptionLayout::initial(state.font_size_px(), config.anchor_margin_px);
    let mut gate = AnchorGate::new();
    assert_eq!(layout.font_size_px, 40);
    let catalog = parse_listing(LISTING).unwrap();

    // Typing only touches the matching caption.
    state.apply(EditorAction::SetTopCaption("TOP".into()));
    state.apply(EditorAction::SetBottomCaption("BOTTOM".into()));
    state.apply(EditorAction::IncreaseFontSize);
    assert_eq!(state.font_size_px(), 50);

    // "Get a new image" with a single-entry catalog always lands on it.
    let url = state
        .pick_random_image(&catalog, &mut SystemRandom)
        .unwrap()
        .to_owned();
    assert_eq!(url, "a.jpg");

    // The new image is still loading, so anchoring waits for its load event.
    assert_eq!(gate.sync(false), AnchorTrigger::Deferred);
    let region = Rect::new(50.0, 100.0, 600.0, 440.0);
    let image = Rect::new(50.0, 110.0, 600.0, 400.0);
    assert!(gate.image_loaded());
    layout = anchor_captions(&image, &region, state.font_size_px(), config.anchor_margin_px);
    assert_eq!(layout.top, CaptionPlacement::AnchoredTop { offset: 30.0 });
    assert_eq!(layout.bottom, CaptionPlacement::AnchoredBottom { offset: 50.0 });
    assert_eq!(layout.font_size_px, 50);
    assert!(!gate.image_loaded(), "load event must anchor only once");

    // Drag the bottom caption to the middle of the region.
    let mut drag = DragSession::new();
    drag.begin(CaptionTarget::Bottom);
    let target = drag.take().unwrap();
    let caption_size = Size::new(180.0, 60.0);
    let drop = Point::new(350.0, 320.0);
    layout.set_placement(target, drop_placement(drop, &region, caption_size));
    let CaptionPlacement::Dropped { left, top } = layout.bottom else {
        unreachable!("bottom caption was dropped");
    };
    assert!((left - 210.0).abs() < 1e-9);
    assert!((top - 190.0).abs() < 1e-9);

    // Rendered boxes as the browser would report them after the drop.
    let top_box = Rect::new(260.0, 130.0, 180.0, 60.0);
    let bottom_box = Rect::new(region.left + left, region.top + top, 180.0, 60.0);
    assert_eq!(bottom_box.center(), drop);

    let scene = ExportScene::from_measurements(
        &region,
        &image,
        &[
            (CaptionTarget::Top, state.top_caption.as_str(), top_box),
            (CaptionTarget::Bottom, state.bottom_caption.as_str(), bottom_box),
        ],
        layout.font_size_px,
    )
    .unwrap();
    assert_eq!((scene.width, scene.height), (600, 440));
    assert_eq!(scene.captions.len(), 2);
    assert_eq!(scene.captions[1].text, "BOTTOM");
    assert_eq!(scene.captions[1].center, Point::new(300.0, 220.0));

    // The canvas hands back RGBA; encoding yields a PNG of the region size.
    let pixels = vec![0u8; (scene.width * scene.height * 4) as usize];
    let png = encode_png(&pixels, scene.width, scene.height).unwrap();
    let decoded = image::load_from_memory(&png).expect("exported PNG decodes");
    assert_eq!((decoded.width(), decoded.height()), (600, 440));
}

#[test]
fn font_change_on_loaded_image_reanchors_immediately() {
    let mut gate = AnchorGate::new();
    let mut state = EditorState::default();
    state.decrease_font_size();

    assert_eq!(gate.sync(true), AnchorTrigger::Now);
    let rect = Rect::new(0.0, 0.0, 300.0, 300.0);
    let layout = anchor_captions(&rect, &rect, state.font_size_px(), 20.0);
    assert_eq!(layout.font_size_px, 30);
    assert_eq!(layout.top, CaptionPlacement::AnchoredTop { offset: 20.0 });
}

#[test]
fn drop_after_abandoned_caption_drag_leaves_layout_alone() {
    let region = Rect::new(0.0, 0.0, 400.0, 300.0);
    let mut layout = anchor_captions(&region, &region, 40, 20.0);
    let before = layout;
    let mut drag = DragSession::new();

    // Top caption dragged and released outside the region: only dragend fires.
    drag.begin(CaptionTarget::Top);
    drag.clear();

    // Later, selected text is dropped on the region.
    for payload in [Some("hello"), None] {
        if let Some(target) = drag.finish(payload) {
            let placement = drop_placement(Point::new(200.0, 150.0), &region, Size::new(80.0, 40.0));
            layout.set_placement(target, placement);
        }
    }
    assert_eq!(layout, before);

    // A real caption drag still lands.
    drag.begin(CaptionTarget::Top);
    let target = drag.finish(Some(CaptionTarget::Top.as_payload())).unwrap();
    layout.set_placement(
        target,
        drop_placement(Point::new(200.0, 150.0), &region, Size::new(80.0, 40.0)),
    );
    assert_eq!(layout.top, CaptionPlacement::Dropped { left: 160.0, top: 130.0 });
    assert_eq!(layout.bottom, before.bottom);
}
