//! Integration tests: scene → JSON → scene round-trip.
//!
//! Loading a serialized scene and serializing it again must reproduce the same
//! document, even though every object receives a new runtime id.

use pc_core::kurbo::{Point, Size};
use pc_core::*;
use pretty_assertions::assert_eq;

// ─── Helpers ─────────────────────────────────────────────────────────────

fn sample_scene() -> Scene {
    let mut scene = Scene::new(Size::new(1000.0, 800.0));
    scene.add(SceneObject::workspace(900.0, 1200.0, "white"));

    let mut rect = SceneObject::new(Shape::Rect {
        width: 400.0,
        height: 400.0,
        rx: 50.0,
        ry: 50.0,
    });
    rect.fill = Some("rgba(0,0,0,1)".into());
    rect.stroke_dash_array = Some([5.0, 5.0].into_iter().collect());
    scene.add(rect);

    let mut diamond = SceneObject::new(Shape::Polygon {
        points: vec![
            Point::new(300.0, 0.0),
            Point::new(600.0, 200.0),
            Point::new(300.0, 400.0),
            Point::new(0.0, 200.0),
        ],
    });
    diamond.angle = 15.0;
    scene.add(diamond);

    let mut text = SceneObject::new(Shape::Textbox(TextProps {
        text: "Hello\nWorld".into(),
        width: 400.0,
        font_family: "Arial".into(),
        font_size: 32.0,
        font_weight: 700,
        font_style: FontStyle::Italic,
        underline: true,
        linethrough: false,
        text_align: TextAlign::Center,
    }));
    text.left = 12.5;
    scene.add(text);

    scene.add(SceneObject::new(Shape::Image {
        src: "https://example.com/cat.png".into(),
        width: 640.0,
        height: 480.0,
        filters: vec![ImageFilter::Sepia],
    }));

    scene.add(SceneObject::new(Shape::Path {
        path: vec![
            PathCmd::MoveTo(0.0, 0.0),
            PathCmd::QuadTo(5.0, 5.0, 10.0, 0.0),
            PathCmd::LineTo(20.0, 4.0),
        ],
        width: 20.0,
        height: 5.0,
    }));
    scene
}

// ─── Round-trip ──────────────────────────────────────────────────────────

#[test]
fn serialize_load_serialize_is_stable() {
    let scene = sample_scene();
    let first = scene.to_document().to_json().unwrap();

    let mut reloaded = Scene::new(Size::new(10.0, 10.0));
    reloaded.load_document(SceneDocument::from_json(&first).unwrap());
    let second = reloaded.to_document().to_json().unwrap();

    assert_eq!(first, second);
}

#[test]
fn reload_assigns_fresh_ids_in_same_order() {
    let scene = sample_scene();
    let json = scene.to_document().to_json().unwrap();

    let mut reloaded = Scene::new(Size::new(10.0, 10.0));
    reloaded.load_document(SceneDocument::from_json(&json).unwrap());

    let kinds = |s: &Scene| -> Vec<&'static str> {
        s.objects().iter().map(|o| o.shape.type_name()).collect()
    };
    assert_eq!(kinds(&scene), kinds(&reloaded));
    for (a, b) in scene.objects().iter().zip(reloaded.objects()) {
        assert_ne!(a.id, b.id);
    }
}

#[test]
fn workspace_survives_round_trip_locked() {
    let json = sample_scene().to_document().to_json().unwrap();
    let doc = SceneDocument::from_json(&json).unwrap();
    let ws = doc.workspace().unwrap();
    assert!(!ws.selectable);
    assert!(!ws.has_controls);
    assert_eq!(ws.fill.as_deref(), Some("white"));
    assert!(ws.shadow.is_some());
}

#[test]
fn stored_document_parses_scene() {
    let json = sample_scene().to_document().to_json().unwrap();
    let stored = Document {
        id: "doc_1".into(),
        name: "Untitled design".into(),
        json,
        width: 900.0,
        height: 1200.0,
        created_at: None,
        updated_at: None,
    };
    assert_eq!(stored.scene().unwrap().objects.len(), 6);
}
