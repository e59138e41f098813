//! Debounced persistence through the editor: collapsing, forced saves,
//! failures and undo/redo.

use pc_core::SceneDocument;
use pc_core::kurbo::Size;
use pc_editor::{Editor, EditorConfig, InitOptions, KeyEvent, ManualClock, MemoryStore, SaveStatus};
use pretty_assertions::assert_eq;
use std::rc::Rc;

struct Harness {
    editor: Editor,
    clock: Rc<ManualClock>,
    store: MemoryStore,
}

fn harness() -> Harness {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = Rc::new(ManualClock::new(0));
    let store = MemoryStore::new();
    let mut editor = Editor::with_clock(EditorConfig::default(), clock.clone())
        .with_autosave(store.clone(), "doc-1");
    editor.init(InitOptions {
        container: Size::new(1000.0, 800.0),
        ..InitOptions::default()
    });
    Harness {
        editor,
        clock,
        store,
    }
}

fn saved_objects(store: &MemoryStore) -> Vec<&'static str> {
    let doc = store.get("doc-1").unwrap();
    let scene = SceneDocument::from_json(&doc.json).unwrap();
    scene.objects.iter().map(|o| o.shape.type_name()).collect()
}

#[test]
fn init_does_not_save() {
    let mut h = harness();
    assert_eq!(h.editor.save_status(), SaveStatus::Idle);
    h.clock.advance(10_000);
    assert!(!h.editor.tick());
    assert_eq!(h.store.save_count(), 0);
}

#[test]
fn edits_within_the_window_collapse() {
    let mut h = harness();
    h.editor.add_circle();
    assert_eq!(h.editor.save_status(), SaveStatus::Saving);

    h.clock.advance(200);
    h.editor.add_triangle();
    h.clock.advance(400);
    assert!(!h.editor.tick(), "window restarted by the second edit");

    h.clock.advance(100);
    assert!(h.editor.tick());
    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.editor.save_status(), SaveStatus::Saved);
    assert_eq!(saved_objects(&h.store), vec!["rect", "circle", "triangle"]);

    let doc = h.store.get("doc-1").unwrap();
    assert_eq!((doc.width, doc.height), (900.0, 1200.0));
}

#[test]
fn ctrl_s_saves_immediately() {
    let mut h = harness();
    h.editor.add_circle();
    h.editor.handle_key(&KeyEvent::ctrl("s"));
    assert_eq!(h.store.save_count(), 1);
    assert_eq!(h.editor.save_status(), SaveStatus::Saved);

    h.clock.advance(1_000);
    assert!(!h.editor.tick(), "pending save was superseded");
    assert_eq!(h.store.save_count(), 1);
}

#[test]
fn failures_surface_as_status() {
    let mut h = harness();
    h.store.set_failure(Some("offline"));
    h.editor.add_circle();
    h.clock.advance(500);
    assert!(h.editor.tick());
    assert_eq!(h.editor.save_status(), SaveStatus::Error);
    assert_eq!(h.editor.scene().unwrap().len(), 2, "scene unchanged");

    h.store.set_failure(None);
    h.editor.add_rectangle();
    h.clock.advance(500);
    h.editor.tick();
    assert_eq!(h.editor.save_status(), SaveStatus::Saved);
    assert_eq!(saved_objects(&h.store), vec!["rect", "circle", "rect"]);
}

#[test]
fn undo_persists_restored_state() {
    let mut h = harness();
    h.editor.add_circle();
    h.clock.advance(500);
    h.editor.tick();
    assert_eq!(saved_objects(&h.store), vec!["rect", "circle"]);

    h.editor.on_undo();
    assert_eq!(h.editor.save_status(), SaveStatus::Saving);
    h.clock.advance(500);
    assert!(h.editor.tick());
    assert_eq!(saved_objects(&h.store), vec!["rect"]);
    assert_eq!(h.store.save_count(), 2);
}

#[test]
fn dispose_flushes_pending_save() {
    let mut h = harness();
    h.editor.add_circle();
    h.editor.dispose();
    assert_eq!(h.store.save_count(), 1);
    assert!(!h.editor.is_initialized());
}
