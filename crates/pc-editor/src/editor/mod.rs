//! The editor command façade.
//!
//! `Editor` owns one scene and everything that hangs off it: history,
//! clipboard, style defaults, the selection snapshot, and the auto-saver.
//! Every public command ends with `sync()`, which drains the scene's event
//! queue, refreshes the selection snapshot, and records one history snapshot
//! per batch of mutations.
//!
//! Before `init` (and after `dispose`) every command is a no-op.

mod commands;
mod export;
mod host;

pub use commands::{Alignment, TextOptions};
pub use export::ExportFile;

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::events::{SceneListener, dispatch};
use crate::history::{History, Snapshot};
use crate::persist::{AutoSaver, Clock, DocumentStore, MonotonicClock, SavePayload, SaveStatus};
use crate::style::{ActiveStyle, Selection, StyleDefaults};
use crate::tools::{PenTool, SelectTool};
use crate::viewport;
use pc_core::kurbo::Size;
use pc_core::{Brush, DocumentError, ObjectId, Scene, SceneDocument, SceneEvent, SceneObject};
use std::rc::Rc;

/// How to build the scene in [`Editor::init`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Size of the host element the surface fills.
    pub container: Size,
    /// Serialized document to start from. A new blank page is created when
    /// absent or invalid.
    pub document: Option<String>,
    /// Page size for a new blank page (config default when absent).
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Per-initialization state.
struct Session {
    scene: Scene,
    container: Size,
    history: History,
    clipboard: Clipboard,
    select_tool: SelectTool,
    pen_tool: PenTool,
}

pub struct Editor {
    config: EditorConfig,
    defaults: StyleDefaults,
    selection: Selection,
    session: Option<Session>,
    autosave: Option<AutoSaver<Box<dyn DocumentStore>>>,
    clock: Rc<dyn Clock>,
    on_selection_cleared: Option<Box<dyn FnMut()>>,
}

/// What one drained batch of events amounted to.
#[derive(Debug, Default)]
struct BatchOutcome {
    mutated: bool,
    selection_changed: bool,
    cleared: usize,
}

impl SceneListener for BatchOutcome {
    fn on_selection_changed(&mut self, _selected: &[ObjectId]) {
        self.selection_changed = true;
    }

    fn on_selection_cleared(&mut self) {
        self.selection_changed = true;
        self.cleared += 1;
    }

    fn on_object_mutated(&mut self, _event: &SceneEvent) {
        self.mutated = true;
    }
}

impl Editor {
    /// An uninitialized editor using wall-clock time for auto-save.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_clock(config, Rc::new(MonotonicClock::default()))
    }

    /// An uninitialized editor reading time from `clock`.
    pub fn with_clock(config: EditorConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            config,
            defaults: StyleDefaults::default(),
            selection: Selection::default(),
            session: None,
            autosave: None,
            clock,
            on_selection_cleared: None,
        }
    }

    /// Persist every recorded snapshot to `store` under `document_id`.
    pub fn with_autosave(mut self, store: impl DocumentStore + 'static, document_id: &str) -> Self {
        let store: Box<dyn DocumentStore> = Box::new(store);
        self.autosave = Some(AutoSaver::new(
            store,
            document_id,
            self.config.autosave_debounce_ms,
            self.clock.clone(),
        ));
        self
    }

    /// Called whenever the selection is cleared.
    pub fn on_selection_cleared(&mut self, callback: impl FnMut() + 'static) {
        self.on_selection_cleared = Some(Box::new(callback));
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Build the scene: load `document` or create a centered blank page,
    /// fit it into the container, and take the initial snapshot.
    pub fn init(&mut self, opts: InitOptions) {
        let mut scene = Scene::new(opts.container);
        let loaded = opts.document.as_deref().and_then(|json| {
            SceneDocument::from_json(json)
                .inspect_err(|err| log::warn!("initial document rejected, starting blank: {err}"))
                .ok()
        });
        match loaded {
            Some(doc) => scene.load_document(doc),
            None => {
                let valid = |v: &f64| v.is_finite() && *v > 0.0;
                let width = opts.width.filter(valid).unwrap_or(self.config.workspace_width);
                let height = opts.height.filter(valid).unwrap_or(self.config.workspace_height);
                let mut workspace =
                    SceneObject::workspace(width, height, &self.config.workspace_fill);
                workspace.set_center(scene.center_point());
                scene.add(workspace);
            }
        }
        viewport::auto_zoom(&mut scene, opts.container, self.config.fit_margin);
        scene.drain_events();

        let mut history = History::new(self.config.history_depth);
        match snapshot_of(&scene) {
            Ok(snapshot) => history.reset(snapshot),
            Err(err) => log::warn!("initial snapshot failed: {err}"),
        }

        self.defaults = StyleDefaults::default();
        self.selection = Selection::default();
        let brush = Brush {
            color: self.defaults.brush_color.clone(),
            width: self.defaults.brush_width,
        };
        scene.brush = brush.clone();
        log::debug!("editor initialized with {} objects", scene.len());
        self.session = Some(Session {
            scene,
            container: opts.container,
            history,
            clipboard: Clipboard::new(self.config.paste_offset),
            select_tool: SelectTool::new(),
            pen_tool: PenTool::new(brush),
        });
    }

    /// Drop the scene, writing any pending save first.
    pub fn dispose(&mut self) {
        if let Some(saver) = self.autosave.as_mut() {
            saver.flush();
        }
        self.session = None;
        self.selection = Selection::default();
    }

    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The live scene, for rendering.
    pub fn scene(&self) -> Option<&Scene> {
        self.session.as_ref().map(|s| &s.scene)
    }

    pub fn workspace(&self) -> Option<&SceneObject> {
        self.scene().and_then(Scene::workspace)
    }

    // ─── Derived state ───────────────────────────────────────────────────

    /// Toolbar values for the current selection.
    pub fn active(&self) -> ActiveStyle<'_> {
        ActiveStyle::new(&self.selection, &self.defaults)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn defaults(&self) -> &StyleDefaults {
        &self.defaults
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave
            .as_ref()
            .map_or(SaveStatus::Idle, AutoSaver::status)
    }

    /// Whether the surface needs repainting since the last call.
    pub fn take_render_request(&mut self) -> bool {
        self.session
            .as_mut()
            .is_some_and(|s| s.scene.take_render_request())
    }

    // ─── History ─────────────────────────────────────────────────────────

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_redo())
    }

    pub fn on_undo(&mut self) {
        let snapshot = self
            .session
            .as_mut()
            .and_then(|s| s.history.undo().cloned());
        if let Some(snapshot) = snapshot {
            self.restore(snapshot);
        }
    }

    pub fn on_redo(&mut self) {
        let snapshot = self
            .session
            .as_mut()
            .and_then(|s| s.history.redo().cloned());
        if let Some(snapshot) = snapshot {
            self.restore(snapshot);
        }
    }

    /// Replace the scene with a history snapshot without recording it, then
    /// persist the restored state once. Objects get back the ids they had
    /// when the snapshot was taken.
    fn restore(&mut self, snapshot: Snapshot) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let doc = match SceneDocument::from_json(&snapshot.json) {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!("history snapshot unreadable: {err}");
                return;
            }
        };
        session.history.begin_replay();
        session.scene.restore_document(doc, &snapshot.ids);
        self.sync();
        if let Some(session) = self.session.as_mut() {
            session.history.end_replay();
        }
        self.schedule_save(snapshot.json);
    }

    // ─── Event plumbing ──────────────────────────────────────────────────

    /// Drain and dispatch pending scene events. Records one snapshot if the
    /// batch mutated the scene.
    fn sync(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.scene.drain_events();
        if events.is_empty() {
            return;
        }
        let mut outcome = BatchOutcome::default();
        dispatch(&events, &mut outcome);

        if outcome.mutated || outcome.selection_changed {
            self.selection = Selection::capture(&session.scene);
        }
        if let Some(callback) = self.on_selection_cleared.as_mut() {
            for _ in 0..outcome.cleared {
                callback();
            }
        }
        if outcome.mutated && !session.history.is_replaying() {
            self.record_snapshot();
        }
    }

    fn record_snapshot(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let snapshot = match snapshot_of(&session.scene) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                log::warn!("snapshot failed: {err}");
                return;
            }
        };
        let json = snapshot.json.clone();
        if session.history.save(snapshot) {
            log::trace!("history: {} snapshots", session.history.len());
            self.schedule_save(json);
        }
    }

    fn save_payload(&self, json: String) -> SavePayload {
        let size = self
            .workspace()
            .map(|ws| ws.shape.size())
            .unwrap_or(Size::ZERO);
        SavePayload {
            json,
            width: size.width,
            height: size.height,
        }
    }

    fn schedule_save(&mut self, json: String) {
        if self.autosave.is_none() {
            return;
        }
        let payload = self.save_payload(json);
        if let Some(saver) = self.autosave.as_mut() {
            saver.schedule(payload);
        }
    }

    /// Write the current scene now, replacing any pending save.
    pub fn save_now(&mut self) {
        if self.autosave.is_none() {
            return;
        }
        let Some(json) = self.scene().and_then(|s| s.to_document().to_json().ok()) else {
            return;
        };
        let payload = self.save_payload(json);
        if let Some(saver) = self.autosave.as_mut() {
            saver.save_now(payload);
        }
    }

    /// Run the auto-save if its debounce window has elapsed.
    pub fn tick(&mut self) -> bool {
        self.autosave.as_mut().is_some_and(AutoSaver::poll)
    }
}

fn snapshot_of(scene: &Scene) -> Result<Snapshot, DocumentError> {
    Ok(Snapshot::new(scene.to_document().to_json()?, scene.object_ids()))
}
