//! WASM bridge for Pagecraft. Exposes the editor core to the browser host.
//!
//! Compiled via `wasm-pack build --target web`. The host owns the drawing
//! surface, timers and network: it forwards resize/key/pointer events,
//! calls `tick` from its animation frame, and sends whatever
//! `take_pending_save` returns to the document API.

use pc_core::{Document, FontStyle, ImageFilter, ObjectId, TextAlign};
use pc_editor::{
    Alignment, Clock, DocumentStore, Editor, EditorConfig, ExportFile, FocusTarget, HotkeyAction,
    InitOptions, KeyEvent, ManualClock, PersistError, SavePayload, TextOptions,
};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

// ─── Save outbox ─────────────────────────────────────────────────────────

/// Store that hands saves to the host instead of writing them. Only the
/// latest unsent payload is kept.
#[derive(Debug, Clone, Default)]
struct OutboxStore {
    pending: Rc<RefCell<Option<SavePayload>>>,
}

impl OutboxStore {
    fn take(&self) -> Option<SavePayload> {
        self.pending.borrow_mut().take()
    }
}

impl DocumentStore for OutboxStore {
    fn save(&mut self, document_id: &str, payload: &SavePayload) -> Result<Document, PersistError> {
        *self.pending.borrow_mut() = Some(payload.clone());
        Ok(Document {
            id: document_id.to_string(),
            name: String::new(),
            json: payload.json.clone(),
            width: payload.width,
            height: payload.height,
            created_at: None,
            updated_at: None,
        })
    }

    fn load(&mut self, document_id: &str) -> Result<Document, PersistError> {
        Err(PersistError::NotFound(document_id.to_string()))
    }
}

// ─── Exported file ───────────────────────────────────────────────────────

#[wasm_bindgen(getter_with_clone)]
pub struct ExportedFile {
    pub file_name: String,
    pub mime: String,
    pub data: Vec<u8>,
}

impl From<ExportFile> for ExportedFile {
    fn from(file: ExportFile) -> Self {
        Self {
            file_name: file.file_name,
            mime: file.mime.to_string(),
            data: file.data,
        }
    }
}

// ─── Editor ──────────────────────────────────────────────────────────────

/// The browser-facing editor. One per open document.
#[wasm_bindgen]
pub struct PageEditor {
    editor: Editor,
    clock: Rc<ManualClock>,
    outbox: OutboxStore,
}

#[wasm_bindgen]
impl PageEditor {
    /// Open `document_json` (or a blank page when absent) inside a container
    /// of the given size. `config_json` overrides `EditorConfig` fields.
    #[wasm_bindgen(constructor)]
    pub fn new(
        document_id: &str,
        document_json: Option<String>,
        container_width: f64,
        container_height: f64,
        config_json: Option<String>,
    ) -> Result<PageEditor, JsValue> {
        console_error_panic_hook_setup();
        let config = match config_json.as_deref() {
            Some(json) => EditorConfig::from_json(json).map_err(js_error)?,
            None => EditorConfig::default(),
        };
        let clock = Rc::new(ManualClock::new(0));
        let outbox = OutboxStore::default();
        let mut editor = Editor::with_clock(config, clock.clone() as Rc<dyn Clock>)
            .with_autosave(outbox.clone(), document_id);
        editor.init(InitOptions {
            container: pc_core::kurbo::Size::new(container_width, container_height),
            document: document_json,
            width: None,
            height: None,
        });
        Ok(Self {
            editor,
            clock,
            outbox,
        })
    }

    pub fn dispose(&mut self) {
        self.editor.dispose();
    }

    // ─── Host events ─────────────────────────────────────────────────────

    pub fn resize(&mut self, width: f64, height: f64) {
        self.editor.resize_container(width, height);
    }

    /// Returns the handled action's name, so the host knows to
    /// `preventDefault`.
    #[allow(clippy::too_many_arguments)]
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        meta: bool,
        shift: bool,
        alt: bool,
        in_text_input: bool,
    ) -> Option<String> {
        let event = KeyEvent {
            key: key.to_string(),
            ctrl,
            meta,
            shift,
            alt,
            target: if in_text_input {
                FocusTarget::TextInput
            } else {
                FocusTarget::Canvas
            },
        };
        self.editor
            .handle_key(&event)
            .map(|action| action_name(action).to_string())
    }

    pub fn pointer_down(&mut self, x: f64, y: f64, shift: bool) {
        self.editor.pointer_down(x, y, shift);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool) {
        self.editor.pointer_move(x, y, shift);
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.editor.pointer_up(x, y);
    }

    /// Advance the debounce clock to `now_ms`. Returns `true` when a save
    /// became ready for `take_pending_save`.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.clock.set(now_ms.max(0.0) as u64);
        self.editor.tick()
    }

    /// `tick` against `Date.now()`. Do not mix with a `performance.now()`
    /// time base.
    pub fn tick_now(&mut self) -> bool {
        self.tick(js_sys::Date::now())
    }

    /// Latest save payload as JSON `{json, width, height}`.
    pub fn take_pending_save(&self) -> Option<String> {
        let payload = self.outbox.take()?;
        serde_json::to_string(&payload).ok()
    }

    pub fn save_now(&mut self) {
        self.editor.save_now();
    }

    pub fn save_status(&self) -> String {
        serde_json::to_value(self.editor.save_status())
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default()
    }

    pub fn take_render_request(&mut self) -> bool {
        self.editor.take_render_request()
    }

    // ─── Scene state ─────────────────────────────────────────────────────

    /// Serialized scene for the host's renderer.
    pub fn scene_json(&self) -> Option<String> {
        let scene = self.editor.scene()?;
        scene.to_document().to_json().ok()
    }

    /// Viewport transform as `[a, b, c, d, e, f]`.
    pub fn viewport(&self) -> Vec<f64> {
        self.editor
            .scene()
            .map(|s| s.viewport().as_coeffs().to_vec())
            .unwrap_or_default()
    }

    /// Ids of the selected objects.
    pub fn selection(&self) -> Vec<String> {
        self.editor
            .selection()
            .ids()
            .iter()
            .map(|id| id.as_str().to_string())
            .collect()
    }

    pub fn select_objects(&mut self, ids: Vec<String>) {
        self.editor.select_objects(&lookup_ids(&ids));
    }

    pub fn edit_text(&mut self, id: &str, value: &str) {
        if let Some(id) = ObjectId::lookup(id) {
            self.editor.edit_text(id, value);
        }
    }

    /// Toolbar values for the current selection, as JSON.
    pub fn active_style(&self) -> String {
        let active = self.editor.active();
        serde_json::json!({
            "fillColor": active.fill_color(),
            "strokeColor": active.stroke_color(),
            "strokeWidth": active.stroke_width(),
            "strokeDashArray": active.stroke_dash_array(),
            "opacity": active.opacity(),
            "borderRadius": active.border_radius(),
            "fontFamily": active.font_family(),
            "fontWeight": active.font_weight(),
            "fontStyle": active.font_style(),
            "fontUnderline": active.font_underline(),
            "fontStrikethrough": active.font_strikethrough(),
            "textAlignment": active.text_alignment(),
            "fontSize": active.font_size(),
            "selectable": active.selectable(),
            "brushColor": active.brush_color(),
            "brushWidth": active.brush_width(),
            "imageFilter": active.image_filter(),
        })
        .to_string()
    }

    // ─── Style ───────────────────────────────────────────────────────────

    pub fn change_fill_color(&mut self, value: &str) {
        self.editor.change_fill_color(value);
    }

    pub fn change_stroke_color(&mut self, value: &str) {
        self.editor.change_stroke_color(value);
    }

    pub fn change_stroke_width(&mut self, value: f64) {
        self.editor.change_stroke_width(value);
    }

    pub fn change_stroke_dash_array(&mut self, value: Vec<f64>) {
        self.editor.change_stroke_dash_array(&value);
    }

    pub fn change_opacity(&mut self, value: f64) {
        self.editor.change_opacity(value);
    }

    pub fn change_border_radius(&mut self, value: f64) {
        self.editor.change_border_radius(value);
    }

    pub fn change_font_family(&mut self, value: &str) {
        self.editor.change_font_family(value);
    }

    pub fn change_font_weight(&mut self, value: u16) {
        self.editor.change_font_weight(value);
    }

    /// `"normal"` or `"italic"`; anything else is ignored.
    pub fn change_font_style(&mut self, value: &str) {
        if let Some(style) = parse_name::<FontStyle>(value) {
            self.editor.change_font_style(style);
        }
    }

    pub fn change_font_underline(&mut self, value: bool) {
        self.editor.change_font_underline(value);
    }

    pub fn change_font_strikethrough(&mut self, value: bool) {
        self.editor.change_font_strikethrough(value);
    }

    pub fn change_text_alignment(&mut self, value: &str) {
        if let Some(align) = parse_name::<TextAlign>(value) {
            self.editor.change_text_alignment(align);
        }
    }

    pub fn change_font_size(&mut self, value: f64) {
        self.editor.change_font_size(value);
    }

    /// A filter name, or `None`/unknown to clear filters.
    pub fn change_image_filter(&mut self, value: Option<String>) {
        let filter = value.as_deref().and_then(ImageFilter::from_name);
        self.editor.change_image_filter(filter);
    }

    pub fn change_selectable(&mut self, value: bool) {
        self.editor.change_selectable(value);
    }

    /// Lock or unlock layers by id.
    pub fn change_object_selectable(&mut self, ids: Vec<String>, value: bool) {
        self.editor.change_object_selectable(&lookup_ids(&ids), value);
    }

    pub fn change_brush_color(&mut self, value: &str) {
        self.editor.change_brush_color(value);
    }

    pub fn change_brush_width(&mut self, value: f64) {
        self.editor.change_brush_width(value);
    }

    // ─── Factories ───────────────────────────────────────────────────────

    pub fn add_circle(&mut self) -> Option<String> {
        self.editor.add_circle().map(id_string)
    }

    pub fn add_rectangle(&mut self) -> Option<String> {
        self.editor.add_rectangle().map(id_string)
    }

    pub fn add_soft_rectangle(&mut self) -> Option<String> {
        self.editor.add_soft_rectangle().map(id_string)
    }

    pub fn add_triangle(&mut self) -> Option<String> {
        self.editor.add_triangle().map(id_string)
    }

    pub fn add_inverted_triangle(&mut self) -> Option<String> {
        self.editor.add_inverted_triangle().map(id_string)
    }

    pub fn add_diamond(&mut self) -> Option<String> {
        self.editor.add_diamond().map(id_string)
    }

    /// Polygon from flat `[x0, y0, x1, y1, ...]` coordinates.
    pub fn add_shape(&mut self, coords: Vec<f64>) -> Option<String> {
        let points: Vec<pc_core::kurbo::Point> = coords
            .chunks_exact(2)
            .map(|xy| pc_core::kurbo::Point::new(xy[0], xy[1]))
            .collect();
        self.editor.add_shape(&points).map(id_string)
    }

    pub fn add_text(&mut self, value: &str, font_size: Option<f64>) -> Option<String> {
        let opts = TextOptions {
            font_size,
            ..TextOptions::default()
        };
        self.editor.add_text(value, opts).map(id_string)
    }

    /// Place an image the host already loaded (`naturalWidth`/`naturalHeight`).
    pub fn add_image(&mut self, url: &str, width: f64, height: f64) -> Option<String> {
        self.editor.add_loaded_image(url, width, height).map(id_string)
    }

    // ─── Arrange ─────────────────────────────────────────────────────────

    pub fn bring_forward(&mut self) {
        self.editor.bring_forward();
    }

    pub fn send_backwards(&mut self) {
        self.editor.send_backwards();
    }

    pub fn bring_to_front(&mut self) {
        self.editor.bring_to_front();
    }

    pub fn send_to_back(&mut self) {
        self.editor.send_to_back();
    }

    pub fn change_alignment(&mut self, edge: &str) {
        if let Some(edge) = Alignment::from_name(edge) {
            self.editor.change_alignment(edge);
        }
    }

    pub fn enable_drawing_mode(&mut self) {
        self.editor.enable_drawing_mode();
    }

    pub fn disable_drawing_mode(&mut self) {
        self.editor.disable_drawing_mode();
    }

    // ─── Edit ────────────────────────────────────────────────────────────

    pub fn on_copy(&mut self) {
        self.editor.on_copy();
    }

    pub fn on_cut(&mut self) {
        self.editor.on_cut();
    }

    pub fn on_paste(&mut self) {
        self.editor.on_paste();
    }

    pub fn delete(&mut self) {
        self.editor.delete();
    }

    pub fn on_undo(&mut self) {
        self.editor.on_undo();
    }

    pub fn on_redo(&mut self) {
        self.editor.on_redo();
    }

    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    // ─── Workspace & zoom ────────────────────────────────────────────────

    pub fn change_workspace_size(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.editor
            .change_workspace_size(width, height)
            .map_err(js_error)
    }

    pub fn change_workspace_background(&mut self, value: &str) {
        self.editor.change_workspace_background(value);
    }

    pub fn set_zoom(&mut self, value: f64) {
        self.editor.set_zoom(value);
    }

    pub fn auto_zoom(&mut self) {
        self.editor.auto_zoom();
    }

    pub fn zoom(&self) -> f64 {
        self.editor.zoom()
    }

    // ─── Files ───────────────────────────────────────────────────────────

    pub fn save_as_json(&self) -> Result<ExportedFile, JsValue> {
        self.editor.save_as_json().map(Into::into).map_err(js_error)
    }

    pub fn save_as_svg(&mut self) -> Result<ExportedFile, JsValue> {
        self.editor.save_as_svg().map(Into::into).map_err(js_error)
    }

    pub fn save_as_png(&mut self) -> Result<ExportedFile, JsValue> {
        self.editor.save_as_png().map(Into::into).map_err(js_error)
    }

    pub fn save_as_jpeg(&mut self) -> Result<ExportedFile, JsValue> {
        self.editor.save_as_jpeg().map(Into::into).map_err(js_error)
    }

    pub fn load_from_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.editor.load_from_json(json).map_err(js_error)
    }
}

fn id_string(id: ObjectId) -> String {
    id.as_str().to_string()
}

/// Ids the session knows about. Unknown strings are skipped.
fn lookup_ids(ids: &[String]) -> Vec<ObjectId> {
    ids.iter().filter_map(|id| ObjectId::lookup(id)).collect()
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Parse a lowercase enum name through its serde representation.
fn parse_name<T: DeserializeOwned>(name: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(name.to_string())).ok()
}

fn action_name(action: HotkeyAction) -> &'static str {
    match action {
        HotkeyAction::Delete => "delete",
        HotkeyAction::Undo => "undo",
        HotkeyAction::Redo => "redo",
        HotkeyAction::Copy => "copy",
        HotkeyAction::Cut => "cut",
        HotkeyAction::Paste => "paste",
        HotkeyAction::Duplicate => "duplicate",
        HotkeyAction::Save => "save",
        HotkeyAction::SelectAll => "selectAll",
        HotkeyAction::ToggleBold => "toggleBold",
        HotkeyAction::ToggleItalic => "toggleItalic",
        HotkeyAction::ToggleUnderline => "toggleUnderline",
    }
}

// ─── Logging ─────────────────────────────────────────────────────────────

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg.into()),
            log::Level::Warn => web_sys::console::warn_1(&msg.into()),
            _ => web_sys::console::log_1(&msg.into()),
        }
    }

    fn flush(&self) {}
}

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

/// Forward `log` output to the browser console. `level` is a `log` level
/// name (`"warn"`, `"debug"`, ...); unknown names mean `info`.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let filter = level.parse().unwrap_or(log::LevelFilter::Info);
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(filter);
    }
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Pagecraft WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
