//! Host-driven input: container resizes, keyboard shortcuts, pointer
//! gestures and direct selection.

use super::Editor;
use crate::hotkeys::{HotkeyAction, Hotkeys, toggled_weight};
use crate::input::{InputEvent, KeyEvent};
use crate::tools::{Tool, ToolAction};
use crate::viewport;
use pc_core::kurbo::{Point, Rect, Size};
use pc_core::{FontStyle, ObjectId, SceneEvent};
use pc_render::{hit_test, hit_test_rect};

impl Editor {
    /// Resize observer callback: track the new container and refit.
    pub fn resize_container(&mut self, width: f64, height: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.container = Size::new(width, height);
        viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
    }

    // ─── Keyboard ────────────────────────────────────────────────────────

    /// Run the shortcut bound to `event`. Returns the action so the host
    /// can suppress the browser default.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<HotkeyAction> {
        if !self.is_initialized() {
            return None;
        }
        let action = Hotkeys::resolve(event)?;
        log::debug!("hotkey {:?} -> {action:?}", event.key);
        match action {
            HotkeyAction::Delete => self.delete(),
            HotkeyAction::Undo => self.on_undo(),
            HotkeyAction::Redo => self.on_redo(),
            HotkeyAction::Copy => self.on_copy(),
            HotkeyAction::Cut => self.on_cut(),
            HotkeyAction::Paste => self.on_paste(),
            HotkeyAction::Duplicate => {
                self.on_copy();
                self.on_paste();
            }
            HotkeyAction::Save => self.save_now(),
            HotkeyAction::SelectAll => self.select_all(),
            HotkeyAction::ToggleBold => self.toggle_text(|text| {
                text.font_weight = toggled_weight(text.font_weight);
            }),
            HotkeyAction::ToggleItalic => self.toggle_text(|text| {
                text.font_style = match text.font_style {
                    FontStyle::Italic => FontStyle::Normal,
                    FontStyle::Normal => FontStyle::Italic,
                };
            }),
            HotkeyAction::ToggleUnderline => self.toggle_text(|text| {
                text.underline = !text.underline;
            }),
        }
        Some(action)
    }

    /// Flip a property on every selected text box, then announce a
    /// modification whether or not any text was selected.
    fn toggle_text(&mut self, mut toggle: impl FnMut(&mut pc_core::TextProps)) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for id in session.scene.active_ids().to_vec() {
            if let Some(text) = session.scene.get_mut(id).and_then(|o| o.text_mut()) {
                toggle(text);
            }
        }
        session.scene.request_render();
        session.scene.fire(SceneEvent::ObjectModified(None));
        self.sync();
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64, y: f64, shift: bool) {
        self.pointer(InputEvent::PointerDown { x, y, shift });
    }

    pub fn pointer_move(&mut self, x: f64, y: f64, shift: bool) {
        self.pointer(InputEvent::PointerMove { x, y, shift });
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.pointer(InputEvent::PointerUp { x, y });
    }

    /// Map a surface-space pointer event into the scene and route it to the
    /// pen (drawing mode) or the select tool.
    fn pointer(&mut self, event: InputEvent) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (x, y) = match event {
            InputEvent::PointerDown { x, y, .. }
            | InputEvent::PointerMove { x, y, .. }
            | InputEvent::PointerUp { x, y } => (x, y),
        };
        let at = session.scene.scene_point(Point::new(x, y));
        let event = match event {
            InputEvent::PointerDown { shift, .. } => InputEvent::PointerDown {
                x: at.x,
                y: at.y,
                shift,
            },
            InputEvent::PointerMove { shift, .. } => InputEvent::PointerMove {
                x: at.x,
                y: at.y,
                shift,
            },
            InputEvent::PointerUp { .. } => InputEvent::PointerUp { x: at.x, y: at.y },
        };

        let actions = if session.scene.is_drawing_mode() {
            session.pen_tool.handle(&event, None)
        } else {
            let hit = hit_test(session.scene.objects(), at);
            session.select_tool.handle(&event, hit)
        };
        for action in actions {
            self.apply_tool_action(action);
        }
        self.sync();
    }

    fn apply_tool_action(&mut self, action: ToolAction) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let scene = &mut session.scene;
        match action {
            ToolAction::Select(id) => {
                if !scene.active_ids().contains(&id) {
                    scene.set_active(&[id]);
                }
            }
            ToolAction::ToggleSelect(id) => {
                let mut ids = scene.active_ids().to_vec();
                match ids.iter().position(|a| *a == id) {
                    Some(pos) => {
                        ids.remove(pos);
                    }
                    None => ids.push(id),
                }
                scene.set_active(&ids);
            }
            ToolAction::ClearSelection => scene.discard_active(),
            ToolAction::SelectArea(area) => {
                let ids = hit_test_rect(scene.objects(), area);
                scene.set_active(&ids);
            }
            ToolAction::MoveSelection(delta) => {
                for id in scene.active_ids().to_vec() {
                    if let Some(obj) = scene.get_mut(id) {
                        obj.translate(delta);
                    }
                }
                scene.request_render();
            }
            ToolAction::CommitMove => scene.fire(SceneEvent::ObjectModified(None)),
            ToolAction::AddPath(obj) => {
                let id = scene.add(*obj);
                scene.fire(SceneEvent::PathCreated(id));
            }
        }
    }

    /// Current marquee rectangle in scene coordinates, for drawing the
    /// rubber band.
    pub fn marquee(&self) -> Option<Rect> {
        self.session.as_ref()?.select_tool.marquee_rect
    }

    // ─── Selection & text ────────────────────────────────────────────────

    /// Replace the selection. An empty slice clears it.
    pub fn select_objects(&mut self, ids: &[ObjectId]) {
        if let Some(session) = self.session.as_mut() {
            session.scene.set_active(ids);
        }
        self.sync();
    }

    /// Replace a text box's content, as typed in place.
    pub fn edit_text(&mut self, id: ObjectId, value: &str) {
        if let Some(session) = self.session.as_mut() {
            session.scene.set_text(id, value);
        }
        self.sync();
    }
}
