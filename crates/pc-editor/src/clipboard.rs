//! Copy/paste of the active selection.
//!
//! The slot holds deep clones of the copied objects. Each paste inserts a
//! fresh clone offset from the slot, then nudges the slot itself, so repeated
//! pastes fan out diagonally.

use pc_core::kurbo::Vec2;
use pc_core::{ObjectId, Scene, SceneObject};

#[derive(Debug, Clone)]
pub struct Clipboard {
    slot: Vec<SceneObject>,
    offset: f64,
}

impl Clipboard {
    pub fn new(offset: f64) -> Self {
        Self {
            slot: Vec::new(),
            offset,
        }
    }

    /// Capture the active objects. Returns `false` (slot untouched) when
    /// nothing is selected.
    pub fn copy(&mut self, scene: &Scene) -> bool {
        let active: Vec<SceneObject> = scene.active_objects().into_iter().cloned().collect();
        if active.is_empty() {
            return false;
        }
        log::debug!("clipboard: copied {} objects", active.len());
        self.slot = active;
        true
    }

    /// Insert a clone of the slot and select it. Returns the new ids; empty
    /// when the slot is empty.
    pub fn paste(&mut self, scene: &mut Scene) -> Vec<ObjectId> {
        if self.slot.is_empty() {
            return Vec::new();
        }
        let delta = Vec2::new(self.offset, self.offset);
        scene.discard_active();
        let mut pasted = Vec::with_capacity(self.slot.len());
        for stored in &mut self.slot {
            let mut copy = stored.duplicate();
            copy.translate(delta);
            pasted.push(scene.add(copy));
            stored.translate(delta);
        }
        scene.set_active(&pasted);
        scene.request_render();
        pasted
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_empty()
    }

    pub fn clear(&mut self) {
        self.slot.clear();
    }
}
