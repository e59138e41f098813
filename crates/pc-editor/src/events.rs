//! Scene event dispatch.
//!
//! The scene queues [`SceneEvent`]s as it changes; the editor drains them
//! after each command and routes them here, in order, to a listener.

use pc_core::{ObjectId, SceneEvent};

/// Receives scene events. All methods default to doing nothing.
pub trait SceneListener {
    /// Selection was created or replaced.
    fn on_selection_changed(&mut self, _selected: &[ObjectId]) {}

    fn on_selection_cleared(&mut self) {}

    /// Persisted state changed (add, remove, modify, text edit).
    fn on_object_mutated(&mut self, _event: &SceneEvent) {}

    /// A freehand stroke was committed.
    fn on_path_created(&mut self, _id: ObjectId) {}
}

/// Route `events` to `listener` in issue order.
pub fn dispatch(events: &[SceneEvent], listener: &mut impl SceneListener) {
    for event in events {
        log::trace!("dispatch {event:?}");
        match event {
            SceneEvent::SelectionCreated(ids) | SceneEvent::SelectionUpdated(ids) => {
                listener.on_selection_changed(ids)
            }
            SceneEvent::SelectionCleared => listener.on_selection_cleared(),
            SceneEvent::PathCreated(id) => listener.on_path_created(*id),
            SceneEvent::ObjectAdded(_)
            | SceneEvent::ObjectRemoved(_)
            | SceneEvent::ObjectModified(_)
            | SceneEvent::TextChanged(_) => listener.on_object_mutated(event),
        }
    }
}
