//! In-memory scene: the ordered object list, the active selection, and the
//! viewport transform of the drawing surface.
//!
//! The scene never decides *when* to snapshot or persist. It only queues
//! [`SceneEvent`]s in the order mutations happen; the editor drains and
//! dispatches them.

use crate::document::SceneDocument;
use crate::id::ObjectId;
use crate::model::SceneObject;
use kurbo::{Affine, Point, Size};

/// Something that happened to the scene since the last drain.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    ObjectAdded(ObjectId),
    ObjectRemoved(ObjectId),
    /// `None` when the change is not tied to one object (layer moves).
    ObjectModified(Option<ObjectId>),
    TextChanged(ObjectId),
    /// A freehand stroke was committed as a path object.
    PathCreated(ObjectId),
    SelectionCreated(Vec<ObjectId>),
    SelectionUpdated(Vec<ObjectId>),
    SelectionCleared,
}

impl SceneEvent {
    /// Whether the event changes persisted state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            SceneEvent::ObjectAdded(_)
                | SceneEvent::ObjectRemoved(_)
                | SceneEvent::ObjectModified(_)
                | SceneEvent::TextChanged(_)
        )
    }

    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            SceneEvent::SelectionCreated(_)
                | SceneEvent::SelectionUpdated(_)
                | SceneEvent::SelectionCleared
        )
    }
}

/// Freehand brush settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub color: String,
    pub width: f64,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: "rgba(0,0,0,1)".to_string(),
            width: 2.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    /// Back-to-front.
    objects: Vec<SceneObject>,
    active: Vec<ObjectId>,
    viewport: Affine,
    size: Size,
    clip_path: Option<SceneObject>,
    background: Option<String>,
    drawing_mode: bool,
    pub brush: Brush,
    render_requested: bool,
    events: Vec<SceneEvent>,
}

impl Scene {
    /// An empty scene on a drawing surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            objects: Vec::new(),
            active: Vec::new(),
            viewport: Affine::IDENTITY,
            size,
            clip_path: None,
            background: None,
            drawing_mode: false,
            brush: Brush::default(),
            render_requested: false,
            events: Vec::new(),
        }
    }

    // ─── Objects ─────────────────────────────────────────────────────────

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Mutable access. The caller fires the matching modified event.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    /// Append an object on top of the stack.
    pub fn add(&mut self, mut obj: SceneObject) -> ObjectId {
        if !obj.id.is_assigned() {
            obj.id = ObjectId::mint(obj.shape.type_name());
        }
        let id = obj.id;
        log::trace!("scene: add {id}");
        self.objects.push(obj);
        self.fire(SceneEvent::ObjectAdded(id));
        self.request_render();
        id
    }

    /// Remove an object. It also leaves the selection, without a selection
    /// event; callers that care discard the selection first.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneObject> {
        let idx = self.index_of(id)?;
        let obj = self.objects.remove(idx);
        self.active.retain(|a| *a != id);
        log::trace!("scene: remove {id}");
        self.fire(SceneEvent::ObjectRemoved(id));
        self.request_render();
        Some(obj)
    }

    /// Replace a text box's content and fire `TextChanged`.
    pub fn set_text(&mut self, id: ObjectId, value: &str) -> bool {
        let Some(text) = self.get_mut(id).and_then(|o| o.text_mut()) else {
            return false;
        };
        if text.text == value {
            return false;
        }
        text.text = value.to_string();
        self.fire(SceneEvent::TextChanged(id));
        self.request_render();
        true
    }

    pub fn workspace(&self) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.is_workspace())
    }

    pub fn workspace_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.is_workspace())
    }

    // ─── Z-order ─────────────────────────────────────────────────────────

    /// Move one step toward the front.
    pub fn bring_forward(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.index_of(id) else {
            return false;
        };
        if pos + 1 >= self.objects.len() {
            return false; // already at front
        }
        self.move_object(pos, pos + 1)
    }

    /// Move one step toward the back.
    pub fn send_backwards(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => self.move_object(pos, pos - 1),
            _ => false,
        }
    }

    pub fn bring_to_front(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.index_of(id) else {
            return false;
        };
        let last = self.objects.len() - 1;
        if pos == last {
            return false;
        }
        self.move_object(pos, last)
    }

    pub fn send_to_back(&mut self, id: ObjectId) -> bool {
        match self.index_of(id) {
            Some(pos) if pos > 0 => self.move_object(pos, 0),
            _ => false,
        }
    }

    fn move_object(&mut self, from: usize, to: usize) -> bool {
        let obj = self.objects.remove(from);
        self.objects.insert(to, obj);
        self.request_render();
        true
    }

    // ─── Selection ───────────────────────────────────────────────────────

    pub fn active_ids(&self) -> &[ObjectId] {
        &self.active
    }

    /// Active objects in selection order.
    pub fn active_objects(&self) -> Vec<&SceneObject> {
        self.active.iter().filter_map(|id| self.get(*id)).collect()
    }

    /// Replace the selection. Unknown and non-selectable ids are dropped; an
    /// empty result discards the selection.
    pub fn set_active(&mut self, ids: &[ObjectId]) {
        let mut next: Vec<ObjectId> = Vec::with_capacity(ids.len());
        for id in ids {
            let selectable = self.get(*id).is_some_and(|o| o.selectable);
            if selectable && !next.contains(id) {
                next.push(*id);
            }
        }
        if next.is_empty() {
            self.discard_active();
            return;
        }
        if next == self.active {
            return;
        }
        let event = if self.active.is_empty() {
            SceneEvent::SelectionCreated(next.clone())
        } else {
            SceneEvent::SelectionUpdated(next.clone())
        };
        self.active = next;
        self.fire(event);
        self.request_render();
    }

    pub fn discard_active(&mut self) {
        if self.active.is_empty() {
            return;
        }
        self.active.clear();
        self.fire(SceneEvent::SelectionCleared);
        self.request_render();
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn viewport(&self) -> Affine {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Affine) {
        self.viewport = viewport;
        self.request_render();
    }

    /// Current zoom ratio (the viewport's x scale).
    pub fn zoom(&self) -> f64 {
        self.viewport.as_coeffs()[0]
    }

    /// Set the zoom ratio while keeping `point` (surface coordinates) fixed
    /// on screen.
    pub fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        let before = point;
        let scene_point = self.viewport.inverse() * point;
        let [_, b, c, _, e, f] = self.viewport.as_coeffs();
        let mut next = Affine::new([zoom, b, c, zoom, e, f]);
        let after = next * scene_point;
        let [a, b, c, d, e, f] = next.as_coeffs();
        next = Affine::new([a, b, c, d, e + before.x - after.x, f + before.y - after.y]);
        self.set_viewport(next);
    }

    /// Map a surface point into scene coordinates.
    pub fn scene_point(&self, surface: Point) -> Point {
        self.viewport.inverse() * surface
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_dimensions(&mut self, size: Size) {
        self.size = size;
        self.request_render();
    }

    /// Center of the drawing surface.
    pub fn center_point(&self) -> Point {
        Point::new(self.size.width / 2.0, self.size.height / 2.0)
    }

    pub fn clip_path(&self) -> Option<&SceneObject> {
        self.clip_path.as_ref()
    }

    pub fn set_clip_path(&mut self, clip: Option<SceneObject>) {
        self.clip_path = clip;
        self.request_render();
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    // ─── Drawing mode ────────────────────────────────────────────────────

    pub fn is_drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn set_drawing_mode(&mut self, enabled: bool) {
        self.drawing_mode = enabled;
    }

    // ─── Render & events ─────────────────────────────────────────────────

    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Returns whether a render was requested since the last call.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    pub fn fire(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.events)
    }

    // ─── Documents ───────────────────────────────────────────────────────

    pub fn to_document(&self) -> SceneDocument {
        let mut doc = SceneDocument::new(self.objects.clone());
        doc.background = self.background.clone();
        doc.clip_path = self.clip_path.clone();
        doc
    }

    /// Ids of all objects, back to front.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    /// Replace the whole scene with a document. Objects receive new ids, the
    /// selection is discarded, and `ObjectAdded` fires for every object. The
    /// viewport is left alone.
    pub fn load_document(&mut self, doc: SceneDocument) {
        self.replace_objects(doc, &[]);
    }

    /// Replace the whole scene with an earlier state of itself. `ids` pairs
    /// up with the document's objects by position, so objects keep the ids
    /// they had when the state was captured. A length mismatch falls back to
    /// new ids.
    pub fn restore_document(&mut self, doc: SceneDocument, ids: &[ObjectId]) {
        let ids = if ids.len() == doc.objects.len() { ids } else { &[] };
        self.replace_objects(doc, ids);
    }

    fn replace_objects(&mut self, doc: SceneDocument, ids: &[ObjectId]) {
        self.discard_active();
        let replaced = self.objects.len();
        self.objects.clear();
        log::debug!(
            "scene: load {} objects (replacing {replaced})",
            doc.objects.len()
        );
        self.background = doc.background;
        self.clip_path = doc.clip_path;
        for (i, mut obj) in doc.objects.into_iter().enumerate() {
            obj.id = match ids.get(i) {
                Some(id) => *id,
                None => ObjectId::mint(obj.shape.type_name()),
            };
            self.fire(SceneEvent::ObjectAdded(obj.id));
            self.objects.push(obj);
        }
        // The page always sits behind everything else.
        if let Some(pos) = self.objects.iter().position(SceneObject::is_workspace) {
            let workspace = self.objects.remove(pos);
            self.objects.insert(0, workspace);
        }
        self.request_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Shape;
    use pretty_assertions::assert_eq;

    fn rect() -> SceneObject {
        SceneObject::new(Shape::Rect {
            width: 10.0,
            height: 10.0,
            rx: 0.0,
            ry: 0.0,
        })
    }

    fn scene_with(n: usize) -> (Scene, Vec<ObjectId>) {
        let mut scene = Scene::new(Size::new(800.0, 600.0));
        let ids = (0..n).map(|_| scene.add(rect())).collect();
        scene.drain_events();
        (scene, ids)
    }

    fn order(scene: &Scene) -> Vec<ObjectId> {
        scene.objects().iter().map(|o| o.id).collect()
    }

    #[test]
    fn add_and_remove_fire_events() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(rect());
        assert!(scene.remove(id).is_some());
        assert_eq!(
            scene.drain_events(),
            vec![SceneEvent::ObjectAdded(id), SceneEvent::ObjectRemoved(id)]
        );
        assert!(scene.remove(id).is_none());
    }

    #[test]
    fn z_order_moves() {
        let (mut scene, ids) = scene_with(3);
        let [a, b, c] = [ids[0], ids[1], ids[2]];

        assert!(scene.bring_forward(a));
        assert_eq!(order(&scene), vec![b, a, c]);

        assert!(scene.bring_to_front(b));
        assert_eq!(order(&scene), vec![a, c, b]);
        assert!(!scene.bring_to_front(b), "already at front");

        assert!(scene.send_to_back(b));
        assert_eq!(order(&scene), vec![b, a, c]);
        assert!(!scene.send_backwards(b), "already at back");

        assert!(scene.send_backwards(c));
        assert_eq!(order(&scene), vec![b, c, a]);
    }

    #[test]
    fn selection_events() {
        let (mut scene, ids) = scene_with(2);
        scene.set_active(&[ids[0]]);
        scene.set_active(&[ids[0], ids[1]]);
        scene.set_active(&[ids[0], ids[1]]); // unchanged: no event
        scene.discard_active();
        scene.discard_active(); // already empty: no event
        assert_eq!(
            scene.drain_events(),
            vec![
                SceneEvent::SelectionCreated(vec![ids[0]]),
                SceneEvent::SelectionUpdated(vec![ids[0], ids[1]]),
                SceneEvent::SelectionCleared,
            ]
        );
    }

    #[test]
    fn non_selectable_objects_are_never_active() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let ws = scene.add(SceneObject::workspace(50.0, 50.0, "white"));
        scene.set_active(&[ws]);
        assert!(scene.active_ids().is_empty());
    }

    #[test]
    fn zoom_to_point_keeps_point_fixed() {
        let mut scene = Scene::new(Size::new(800.0, 600.0));
        let anchor = Point::new(400.0, 300.0);
        let under = scene.scene_point(anchor);
        scene.zoom_to_point(anchor, 2.0);
        assert_eq!(scene.zoom(), 2.0);
        let mapped = scene.viewport() * under;
        assert!((mapped - anchor).hypot() < 1e-9);
    }

    #[test]
    fn load_document_reassigns_ids() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.add(SceneObject::workspace(50.0, 50.0, "white"));
        let before = order(&scene);
        let doc = scene.to_document();
        scene.drain_events();

        scene.load_document(doc);
        let after = order(&scene);
        assert_eq!(after.len(), 1);
        assert_ne!(before, after);
        assert!(after[0].is_assigned());
        assert!(scene.workspace().is_some());
        assert_eq!(scene.drain_events(), vec![SceneEvent::ObjectAdded(after[0])]);
    }

    #[test]
    fn restore_document_keeps_ids() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.add(SceneObject::workspace(50.0, 50.0, "white"));
        scene.add(rect());
        let ids = scene.object_ids();
        let doc = scene.to_document();

        scene.restore_document(doc.clone(), &ids);
        assert_eq!(order(&scene), ids);

        scene.restore_document(doc, &ids[..1]);
        let fresh = order(&scene);
        assert_eq!(fresh.len(), 2);
        assert_ne!(fresh, ids, "mismatched id list is ignored");
    }

    #[test]
    fn loaded_workspace_moves_to_the_back() {
        let doc = SceneDocument::new(vec![rect(), SceneObject::workspace(50.0, 50.0, "white")]);
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.load_document(doc);
        assert!(scene.objects()[0].is_workspace());
        assert_eq!(scene.objects()[1].shape.type_name(), "rect");
    }

    #[test]
    fn added_objects_get_an_id() {
        let json = r#"{"type":"circle","radius":4}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert!(!obj.id.is_assigned());
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(obj);
        assert_eq!(id.kind(), "circle");
    }

    #[test]
    fn render_request_is_taken_once() {
        let (mut scene, _) = scene_with(1);
        assert!(scene.take_render_request());
        assert!(!scene.take_render_request());
    }
}
