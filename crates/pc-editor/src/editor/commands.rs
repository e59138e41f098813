//! Style mutators, object factories, layering, alignment, clipboard and
//! workspace commands.

use super::Editor;
use crate::EditorError;
use crate::image::ImageLoader;
use crate::style::{
    CIRCLE_RADIUS, FONT_SIZE, FONT_WEIGHT, RECTANGLE_SIZE, SOFT_RECTANGLE_RADIUS, TEXT_WIDTH,
    TRIANGLE_SIZE,
};
use crate::viewport;
use pc_core::kurbo::{Point, Rect, Vec2};
use pc_core::{
    Brush, DashArray, FontStyle, ImageFilter, ObjectId, SceneEvent, SceneObject, Shape, TextAlign,
    TextProps, normalize_points,
};

/// Edge or axis to align the selection to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    /// Horizontal center.
    Center,
    Right,
    Top,
    /// Vertical center.
    Middle,
    Bottom,
}

impl Alignment {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Offset that moves `object` onto this edge of `target`.
    fn offset(self, object: Rect, target: Rect) -> Vec2 {
        match self {
            Self::Left => Vec2::new(target.x0 - object.x0, 0.0),
            Self::Center => Vec2::new(
                target.x0 + (target.width() - object.width()) / 2.0 - object.x0,
                0.0,
            ),
            Self::Right => Vec2::new(target.x1 - object.width() - object.x0, 0.0),
            Self::Top => Vec2::new(0.0, target.y0 - object.y0),
            Self::Middle => Vec2::new(
                0.0,
                target.y0 + (target.height() - object.height()) / 2.0 - object.y0,
            ),
            Self::Bottom => Vec2::new(0.0, target.y1 - object.height() - object.y0),
        }
    }
}

/// Overrides for [`Editor::add_text`]. Unset fields use the style defaults.
#[derive(Debug, Clone, Default)]
pub struct TextOptions {
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub font_family: Option<String>,
    pub text_align: Option<TextAlign>,
    pub width: Option<f64>,
    pub fill: Option<String>,
}

/// Assign `value` to `slot`, reporting whether it changed.
fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

impl Editor {
    // ─── Selection-wide edits ────────────────────────────────────────────

    /// Apply `edit` to every selected object. Fires one modified event if any
    /// object reported a change.
    fn modify_active(&mut self, edit: impl FnMut(&mut SceneObject) -> bool) -> bool {
        let ids = self
            .session
            .as_ref()
            .map(|s| s.scene.active_ids().to_vec())
            .unwrap_or_default();
        self.modify_objects(&ids, edit)
    }

    fn modify_objects(
        &mut self,
        ids: &[ObjectId],
        mut edit: impl FnMut(&mut SceneObject) -> bool,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let mut changed = false;
        for id in ids {
            if let Some(obj) = session.scene.get_mut(*id) {
                changed |= edit(obj);
            }
        }
        session.scene.request_render();
        if changed {
            session.scene.fire(SceneEvent::ObjectModified(None));
        }
        self.sync();
        changed
    }

    fn modify_active_text(&mut self, mut edit: impl FnMut(&mut TextProps) -> bool) -> bool {
        self.modify_active(|obj| obj.text_mut().is_some_and(&mut edit))
    }

    // ─── Style mutators ──────────────────────────────────────────────────

    pub fn change_fill_color(&mut self, value: &str) {
        self.defaults.fill_color = value.to_string();
        self.modify_active(|obj| set(&mut obj.fill, Some(value.to_string())));
    }

    /// Text has no stroke channel: on text objects this sets the fill.
    pub fn change_stroke_color(&mut self, value: &str) {
        self.defaults.stroke_color = value.to_string();
        self.modify_active(|obj| {
            let slot = if obj.is_text() {
                &mut obj.fill
            } else {
                &mut obj.stroke
            };
            set(slot, Some(value.to_string()))
        });
    }

    pub fn change_stroke_width(&mut self, value: f64) {
        if !value.is_finite() || value < 0.0 {
            return;
        }
        self.defaults.stroke_width = value;
        self.modify_active(|obj| set(&mut obj.stroke_width, value));
    }

    /// An empty pattern means a solid stroke.
    pub fn change_stroke_dash_array(&mut self, value: &[f64]) {
        self.defaults.stroke_dash_array = value.to_vec();
        let dashes = (!value.is_empty()).then(|| DashArray::from_slice(value));
        self.modify_active(|obj| set(&mut obj.stroke_dash_array, dashes.clone()));
    }

    pub fn change_opacity(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        self.defaults.opacity = value;
        self.modify_active(|obj| set(&mut obj.opacity, value));
    }

    /// Corner radius; rectangles only.
    pub fn change_border_radius(&mut self, value: f64) {
        if !value.is_finite() || value < 0.0 {
            return;
        }
        self.defaults.border_radius = value;
        self.modify_active(|obj| match &mut obj.shape {
            Shape::Rect { rx, ry, .. } => set(rx, value) | set(ry, value),
            Shape::Circle { .. }
            | Shape::Triangle { .. }
            | Shape::Polygon { .. }
            | Shape::Textbox(_)
            | Shape::Image { .. }
            | Shape::Path { .. } => false,
        });
    }

    pub fn change_font_family(&mut self, value: &str) {
        self.defaults.font_family = value.to_string();
        self.modify_active_text(|text| set(&mut text.font_family, value.to_string()));
    }

    pub fn change_font_weight(&mut self, value: u16) {
        self.modify_active_text(|text| set(&mut text.font_weight, value));
    }

    pub fn change_font_style(&mut self, value: FontStyle) {
        self.modify_active_text(|text| set(&mut text.font_style, value));
    }

    pub fn change_font_underline(&mut self, value: bool) {
        self.modify_active_text(|text| set(&mut text.underline, value));
    }

    pub fn change_font_strikethrough(&mut self, value: bool) {
        self.modify_active_text(|text| set(&mut text.linethrough, value));
    }

    pub fn change_text_alignment(&mut self, value: TextAlign) {
        self.modify_active_text(|text| set(&mut text.text_align, value));
    }

    pub fn change_font_size(&mut self, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            return;
        }
        self.modify_active_text(|text| set(&mut text.font_size, value));
    }

    /// Replace the filter stack of selected images. `None` removes filters.
    pub fn change_image_filter(&mut self, filter: Option<ImageFilter>) {
        let next: Vec<ImageFilter> = filter.into_iter().collect();
        self.modify_active(|obj| match &mut obj.shape {
            Shape::Image { filters, .. } => set(filters, next.clone()),
            _ => false,
        });
    }

    /// Lock or unlock the selection. The selection is dropped afterwards
    /// because locked objects cannot stay active.
    pub fn change_selectable(&mut self, value: bool) {
        self.modify_active(|obj| set(&mut obj.selectable, value));
        if let Some(session) = self.session.as_mut() {
            session.scene.discard_active();
        }
        self.sync();
    }

    /// Lock or unlock objects by id, as the layer list does. Locked objects
    /// cannot be selected, so unlocking is the way back: unlocked objects
    /// become the selection and locking drops it. The page stays locked.
    pub fn change_object_selectable(&mut self, ids: &[ObjectId], value: bool) {
        self.modify_objects(ids, |obj| {
            !obj.is_workspace() && set(&mut obj.selectable, value)
        });
        if let Some(session) = self.session.as_mut() {
            if value {
                session.scene.set_active(ids);
            } else {
                session.scene.discard_active();
            }
        }
        self.sync();
    }

    pub fn change_brush_color(&mut self, value: &str) {
        self.defaults.brush_color = value.to_string();
        self.apply_brush();
    }

    pub fn change_brush_width(&mut self, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            return;
        }
        self.defaults.brush_width = value;
        self.apply_brush();
    }

    fn apply_brush(&mut self) {
        let brush = Brush {
            color: self.defaults.brush_color.clone(),
            width: self.defaults.brush_width,
        };
        if let Some(session) = self.session.as_mut() {
            session.pen_tool.brush = brush.clone();
            session.scene.brush = brush;
            session.scene.request_render();
        }
    }

    // ─── Factories ───────────────────────────────────────────────────────

    /// Paint an object with the current fill/stroke defaults.
    fn styled(&self, shape: Shape) -> SceneObject {
        let mut obj = SceneObject::new(shape);
        obj.fill = Some(self.defaults.fill_color.clone());
        obj.stroke = Some(self.defaults.stroke_color.clone());
        obj.stroke_width = self.defaults.stroke_width;
        obj.stroke_dash_array = (!self.defaults.stroke_dash_array.is_empty())
            .then(|| DashArray::from_slice(&self.defaults.stroke_dash_array));
        obj
    }

    /// Center `obj` on the workspace, insert it and make it the selection.
    fn add_to_workspace(&mut self, mut obj: SceneObject) -> Option<ObjectId> {
        let session = self.session.as_mut()?;
        let center = session.scene.workspace()?.center();
        obj.opacity = self.defaults.opacity;
        obj.set_center(center);
        log::debug!("add {} at {center:?}", obj.shape.type_name());
        let id = session.scene.add(obj);
        session.scene.set_active(&[id]);
        self.sync();
        Some(id)
    }

    pub fn add_circle(&mut self) -> Option<ObjectId> {
        let obj = self.styled(Shape::Circle {
            radius: CIRCLE_RADIUS,
        });
        self.add_to_workspace(obj)
    }

    /// Rectangle with the default corner radius.
    pub fn add_rectangle(&mut self) -> Option<ObjectId> {
        let radius = self.defaults.border_radius;
        let obj = self.styled(Shape::Rect {
            width: RECTANGLE_SIZE.0,
            height: RECTANGLE_SIZE.1,
            rx: radius,
            ry: radius,
        });
        self.add_to_workspace(obj)
    }

    pub fn add_soft_rectangle(&mut self) -> Option<ObjectId> {
        let obj = self.styled(Shape::Rect {
            width: RECTANGLE_SIZE.0,
            height: RECTANGLE_SIZE.1,
            rx: SOFT_RECTANGLE_RADIUS,
            ry: SOFT_RECTANGLE_RADIUS,
        });
        self.add_to_workspace(obj)
    }

    pub fn add_triangle(&mut self) -> Option<ObjectId> {
        let obj = self.styled(Shape::Triangle {
            width: TRIANGLE_SIZE.0,
            height: TRIANGLE_SIZE.1,
        });
        self.add_to_workspace(obj)
    }

    pub fn add_inverted_triangle(&mut self) -> Option<ObjectId> {
        let (w, h) = TRIANGLE_SIZE;
        self.add_shape(&[
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w / 2.0, h),
        ])
    }

    pub fn add_diamond(&mut self) -> Option<ObjectId> {
        let (w, h) = RECTANGLE_SIZE;
        self.add_shape(&[
            Point::new(w / 2.0, 0.0),
            Point::new(w, h / 2.0),
            Point::new(w / 2.0, h),
            Point::new(0.0, h / 2.0),
        ])
    }

    /// Arbitrary closed polygon. Needs at least three points.
    pub fn add_shape(&mut self, points: &[Point]) -> Option<ObjectId> {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return None;
        }
        let obj = self.styled(Shape::Polygon {
            points: normalize_points(points),
        });
        self.add_to_workspace(obj)
    }

    pub fn add_text(&mut self, value: &str, opts: TextOptions) -> Option<ObjectId> {
        let mut obj = SceneObject::new(Shape::Textbox(TextProps {
            text: value.to_string(),
            width: opts.width.unwrap_or(TEXT_WIDTH),
            font_family: opts
                .font_family
                .unwrap_or_else(|| self.defaults.font_family.clone()),
            font_size: opts.font_size.unwrap_or(FONT_SIZE),
            font_weight: opts.font_weight.unwrap_or(FONT_WEIGHT),
            font_style: FontStyle::Normal,
            underline: false,
            linethrough: false,
            text_align: opts.text_align.unwrap_or_default(),
        }));
        obj.fill = Some(opts.fill.unwrap_or_else(|| self.defaults.fill_color.clone()));
        self.add_to_workspace(obj)
    }

    /// Fetch `url` and place it scaled to fit the workspace. A failed fetch
    /// inserts nothing.
    pub async fn add_image(&mut self, url: &str, loader: &impl ImageLoader) -> Option<ObjectId> {
        if !self.is_initialized() {
            return None;
        }
        match loader.load(url).await {
            Ok(image) => self.add_loaded_image(&image.src, image.width, image.height),
            Err(err) => {
                log::warn!("image not added: {err}");
                None
            }
        }
    }

    /// Place an image whose natural size is already known.
    pub fn add_loaded_image(&mut self, src: &str, width: f64, height: f64) -> Option<ObjectId> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return None;
        }
        let ws = self.workspace()?.scaled_size();
        let scale = (ws.width / width).min(ws.height / height);
        let mut obj = SceneObject::new(Shape::Image {
            src: src.to_string(),
            width,
            height,
            filters: Vec::new(),
        });
        obj.scale_x = scale;
        obj.scale_y = scale;
        self.add_to_workspace(obj)
    }

    // ─── Layers ──────────────────────────────────────────────────────────

    fn reorder(&mut self, step: fn(&mut pc_core::Scene, ObjectId) -> bool) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ids = session.scene.active_ids().to_vec();
        let mut moved = false;
        for id in ids {
            moved |= step(&mut session.scene, id);
        }
        if let Some(ws) = session.scene.workspace().map(|ws| ws.id) {
            session.scene.send_to_back(ws);
        }
        if moved {
            session.scene.fire(SceneEvent::ObjectModified(None));
        }
        self.sync();
    }

    pub fn bring_forward(&mut self) {
        self.reorder(pc_core::Scene::bring_forward);
    }

    pub fn send_backwards(&mut self) {
        self.reorder(pc_core::Scene::send_backwards);
    }

    pub fn bring_to_front(&mut self) {
        self.reorder(pc_core::Scene::bring_to_front);
    }

    pub fn send_to_back(&mut self) {
        self.reorder(pc_core::Scene::send_to_back);
    }

    // ─── Alignment ───────────────────────────────────────────────────────

    /// A single object aligns to the workspace; several align to their
    /// combined bounding box.
    pub fn change_alignment(&mut self, edge: Alignment) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let active = session.scene.active_objects();
        let target = match active.as_slice() {
            [] => return,
            [_] => match session.scene.workspace() {
                Some(ws) => ws.frame(),
                None => return,
            },
            [first, rest @ ..] => rest
                .iter()
                .fold(first.bounds(), |acc, obj| acc.union(obj.bounds())),
        };
        self.modify_active(|obj| {
            let delta = edge.offset(obj.bounds(), target);
            if delta == Vec2::ZERO {
                return false;
            }
            obj.translate(delta);
            true
        });
    }

    // ─── Drawing mode ────────────────────────────────────────────────────

    pub fn enable_drawing_mode(&mut self) {
        self.apply_brush();
        if let Some(session) = self.session.as_mut() {
            session.scene.discard_active();
            session.scene.set_drawing_mode(true);
        }
        self.sync();
    }

    pub fn disable_drawing_mode(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.scene.set_drawing_mode(false);
        }
    }

    pub fn is_drawing_mode(&self) -> bool {
        self.scene().is_some_and(pc_core::Scene::is_drawing_mode)
    }

    // ─── Clipboard & deletion ────────────────────────────────────────────

    pub fn on_copy(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.clipboard.copy(&session.scene);
        }
    }

    pub fn on_cut(&mut self) {
        self.on_copy();
        self.delete();
    }

    pub fn on_paste(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let pasted = session.clipboard.paste(&mut session.scene);
            log::debug!("pasted {} objects", pasted.len());
        }
        self.sync();
    }

    /// Remove every selected object. The workspace is never removed.
    pub fn delete(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let ids = session.scene.active_ids().to_vec();
        if ids.is_empty() {
            return;
        }
        session.scene.discard_active();
        for id in ids {
            if session.scene.get(id).is_some_and(|o| !o.is_workspace()) {
                session.scene.remove(id);
            }
        }
        self.sync();
    }

    /// Select every selectable object.
    pub fn select_all(&mut self) {
        if let Some(session) = self.session.as_mut() {
            let ids: Vec<ObjectId> = session
                .scene
                .objects()
                .iter()
                .filter(|o| o.selectable)
                .map(|o| o.id)
                .collect();
            session.scene.set_active(&ids);
        }
        self.sync();
    }

    // ─── Workspace ───────────────────────────────────────────────────────

    /// Resize the page and refit the view.
    pub fn change_workspace_size(&mut self, width: f64, height: f64) -> Result<(), EditorError> {
        let session = self.session.as_mut().ok_or(EditorError::NotInitialized)?;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EditorError::InvalidWorkspaceSize { width, height });
        }
        let ws = session
            .scene
            .workspace_mut()
            .ok_or(EditorError::MissingWorkspace)?;
        let Shape::Rect {
            width: w,
            height: h,
            ..
        } = &mut ws.shape
        else {
            return Err(EditorError::MissingWorkspace);
        };
        if set(w, width) | set(h, height) {
            let id = ws.id;
            session.scene.fire(SceneEvent::ObjectModified(Some(id)));
        }
        viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
        self.sync();
        Ok(())
    }

    pub fn change_workspace_background(&mut self, value: &str) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(ws) = session.scene.workspace_mut() else {
            return;
        };
        if set(&mut ws.fill, Some(value.to_string())) {
            let id = ws.id;
            session.scene.fire(SceneEvent::ObjectModified(Some(id)));
        }
        // The clip region is a copy of the workspace; refresh it.
        viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
        self.sync();
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    /// Zoom from a slider value, anchored at the surface center.
    pub fn set_zoom(&mut self, value: f64) {
        let cfg = &self.config;
        let Some(zoom) =
            viewport::zoom_for_slider(value, cfg.zoom_slider_scale, cfg.min_zoom, cfg.max_zoom)
        else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            let center = session.scene.center_point();
            session.scene.zoom_to_point(center, zoom);
        }
    }

    pub fn auto_zoom(&mut self) {
        if let Some(session) = self.session.as_mut() {
            viewport::auto_zoom(&mut session.scene, session.container, self.config.fit_margin);
        }
    }

    /// Current zoom ratio; 1 when uninitialized.
    pub fn zoom(&self) -> f64 {
        self.scene().map_or(1.0, pc_core::Scene::zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::editor::InitOptions;
    use crate::persist::ManualClock;
    use pc_core::kurbo::Size;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn editor() -> Editor {
        let mut editor = Editor::with_clock(EditorConfig::default(), Rc::new(ManualClock::new(0)));
        editor.init(InitOptions {
            container: Size::new(1000.0, 800.0),
            ..InitOptions::default()
        });
        editor
    }

    #[test]
    fn alignment_offsets() {
        let target = Rect::new(0.0, 0.0, 900.0, 1200.0);
        let obj = Rect::new(10.0, 20.0, 110.0, 70.0);
        assert_eq!(Alignment::Center.offset(obj, target), Vec2::new(390.0, 0.0));
        assert_eq!(Alignment::Right.offset(obj, target), Vec2::new(790.0, 0.0));
        assert_eq!(Alignment::Bottom.offset(obj, target), Vec2::new(0.0, 1130.0));
        assert_eq!(Alignment::Middle.offset(obj, target), Vec2::new(0.0, 555.0));
        assert_eq!(Alignment::from_name("middle"), Some(Alignment::Middle));
        assert_eq!(Alignment::from_name("diagonal"), None);
    }

    #[test]
    fn factory_centers_and_selects() {
        let mut editor = editor();
        let id = editor.add_rectangle().unwrap();
        let ws_center = editor.workspace().unwrap().center();
        let obj = editor.scene().unwrap().get(id).unwrap();
        assert_eq!(obj.center(), ws_center);
        assert_eq!(editor.selection().ids(), vec![id]);
        assert!(editor.can_undo());
    }

    #[test]
    fn diamond_and_inverted_triangle_are_polygons() {
        let mut editor = editor();
        let id = editor.add_inverted_triangle().unwrap();
        let obj = editor.scene().unwrap().get(id).unwrap();
        let Shape::Polygon { points } = &obj.shape else {
            panic!("expected polygon");
        };
        assert_eq!(
            points.as_slice(),
            [
                Point::new(0.0, 0.0),
                Point::new(400.0, 0.0),
                Point::new(200.0, 400.0)
            ]
        );
        assert!(editor.add_shape(&[Point::ZERO, Point::new(1.0, 1.0)]).is_none());
        assert!(editor.add_diamond().is_some());
    }

    #[test]
    fn stroke_color_on_text_sets_fill() {
        let mut editor = editor();
        let id = editor.add_text("Hello", TextOptions::default()).unwrap();
        editor.change_stroke_color("blue");
        let obj = editor.scene().unwrap().get(id).unwrap();
        assert_eq!(obj.fill.as_deref(), Some("blue"));
        assert_eq!(obj.stroke, None);
        assert_eq!(editor.defaults().stroke_color, "blue");
    }

    #[test]
    fn text_properties_skip_shapes() {
        let mut editor = editor();
        let id = editor.add_circle().unwrap();
        let before = editor.scene().unwrap().get(id).unwrap().clone();
        let undo_depth = editor.can_undo();
        editor.change_font_size(64.0);
        editor.change_font_weight(700);
        let after = editor.scene().unwrap().get(id).unwrap();
        assert_eq!(after.shape, before.shape);
        assert_eq!(editor.can_undo(), undo_depth);
    }

    #[test]
    fn layer_moves_keep_workspace_at_back() {
        let mut editor = editor();
        let a = editor.add_circle().unwrap();
        let _b = editor.add_circle().unwrap();
        editor.select_objects(&[a]);
        editor.send_to_back();
        let objects = editor.scene().unwrap().objects();
        assert!(objects[0].is_workspace());
        assert_eq!(objects[1].id, a);

        editor.bring_to_front();
        assert_eq!(editor.scene().unwrap().objects().last().unwrap().id, a);
    }

    #[test]
    fn group_alignment_uses_combined_bounds() {
        let mut editor = editor();
        let a = editor.add_rectangle().unwrap();
        let b = editor.add_circle().unwrap();
        let union = {
            let scene = editor.scene().unwrap();
            scene.get(a).unwrap().bounds().union(scene.get(b).unwrap().bounds())
        };
        editor.select_objects(&[a, b]);
        editor.change_alignment(Alignment::Left);
        let scene = editor.scene().unwrap();
        assert_eq!(scene.get(a).unwrap().bounds().x0, union.x0);
        assert_eq!(scene.get(b).unwrap().bounds().x0, union.x0);
    }

    #[test]
    fn delete_never_removes_workspace() {
        let mut editor = editor();
        editor.select_all();
        editor.delete();
        assert!(editor.workspace().is_some());

        editor.add_circle();
        editor.delete();
        assert_eq!(editor.scene().unwrap().len(), 1);
        assert!(editor.selection().is_empty());
    }

    #[test]
    fn invalid_workspace_size_rejected() {
        let mut editor = editor();
        assert!(matches!(
            editor.change_workspace_size(-1.0, 100.0),
            Err(EditorError::InvalidWorkspaceSize { .. })
        ));
        assert_eq!(
            editor.workspace().unwrap().shape.size(),
            Size::new(900.0, 1200.0)
        );
        editor.change_workspace_size(500.0, 500.0).unwrap();
        assert_eq!(
            editor.workspace().unwrap().shape.size(),
            Size::new(500.0, 500.0)
        );
    }
}
