//! Pointer tools.
//!
//! Each tool translates pointer events (already mapped into scene space)
//! into `ToolAction`s that the editor applies to the scene.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Select Tool | Pen Tool |
//! |----------|-------------|----------|
//! | **Shift** | Toggle selection on click, axis-constrain drag | - |

use crate::input::InputEvent;
use pc_core::kurbo::{Point, Rect, Vec2};
use pc_core::{Brush, ObjectId, PathCmd, SceneObject, Shape, normalize_points};

/// The active tool determines how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Select,
    Pen,
}

/// What a tool asks the editor to do.
#[derive(Debug, Clone)]
pub enum ToolAction {
    /// Make this the selection, unless it is already part of it.
    Select(ObjectId),
    ToggleSelect(ObjectId),
    ClearSelection,
    /// Select everything intersecting the area.
    SelectArea(Rect),
    /// Translate every selected object.
    MoveSelection(Vec2),
    /// A drag finished after moving something.
    CommitMove,
    /// Insert a finished freehand stroke.
    AddPath(Box<SceneObject>),
}

/// Trait for tools that handle input and produce actions.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Handle an input event, returning zero or more actions. `hit` is the
    /// topmost selectable object under the pointer.
    fn handle(&mut self, event: &InputEvent, hit: Option<ObjectId>) -> Vec<ToolAction>;
}

// ─── Select Tool ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct SelectTool {
    /// Last pointer position while dragging objects.
    drag_from: Option<Point>,
    moved: bool,
    /// Marquee (rubber-band) anchor, set when pointer-down hits empty space.
    pub marquee_start: Option<Point>,
    /// Current marquee rectangle. Updated during drag.
    pub marquee_rect: Option<Rect>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn handle(&mut self, event: &InputEvent, hit: Option<ObjectId>) -> Vec<ToolAction> {
        match *event {
            InputEvent::PointerDown { x, y, shift } => {
                self.marquee_start = None;
                self.marquee_rect = None;
                self.moved = false;
                let at = Point::new(x, y);

                if let Some(id) = hit {
                    self.drag_from = Some(at);
                    if shift {
                        vec![ToolAction::ToggleSelect(id)]
                    } else {
                        vec![ToolAction::Select(id)]
                    }
                } else {
                    self.drag_from = None;
                    self.marquee_start = Some(at);
                    self.marquee_rect = Some(Rect::from_points(at, at));
                    if shift {
                        vec![]
                    } else {
                        vec![ToolAction::ClearSelection]
                    }
                }
            }
            InputEvent::PointerMove { x, y, shift } => {
                let at = Point::new(x, y);
                if let Some(start) = self.marquee_start {
                    self.marquee_rect = Some(Rect::from_points(start, at));
                    return vec![];
                }
                let Some(from) = self.drag_from else {
                    return vec![];
                };
                let mut delta = at - from;
                self.drag_from = Some(at);
                // Shift: constrain to dominant axis
                if shift {
                    if delta.x.abs() > delta.y.abs() {
                        delta.y = 0.0;
                    } else {
                        delta.x = 0.0;
                    }
                }
                if delta == Vec2::ZERO {
                    return vec![];
                }
                self.moved = true;
                vec![ToolAction::MoveSelection(delta)]
            }
            InputEvent::PointerUp { .. } => {
                let mut actions = Vec::new();
                if self.moved {
                    actions.push(ToolAction::CommitMove);
                }
                if let Some(area) = self.marquee_rect.take()
                    && area.area() > 0.0
                {
                    actions.push(ToolAction::SelectArea(area));
                }
                self.marquee_start = None;
                self.drag_from = None;
                self.moved = false;
                actions
            }
        }
    }
}

// ─── Pen Tool (freehand) ─────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct PenTool {
    drawing: bool,
    points: Vec<Point>,
    pub brush: Brush,
}

impl PenTool {
    pub fn new(brush: Brush) -> Self {
        Self {
            drawing: false,
            points: Vec::new(),
            brush,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Turn the collected points into a path object positioned at their
    /// bounding box. Segments are smoothed through midpoints.
    fn finish(&mut self) -> Option<SceneObject> {
        let points = std::mem::take(&mut self.points);
        let first = *points.first()?;
        let left = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let top = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let local = normalize_points(&points);

        let mut path = vec![PathCmd::MoveTo(first.x - left, first.y - top)];
        for pair in local.windows(2) {
            let mid = pair[0].midpoint(pair[1]);
            path.push(PathCmd::QuadTo(pair[0].x, pair[0].y, mid.x, mid.y));
        }
        let last = local.last().copied().unwrap_or(Point::ZERO);
        path.push(PathCmd::LineTo(last.x, last.y));

        let (width, height) = local
            .iter()
            .fold((0.0_f64, 0.0_f64), |(w, h), p| (w.max(p.x), h.max(p.y)));
        let mut obj = SceneObject::new(Shape::Path {
            path,
            width,
            height,
        });
        obj.left = left;
        obj.top = top;
        obj.stroke = Some(self.brush.color.clone());
        obj.stroke_width = self.brush.width;
        Some(obj)
    }
}

impl Tool for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn handle(&mut self, event: &InputEvent, _hit: Option<ObjectId>) -> Vec<ToolAction> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => {
                self.drawing = true;
                self.points.clear();
                self.points.push(Point::new(x, y));
                vec![]
            }
            InputEvent::PointerMove { x, y, .. } => {
                if self.drawing {
                    self.points.push(Point::new(x, y));
                }
                vec![]
            }
            InputEvent::PointerUp { x, y } => {
                if !self.drawing {
                    return vec![];
                }
                self.drawing = false;
                if self.points.last() != Some(&Point::new(x, y)) {
                    self.points.push(Point::new(x, y));
                }
                match self.finish() {
                    Some(obj) => vec![ToolAction::AddPath(Box::new(obj))],
                    None => vec![],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown { x, y, shift: false }
    }

    fn drag(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { x, y, shift: false }
    }

    #[test]
    fn select_click_and_drag() {
        let id = ObjectId::mint("rect");
        let mut tool = SelectTool::new();
        let actions = tool.handle(&down(10.0, 10.0), Some(id));
        assert!(matches!(actions.as_slice(), [ToolAction::Select(hit)] if *hit == id));

        let actions = tool.handle(&drag(15.0, 12.0), Some(id));
        assert!(
            matches!(actions.as_slice(), [ToolAction::MoveSelection(d)] if *d == Vec2::new(5.0, 2.0))
        );

        let actions = tool.handle(&InputEvent::PointerUp { x: 15.0, y: 12.0 }, Some(id));
        assert!(matches!(actions.as_slice(), [ToolAction::CommitMove]));
    }

    #[test]
    fn shift_drag_locks_axis() {
        let id = ObjectId::mint("rect");
        let mut tool = SelectTool::new();
        tool.handle(&down(0.0, 0.0), Some(id));
        let actions = tool.handle(
            &InputEvent::PointerMove {
                x: 10.0,
                y: 3.0,
                shift: true,
            },
            Some(id),
        );
        assert!(
            matches!(actions.as_slice(), [ToolAction::MoveSelection(d)] if *d == Vec2::new(10.0, 0.0))
        );
    }

    #[test]
    fn empty_click_clears_then_marquee_selects() {
        let mut tool = SelectTool::new();
        let actions = tool.handle(&down(0.0, 0.0), None);
        assert!(matches!(actions.as_slice(), [ToolAction::ClearSelection]));
        tool.handle(&drag(50.0, 40.0), None);
        let actions = tool.handle(&InputEvent::PointerUp { x: 50.0, y: 40.0 }, None);
        assert!(
            matches!(actions.as_slice(), [ToolAction::SelectArea(r)] if *r == Rect::new(0.0, 0.0, 50.0, 40.0))
        );
    }

    #[test]
    fn pen_stroke_becomes_one_path() {
        let mut tool = PenTool::new(Brush {
            color: "red".into(),
            width: 4.0,
        });
        assert!(tool.handle(&down(10.0, 20.0), None).is_empty());
        tool.handle(&drag(30.0, 25.0), None);
        tool.handle(&drag(50.0, 40.0), None);
        let actions = tool.handle(&InputEvent::PointerUp { x: 50.0, y: 40.0 }, None);

        let [ToolAction::AddPath(obj)] = actions.as_slice() else {
            panic!("expected one path, got {actions:?}");
        };
        assert_eq!((obj.left, obj.top), (10.0, 20.0));
        assert_eq!(obj.stroke.as_deref(), Some("red"));
        assert_eq!(obj.stroke_width, 4.0);
        assert_eq!(obj.fill, None);
        let Shape::Path { path, width, height } = &obj.shape else {
            panic!("not a path");
        };
        assert_eq!((*width, *height), (40.0, 20.0));
        assert_eq!(path.first(), Some(&PathCmd::MoveTo(0.0, 0.0)));
        assert_eq!(path.last(), Some(&PathCmd::LineTo(40.0, 20.0)));
        assert!(!tool.is_drawing());
    }
}
