//! Hit testing: point → object lookup.
//!
//! Walks the object list front-to-back to find which selectable object is
//! under a scene-space point.

use pc_core::kurbo::{ParamCurveNearest, Point, Rect, Shape as _};
use pc_core::{ObjectId, SceneObject, Shape};

/// Minimum pick distance around open paths, in scene units.
const PATH_PICK_SLOP: f64 = 4.0;

/// Find the topmost selectable object at `point`.
/// Returns `None` if nothing is hit (workspace or background).
pub fn hit_test(objects: &[SceneObject], point: Point) -> Option<ObjectId> {
    // Reverse order: last painted = topmost
    objects
        .iter()
        .rev()
        .filter(|o| o.selectable)
        .find(|o| contains(o, point))
        .map(|o| o.id)
}

fn contains(obj: &SceneObject, point: Point) -> bool {
    if !obj.bounds().inflate(PATH_PICK_SLOP, PATH_PICK_SLOP).contains(point) {
        return false;
    }
    match obj.shape {
        Shape::Path { .. } => {
            let reach = (obj.stroke_width / 2.0).max(PATH_PICK_SLOP);
            obj.scene_outline()
                .segments()
                .any(|seg| seg.nearest(point, 0.1).distance_sq <= reach * reach)
        }
        _ => obj.scene_outline().contains(point),
    }
}

/// All selectable objects whose bounds intersect `area`, back-to-front.
/// Used for marquee selection.
pub fn hit_test_rect(objects: &[SceneObject], area: Rect) -> Vec<ObjectId> {
    objects
        .iter()
        .filter(|o| o.selectable)
        .filter(|o| {
            let b = o.bounds();
            b.intersect(area).area() > 0.0 || area.contains(b.origin())
        })
        .map(|o| o.id)
        .collect()
}
