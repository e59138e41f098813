//! Viewport sizing: fit the workspace into the container and clamp zoom.

use pc_core::Scene;
use pc_core::kurbo::{Affine, Size};

/// Largest uniform scale that fits `content` inside `container`.
pub fn fit_scale(content: Size, container: Size) -> f64 {
    (container.width / content.width).min(container.height / content.height)
}

fn is_usable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Resize the surface to `container`, zoom so the workspace fills `margin`
/// of the fit, center it, and clip rendering to it.
///
/// Returns `false` (scene untouched apart from the resize) when there is no
/// workspace. Running it twice with the same container is a no-op.
pub fn auto_zoom(scene: &mut Scene, container: Size, margin: f64) -> bool {
    if !is_usable(container) {
        log::trace!("auto_zoom: ignoring container {container:?}");
        return false;
    }
    scene.set_dimensions(container);
    let center = scene.center_point();

    let Some(workspace) = scene.workspace().cloned() else {
        return false;
    };
    let ws_size = workspace.scaled_size();
    if !is_usable(ws_size) {
        return false;
    }
    let zoom = fit_scale(ws_size, container) * margin;

    scene.set_viewport(Affine::IDENTITY);
    scene.zoom_to_point(center, zoom);

    let ws_center = workspace.center();
    let [a, b, c, d, _, _] = scene.viewport().as_coeffs();
    let e = container.width / 2.0 - ws_center.x * a;
    let f = container.height / 2.0 - ws_center.y * d;
    scene.set_viewport(Affine::new([a, b, c, d, e, f]));

    scene.set_clip_path(Some(workspace));
    true
}

/// Zoom ratio for a slider value: `value * scale` clamped to
/// `[min, max]`. NaN is rejected.
pub fn zoom_for_slider(value: f64, scale: f64, min: f64, max: f64) -> Option<f64> {
    let ratio = value * scale;
    if ratio.is_nan() {
        return None;
    }
    Some(ratio.clamp(min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::SceneObject;
    use pc_core::kurbo::Point;
    use pretty_assertions::assert_eq;

    fn scene() -> Scene {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.add(SceneObject::workspace(900.0, 1200.0, "white"));
        scene
    }

    #[test]
    fn fits_and_centers_workspace() {
        let mut scene = scene();
        assert!(auto_zoom(&mut scene, Size::new(1200.0, 800.0), 0.85));

        let zoom = scene.zoom();
        assert!((zoom - 800.0 / 1200.0 * 0.85).abs() < 1e-12);

        let ws_center = scene.workspace().unwrap().center();
        let on_screen = scene.viewport() * ws_center;
        assert!((on_screen - Point::new(600.0, 400.0)).hypot() < 1e-9);
        assert!(scene.clip_path().is_some());
    }

    #[test]
    fn idempotent() {
        let mut scene = scene();
        auto_zoom(&mut scene, Size::new(1000.0, 700.0), 0.85);
        let first = scene.viewport();
        auto_zoom(&mut scene, Size::new(1000.0, 700.0), 0.85);
        assert_eq!(scene.viewport(), first);
    }

    #[test]
    fn no_workspace_or_zero_container() {
        let mut empty = Scene::new(Size::new(10.0, 10.0));
        assert!(!auto_zoom(&mut empty, Size::new(500.0, 500.0), 0.85));

        let mut scene = scene();
        assert!(!auto_zoom(&mut scene, Size::new(0.0, 500.0), 0.85));
        assert_eq!(scene.viewport(), Affine::IDENTITY);
    }

    #[test]
    fn slider_clamps() {
        assert_eq!(zoom_for_slider(1.0, 0.5, 0.1, 2.5), Some(0.5));
        assert_eq!(zoom_for_slider(100.0, 0.5, 0.1, 2.5), Some(2.5));
        assert_eq!(zoom_for_slider(0.0, 0.5, 0.1, 2.5), Some(0.1));
        assert_eq!(zoom_for_slider(f64::NAN, 0.5, 0.1, 2.5), None);
    }
}
