//! Style defaults and the derived view of the active selection.
//!
//! [`StyleDefaults`] remembers the last paint/stroke/font choices so new
//! objects pick them up. [`ActiveStyle`] answers "what does the toolbar
//! show" by reading the first selected object, falling back to the defaults.

use pc_core::{FontStyle, ImageFilter, ObjectId, Scene, SceneObject, Shape, TextAlign};

// ─── Presets ─────────────────────────────────────────────────────────────

pub const FILL_COLOR: &str = "rgba(0,0,0,1)";
pub const STROKE_COLOR: &str = "rgba(0,0,0,1)";
pub const STROKE_WIDTH: f64 = 2.0;
pub const FONT_FAMILY: &str = "Arial";
pub const FONT_SIZE: f64 = 32.0;
pub const FONT_WEIGHT: u16 = 400;

pub const RECTANGLE_SIZE: (f64, f64) = (400.0, 400.0);
pub const SOFT_RECTANGLE_RADIUS: f64 = 50.0;
pub const CIRCLE_RADIUS: f64 = 225.0;
pub const TRIANGLE_SIZE: (f64, f64) = (400.0, 400.0);
pub const TEXT_WIDTH: f64 = 400.0;

// ─── Defaults ────────────────────────────────────────────────────────────

/// Session-scoped style choices applied to new objects.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    pub fill_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub stroke_dash_array: Vec<f64>,
    pub opacity: f64,
    pub border_radius: f64,
    pub font_family: String,
    pub brush_color: String,
    pub brush_width: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill_color: FILL_COLOR.to_string(),
            stroke_color: STROKE_COLOR.to_string(),
            stroke_width: STROKE_WIDTH,
            stroke_dash_array: Vec::new(),
            opacity: 1.0,
            border_radius: 0.0,
            font_family: FONT_FAMILY.to_string(),
            brush_color: STROKE_COLOR.to_string(),
            brush_width: STROKE_WIDTH,
        }
    }
}

// ─── Selection snapshot ──────────────────────────────────────────────────

/// Read-only copy of the active objects, refreshed after every event batch.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    objects: Vec<SceneObject>,
}

impl Selection {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            objects: scene.active_objects().into_iter().cloned().collect(),
        }
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    pub fn first(&self) -> Option<&SceneObject> {
        self.objects.first()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

// ─── Active style ────────────────────────────────────────────────────────

/// Toolbar values for the current selection.
#[derive(Debug, Clone, Copy)]
pub struct ActiveStyle<'a> {
    selection: &'a Selection,
    defaults: &'a StyleDefaults,
}

impl<'a> ActiveStyle<'a> {
    pub fn new(selection: &'a Selection, defaults: &'a StyleDefaults) -> Self {
        Self {
            selection,
            defaults,
        }
    }

    fn first(&self) -> Option<&'a SceneObject> {
        self.selection.first()
    }

    fn text(&self) -> Option<&'a pc_core::TextProps> {
        self.first().and_then(|o| o.text())
    }

    pub fn fill_color(&self) -> &'a str {
        self.first()
            .and_then(|o| o.fill.as_deref())
            .unwrap_or(&self.defaults.fill_color)
    }

    pub fn stroke_color(&self) -> &'a str {
        self.first()
            .and_then(|o| o.stroke.as_deref())
            .unwrap_or(&self.defaults.stroke_color)
    }

    pub fn stroke_width(&self) -> f64 {
        self.first()
            .map(|o| o.stroke_width)
            .filter(|w| *w > 0.0)
            .unwrap_or(self.defaults.stroke_width)
    }

    pub fn stroke_dash_array(&self) -> &'a [f64] {
        self.first()
            .and_then(|o| o.stroke_dash_array.as_deref())
            .unwrap_or(&self.defaults.stroke_dash_array)
    }

    pub fn opacity(&self) -> f64 {
        self.first().map_or(self.defaults.opacity, |o| o.opacity)
    }

    pub fn border_radius(&self) -> f64 {
        match self.first().map(|o| &o.shape) {
            Some(Shape::Rect { rx, .. }) if *rx > 0.0 => *rx,
            _ => self.defaults.border_radius,
        }
    }

    pub fn font_family(&self) -> &'a str {
        self.text()
            .map(|t| t.font_family.as_str())
            .unwrap_or(&self.defaults.font_family)
    }

    pub fn font_weight(&self) -> u16 {
        self.text().map_or(FONT_WEIGHT, |t| t.font_weight)
    }

    pub fn font_style(&self) -> FontStyle {
        self.text().map_or(FontStyle::Normal, |t| t.font_style)
    }

    pub fn font_underline(&self) -> bool {
        self.text().is_some_and(|t| t.underline)
    }

    pub fn font_strikethrough(&self) -> bool {
        self.text().is_some_and(|t| t.linethrough)
    }

    pub fn text_alignment(&self) -> TextAlign {
        self.text().map_or(TextAlign::Left, |t| t.text_align)
    }

    pub fn font_size(&self) -> f64 {
        self.text().map_or(FONT_SIZE, |t| t.font_size)
    }

    pub fn selectable(&self) -> bool {
        self.first().is_none_or(|o| o.selectable)
    }

    pub fn brush_color(&self) -> &'a str {
        &self.defaults.brush_color
    }

    pub fn brush_width(&self) -> f64 {
        self.defaults.brush_width
    }

    /// First filter of the first selected image.
    pub fn image_filter(&self) -> Option<ImageFilter> {
        match self.first().map(|o| &o.shape) {
            Some(Shape::Image { filters, .. }) => filters.first().copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::TextProps;
    use pc_core::kurbo::Size;
    use pretty_assertions::assert_eq;

    fn text_object() -> SceneObject {
        let mut obj = SceneObject::new(Shape::Textbox(TextProps {
            text: "Hi".into(),
            width: TEXT_WIDTH,
            font_family: "Georgia".into(),
            font_size: 18.0,
            font_weight: 700,
            font_style: FontStyle::Italic,
            underline: true,
            linethrough: false,
            text_align: TextAlign::Right,
        }));
        obj.fill = Some("red".into());
        obj
    }

    fn selection_of(obj: SceneObject) -> Selection {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        let id = scene.add(obj);
        scene.set_active(&[id]);
        Selection::capture(&scene)
    }

    #[test]
    fn empty_selection_reads_defaults() {
        let selection = Selection::default();
        let defaults = StyleDefaults::default();
        let active = ActiveStyle::new(&selection, &defaults);
        assert_eq!(active.fill_color(), FILL_COLOR);
        assert_eq!(active.stroke_width(), 2.0);
        assert_eq!(active.font_weight(), 400);
        assert_eq!(active.font_style(), FontStyle::Normal);
        assert_eq!(active.text_alignment(), TextAlign::Left);
        assert_eq!(active.font_size(), 32.0);
        assert!(active.selectable());
        assert!(active.stroke_dash_array().is_empty());
        assert_eq!(active.image_filter(), None);
    }

    #[test]
    fn text_selection_reads_object() {
        let selection = selection_of(text_object());
        let defaults = StyleDefaults::default();
        let active = ActiveStyle::new(&selection, &defaults);
        assert_eq!(active.fill_color(), "red");
        assert_eq!(active.font_family(), "Georgia");
        assert_eq!(active.font_weight(), 700);
        assert_eq!(active.font_style(), FontStyle::Italic);
        assert!(active.font_underline());
        assert!(!active.font_strikethrough());
        assert_eq!(active.text_alignment(), TextAlign::Right);
        assert_eq!(active.font_size(), 18.0);
        // Text has no stroke: falls back.
        assert_eq!(active.stroke_color(), STROKE_COLOR);
    }

    #[test]
    fn border_radius_reads_rects_only() {
        let defaults = StyleDefaults {
            border_radius: 7.0,
            ..StyleDefaults::default()
        };
        let rounded = selection_of(SceneObject::new(Shape::Rect {
            width: 1.0,
            height: 1.0,
            rx: 50.0,
            ry: 50.0,
        }));
        assert_eq!(ActiveStyle::new(&rounded, &defaults).border_radius(), 50.0);

        let circle = selection_of(SceneObject::new(Shape::Circle { radius: 1.0 }));
        assert_eq!(ActiveStyle::new(&circle, &defaults).border_radius(), 7.0);
    }
}
