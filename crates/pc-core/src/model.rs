//! Scene object model.
//!
//! Every placeable item on the page is a [`SceneObject`]: a set of common
//! attributes (position, scale, paints, opacity) plus a [`Shape`] variant that
//! carries the geometry and any kind-specific properties. The page itself is
//! an ordinary rectangle named [`WORKSPACE_NAME`].
//!
//! Serialization follows the editor's JSON document schema: objects are flat
//! maps tagged by `"type"`, keys in camelCase. Only the fields declared here
//! are persisted; see [`crate::document::PERSISTED_KEYS`].

use crate::id::ObjectId;
use kurbo::{Affine, BezPath, Point, Rect, RoundedRect, Shape as _, Size, Vec2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Name tag identifying the page rectangle.
pub const WORKSPACE_NAME: &str = "workspace";

/// Line height multiplier used to size text boxes.
pub const TEXT_LINE_HEIGHT: f64 = 1.16;

/// Stroke dash pattern (`[dash, gap, ...]`).
pub type DashArray = SmallVec<[f64; 4]>;

// ─── Text ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

/// Properties of a wrapping text box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    pub text: String,
    pub width: f64,
    pub font_family: String,
    pub font_size: f64,
    #[serde(default = "default_font_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub linethrough: bool,
    #[serde(default)]
    pub text_align: TextAlign,
}

fn default_font_weight() -> u16 {
    400
}

impl TextProps {
    /// Height of the laid-out box: one line per `\n`-separated paragraph.
    pub fn height(&self) -> f64 {
        let lines = self.text.split('\n').count().max(1);
        lines as f64 * self.font_size * TEXT_LINE_HEIGHT
    }
}

// ─── Images ──────────────────────────────────────────────────────────────

/// Named image filter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFilter {
    Polaroid,
    Sepia,
    Kodachrome,
    Contrast,
    Brightness,
    Grayscale,
    Brownie,
    Vintage,
    Technicolor,
    Pixelate,
    Invert,
    Blur,
    Sharpen,
    Emboss,
    RemoveColor,
    BlackNWhite,
    Vibrance,
    BlendColor,
    HueRotate,
    Resize,
    Gamma,
    Saturation,
    Noise,
}

impl ImageFilter {
    /// Look up a preset by its UI name (`"sepia"`, `"blacknwhite"`).
    /// Unknown names (including `"none"`) return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        serde_json::from_value(serde_json::Value::String(name.to_ascii_lowercase())).ok()
    }
}

// ─── Paths ───────────────────────────────────────────────────────────────

/// A single freehand path command, relative to the object's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadTo(f64, f64, f64, f64), // control, end
}

// ─── Shadow ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

// ─── Shapes ──────────────────────────────────────────────────────────────

/// Kind-specific geometry. Dimensions are unscaled; `scaleX`/`scaleY` on the
/// owning object apply on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Shape {
    Rect {
        width: f64,
        height: f64,
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        ry: f64,
    },
    Circle {
        radius: f64,
    },
    /// Isosceles triangle, apex at the top center.
    Triangle {
        width: f64,
        height: f64,
    },
    /// Arbitrary polygon; points are relative to the top-left of their bounds.
    Polygon {
        points: Vec<Point>,
    },
    Textbox(TextProps),
    Image {
        src: String,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<ImageFilter>,
    },
    /// Freehand brush stroke.
    Path {
        path: Vec<PathCmd>,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// The serialized type tag, also used as the id prefix.
    pub fn type_name(&self) -> &'static str {
        match self {
            Shape::Rect { .. } => "rect",
            Shape::Circle { .. } => "circle",
            Shape::Triangle { .. } => "triangle",
            Shape::Polygon { .. } => "polygon",
            Shape::Textbox(_) => "textbox",
            Shape::Image { .. } => "image",
            Shape::Path { .. } => "path",
        }
    }

    /// Unscaled width and height.
    pub fn size(&self) -> Size {
        match self {
            Shape::Rect { width, height, .. }
            | Shape::Triangle { width, height }
            | Shape::Image { width, height, .. }
            | Shape::Path { width, height, .. } => Size::new(*width, *height),
            Shape::Circle { radius } => Size::new(radius * 2.0, radius * 2.0),
            Shape::Polygon { points } => {
                let (w, h) = points
                    .iter()
                    .fold((0.0_f64, 0.0_f64), |(w, h), p| (w.max(p.x), h.max(p.y)));
                Size::new(w, h)
            }
            Shape::Textbox(text) => Size::new(text.width, text.height()),
        }
    }

    /// Outline in local (unscaled) coordinates.
    pub fn outline(&self) -> BezPath {
        const TOLERANCE: f64 = 0.1;
        match self {
            Shape::Rect {
                width, height, rx, ..
            } => {
                let rect = Rect::new(0.0, 0.0, *width, *height);
                if *rx > 0.0 {
                    RoundedRect::from_rect(rect, *rx).to_path(TOLERANCE)
                } else {
                    rect.to_path(TOLERANCE)
                }
            }
            Shape::Circle { radius } => {
                kurbo::Circle::new((*radius, *radius), *radius).to_path(TOLERANCE)
            }
            Shape::Triangle { width, height } => {
                polygon_path(&[
                    Point::new(width / 2.0, 0.0),
                    Point::new(*width, *height),
                    Point::new(0.0, *height),
                ])
            }
            Shape::Polygon { points } => polygon_path(points),
            Shape::Textbox(_) | Shape::Image { .. } => {
                let size = self.size();
                Rect::new(0.0, 0.0, size.width, size.height).to_path(TOLERANCE)
            }
            Shape::Path { path, .. } => {
                let mut bez = BezPath::new();
                for cmd in path {
                    match *cmd {
                        PathCmd::MoveTo(x, y) => bez.move_to((x, y)),
                        PathCmd::LineTo(x, y) => bez.line_to((x, y)),
                        PathCmd::QuadTo(cx, cy, x, y) => bez.quad_to((cx, cy), (x, y)),
                    }
                }
                bez
            }
        }
    }

    /// Whether the outline is a closed region that a fill paints.
    pub fn is_closed(&self) -> bool {
        !matches!(self, Shape::Path { .. })
    }
}

fn polygon_path(points: &[Point]) -> BezPath {
    let mut bez = BezPath::new();
    let mut iter = points.iter();
    if let Some(first) = iter.next() {
        bez.move_to(*first);
        for p in iter {
            bez.line_to(*p);
        }
        bez.close_path();
    }
    bez
}

/// Shift points so their bounding box starts at the origin.
pub fn normalize_points(points: &[Point]) -> Vec<Point> {
    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    if !min_x.is_finite() || !min_y.is_finite() {
        return Vec::new();
    }
    points
        .iter()
        .map(|p| Point::new(p.x - min_x, p.y - min_y))
        .collect()
}

// ─── Scene Object ────────────────────────────────────────────────────────

/// A single item placed on the page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneObject {
    /// Session identity, assigned when the object joins a scene. Never persisted.
    /// Runtime identity; reassigned on load, never persisted.
    #[serde(skip, default = "ObjectId::unassigned")]
    pub id: ObjectId,

    #[serde(flatten)]
    pub shape: Shape,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub left: f64,
    #[serde(default)]
    pub top: f64,
    #[serde(default = "one")]
    pub scale_x: f64,
    #[serde(default = "one")]
    pub scale_y: f64,
    /// Clockwise rotation in degrees around the object's center.
    #[serde(default)]
    pub angle: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    #[serde(default = "one")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_dash_array: Option<DashArray>,
    #[serde(default = "one")]
    pub opacity: f64,

    #[serde(default = "yes")]
    pub selectable: bool,
    #[serde(default = "yes")]
    pub has_controls: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

impl SceneObject {
    pub fn new(shape: Shape) -> Self {
        let id = ObjectId::mint(shape.type_name());
        Self {
            id,
            shape,
            name: None,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            stroke_dash_array: None,
            opacity: 1.0,
            selectable: true,
            has_controls: true,
            shadow: None,
        }
    }

    /// The page rectangle: white, shadowed, never selectable.
    pub fn workspace(width: f64, height: f64, fill: &str) -> Self {
        let mut ws = Self::new(Shape::Rect {
            width,
            height,
            rx: 0.0,
            ry: 0.0,
        });
        ws.name = Some(WORKSPACE_NAME.to_string());
        ws.fill = Some(fill.to_string());
        ws.selectable = false;
        ws.has_controls = false;
        ws.shadow = Some(Shadow {
            color: "rgba(0,0,0,0.8)".to_string(),
            blur: 5.0,
            offset_x: 0.0,
            offset_y: 0.0,
        });
        ws
    }

    pub fn is_workspace(&self) -> bool {
        self.name.as_deref() == Some(WORKSPACE_NAME)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.shape, Shape::Textbox(_))
    }

    pub fn text(&self) -> Option<&TextProps> {
        match &self.shape {
            Shape::Textbox(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextProps> {
        match &mut self.shape {
            Shape::Textbox(text) => Some(text),
            _ => None,
        }
    }

    /// Width and height after scaling.
    pub fn scaled_size(&self) -> Size {
        let size = self.shape.size();
        Size::new(size.width * self.scale_x, size.height * self.scale_y)
    }

    /// Axis-aligned box from `left`/`top` and the scaled size (rotation ignored).
    pub fn frame(&self) -> Rect {
        Rect::from_origin_size((self.left, self.top), self.scaled_size())
    }

    pub fn center(&self) -> Point {
        self.frame().center()
    }

    /// Place the object so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        let size = self.scaled_size();
        self.left = center.x - size.width / 2.0;
        self.top = center.y - size.height / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.left += delta.x;
        self.top += delta.y;
    }

    /// Local → scene transform: scale, then rotate about the center.
    pub fn transform(&self) -> Affine {
        let size = self.scaled_size();
        let center = self.center();
        Affine::translate(center.to_vec2())
            * Affine::rotate(self.angle.to_radians())
            * Affine::translate((-size.width / 2.0, -size.height / 2.0))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }

    /// Outline in scene coordinates.
    pub fn scene_outline(&self) -> BezPath {
        let mut path = self.shape.outline();
        path.apply_affine(self.transform());
        path
    }

    /// Bounding box in scene coordinates, rotation included.
    pub fn bounds(&self) -> Rect {
        let size = self.shape.size();
        self.transform()
            .transform_rect_bbox(Rect::new(0.0, 0.0, size.width, size.height))
    }

    /// Deep copy with a fresh id.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = ObjectId::mint(self.shape.type_name());
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(w: f64, h: f64) -> SceneObject {
        SceneObject::new(Shape::Rect {
            width: w,
            height: h,
            rx: 0.0,
            ry: 0.0,
        })
    }

    #[test]
    fn scaled_size_and_center() {
        let mut obj = rect(100.0, 50.0);
        obj.scale_x = 2.0;
        obj.left = 10.0;
        obj.top = 20.0;
        assert_eq!(obj.scaled_size(), Size::new(200.0, 50.0));
        assert_eq!(obj.center(), Point::new(110.0, 45.0));

        obj.set_center(Point::new(0.0, 0.0));
        assert_eq!((obj.left, obj.top), (-100.0, -25.0));
    }

    #[test]
    fn bounds_include_rotation() {
        let mut obj = rect(100.0, 50.0);
        obj.angle = 90.0;
        let b = obj.bounds();
        assert!((b.width() - 50.0).abs() < 1e-9);
        assert!((b.height() - 100.0).abs() < 1e-9);
        // Rotation is about the center, which stays put.
        assert!((b.center().x - 50.0).abs() < 1e-9);
        assert!((b.center().y - 25.0).abs() < 1e-9);
    }

    #[test]
    fn polygon_size_from_points() {
        let shape = Shape::Polygon {
            points: normalize_points(&[
                Point::new(10.0, 10.0),
                Point::new(50.0, 10.0),
                Point::new(30.0, 40.0),
            ]),
        };
        assert_eq!(shape.size(), Size::new(40.0, 30.0));
    }

    #[test]
    fn text_height_counts_lines() {
        let text = TextProps {
            text: "one\ntwo".into(),
            width: 400.0,
            font_family: "Arial".into(),
            font_size: 10.0,
            font_weight: 400,
            font_style: FontStyle::Normal,
            underline: false,
            linethrough: false,
            text_align: TextAlign::Left,
        };
        assert!((text.height() - 23.2).abs() < 1e-9);
    }

    #[test]
    fn serializes_flat_with_type_tag() {
        let mut obj = rect(10.0, 20.0);
        obj.fill = Some("red".into());
        let value = serde_json::to_value(&obj).unwrap();
        assert_eq!(value["type"], "rect");
        assert_eq!(value["width"], 10.0);
        assert_eq!(value["scaleX"], 1.0);
        assert_eq!(value["fill"], "red");
        assert!(value.get("id").is_none(), "ids are runtime-only");
        assert!(value.get("stroke").is_none());
    }

    #[test]
    fn deserializes_with_defaults_and_ignores_unknown_keys() {
        let json = r#"{"type":"circle","radius":5,"left":3,"cacheKey":"x","dirty":true}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.shape, Shape::Circle { radius: 5.0 });
        assert_eq!(obj.left, 3.0);
        assert_eq!(obj.opacity, 1.0);
        assert!(obj.selectable);
    }

    #[test]
    fn text_keys_are_camel_case() {
        let json = r#"{"type":"textbox","text":"Hi","width":200,"fontFamily":"Arial","fontSize":32,"fontWeight":700,"textAlign":"center"}"#;
        let obj: SceneObject = serde_json::from_str(json).unwrap();
        let text = obj.text().unwrap();
        assert_eq!(text.font_weight, 700);
        assert_eq!(text.text_align, TextAlign::Center);
        assert_eq!(text.font_style, FontStyle::Normal);
    }

    #[test]
    fn image_filter_names() {
        assert_eq!(ImageFilter::from_name("sepia"), Some(ImageFilter::Sepia));
        assert_eq!(
            ImageFilter::from_name("blacknwhite"),
            Some(ImageFilter::BlackNWhite)
        );
        assert_eq!(ImageFilter::from_name("none"), None);
    }

    #[test]
    fn duplicate_gets_fresh_id() {
        let obj = rect(1.0, 1.0);
        let copy = obj.duplicate();
        assert_ne!(obj.id, copy.id);
        assert_eq!(obj.shape, copy.shape);
    }

    #[test]
    fn workspace_is_tagged_and_locked() {
        let ws = SceneObject::workspace(900.0, 1200.0, "white");
        assert!(ws.is_workspace());
        assert!(!ws.selectable);
        assert!(!ws.has_controls);
    }
}
