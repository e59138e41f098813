//! SVG export.
//!
//! Emits one `<g>` per object carrying the full object → output transform,
//! with the shape drawn in its local, unscaled coordinates.

use pc_core::kurbo::{Affine, Rect};
use pc_core::{FontStyle, PathCmd, SceneObject, Shape, TextAlign, TEXT_LINE_HEIGHT};
use std::fmt::Write as _;

/// Render `objects` (back-to-front) as an SVG document covering `crop`, a
/// rectangle in surface coordinates after `viewport` is applied.
pub fn render_svg(objects: &[SceneObject], viewport: Affine, crop: Rect) -> String {
    let width = crop.width();
    let height = crop.height();
    let to_output = Affine::translate((-crop.x0, -crop.y0)) * viewport;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );

    for obj in objects {
        render_object(&mut svg, obj, to_output);
    }

    svg.push_str("</svg>");
    log::trace!("svg export: {} objects, {} bytes", objects.len(), svg.len());
    svg
}

fn render_object(out: &mut String, obj: &SceneObject, to_output: Affine) {
    let [a, b, c, d, e, f] = (to_output * obj.transform()).as_coeffs().map(num);
    let _ = write!(
        out,
        "<g transform=\"matrix({a} {b} {c} {d} {e} {f})\""
    );
    if obj.opacity < 1.0 {
        let _ = write!(out, " opacity=\"{}\"", obj.opacity);
    }
    out.push_str(">\n");

    let paint = paint_attrs(obj);
    match &obj.shape {
        Shape::Rect {
            width,
            height,
            rx,
            ry,
        } => {
            let _ = writeln!(
                out,
                "  <rect width=\"{width}\" height=\"{height}\" rx=\"{rx}\" ry=\"{ry}\"{paint} />"
            );
        }
        Shape::Circle { radius } => {
            let _ = writeln!(
                out,
                "  <circle cx=\"{radius}\" cy=\"{radius}\" r=\"{radius}\"{paint} />"
            );
        }
        Shape::Triangle { width, height } => {
            let _ = writeln!(
                out,
                "  <polygon points=\"{},0 {width},{height} 0,{height}\"{paint} />",
                width / 2.0
            );
        }
        Shape::Polygon { points } => {
            let pts: Vec<String> = points.iter().map(|p| format!("{},{}", p.x, p.y)).collect();
            let _ = writeln!(out, "  <polygon points=\"{}\"{paint} />", pts.join(" "));
        }
        Shape::Path { path, .. } => {
            let _ = writeln!(out, "  <path d=\"{}\"{paint} />", path_data(path));
        }
        Shape::Image { src, width, height, .. } => {
            let _ = writeln!(
                out,
                "  <image xlink:href=\"{}\" width=\"{width}\" height=\"{height}\" preserveAspectRatio=\"none\" />",
                escape(src)
            );
        }
        Shape::Textbox(text) => {
            let (anchor, x) = match text.text_align {
                TextAlign::Center => ("middle", text.width / 2.0),
                TextAlign::Right => ("end", text.width),
                TextAlign::Left | TextAlign::Justify => ("start", 0.0),
            };
            let mut decoration = Vec::new();
            if text.underline {
                decoration.push("underline");
            }
            if text.linethrough {
                decoration.push("line-through");
            }
            let style = match text.font_style {
                FontStyle::Normal => "normal",
                FontStyle::Italic => "italic",
            };
            let _ = write!(
                out,
                "  <text font-family=\"{}\" font-size=\"{}\" font-weight=\"{}\" font-style=\"{style}\" text-anchor=\"{anchor}\"",
                escape(&text.font_family),
                text.font_size,
                text.font_weight
            );
            if !decoration.is_empty() {
                let _ = write!(out, " text-decoration=\"{}\"", decoration.join(" "));
            }
            let _ = writeln!(out, "{paint}>");

            let line_height = text.font_size * TEXT_LINE_HEIGHT;
            for (i, line) in text.text.split('\n').enumerate() {
                // Baseline sits roughly one font size below the line top.
                let y = i as f64 * line_height + text.font_size;
                let _ = writeln!(out, "    <tspan x=\"{x}\" y=\"{y}\">{}</tspan>", escape(line));
            }
            out.push_str("  </text>\n");
        }
    }
    out.push_str("</g>\n");
}

fn paint_attrs(obj: &SceneObject) -> String {
    let default_fill = if obj.shape.is_closed() { "rgb(0,0,0)" } else { "none" };
    let fill = obj.fill.as_deref().unwrap_or(default_fill);
    let mut attrs = format!(" fill=\"{}\"", escape(fill));
    if let Some(stroke) = &obj.stroke {
        let _ = write!(
            attrs,
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape(stroke),
            obj.stroke_width
        );
        if let Some(dash) = obj.stroke_dash_array.as_ref().filter(|d| !d.is_empty()) {
            let parts: Vec<String> = dash.iter().map(f64::to_string).collect();
            let _ = write!(attrs, " stroke-dasharray=\"{}\"", parts.join(" "));
        }
    }
    attrs
}

fn path_data(path: &[PathCmd]) -> String {
    let parts: Vec<String> = path
        .iter()
        .map(|cmd| match *cmd {
            PathCmd::MoveTo(x, y) => format!("M {x} {y}"),
            PathCmd::LineTo(x, y) => format!("L {x} {y}"),
            PathCmd::QuadTo(cx, cy, x, y) => format!("Q {cx} {cy} {x} {y}"),
        })
        .collect();
    parts.join(" ")
}

/// Drop negative zero so matrices print as `0`.
fn num(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}

/// Escape XML special characters for attribute values and text nodes.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::TextProps;

    #[test]
    fn svg_is_sized_to_crop() {
        let ws = SceneObject::workspace(900.0, 1200.0, "white");
        let svg = render_svg(&[ws], Affine::IDENTITY, Rect::new(0.0, 0.0, 900.0, 1200.0));
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("width=\"900\" height=\"1200\""));
        assert!(svg.contains("<rect width=\"900\" height=\"1200\""));
        assert!(svg.contains("fill=\"white\""));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn crop_offset_lands_in_transform() {
        let mut obj = SceneObject::new(Shape::Circle { radius: 10.0 });
        obj.left = 110.0;
        obj.top = 60.0;
        let svg = render_svg(&[obj], Affine::IDENTITY, Rect::new(100.0, 50.0, 200.0, 150.0));
        assert!(svg.contains("matrix(1 0 0 1 10 10)"), "{svg}");
    }

    #[test]
    fn stroke_and_dash_attributes() {
        let mut obj = SceneObject::new(Shape::Triangle {
            width: 40.0,
            height: 20.0,
        });
        obj.stroke = Some("red".into());
        obj.stroke_width = 3.0;
        obj.stroke_dash_array = Some([5.0, 5.0].into_iter().collect());
        obj.opacity = 0.5;
        let svg = render_svg(&[obj], Affine::IDENTITY, Rect::new(0.0, 0.0, 40.0, 20.0));
        assert!(svg.contains("points=\"20,0 40,20 0,20\""));
        assert!(svg.contains("stroke=\"red\" stroke-width=\"3\""));
        assert!(svg.contains("stroke-dasharray=\"5 5\""));
        assert!(svg.contains("opacity=\"0.5\""));
    }

    #[test]
    fn text_is_escaped_and_split_into_lines() {
        let obj = SceneObject::new(Shape::Textbox(TextProps {
            text: "a < b\n& c".into(),
            width: 200.0,
            font_family: "Arial".into(),
            font_size: 20.0,
            font_weight: 700,
            font_style: FontStyle::Italic,
            underline: true,
            linethrough: false,
            text_align: TextAlign::Center,
        }));
        let svg = render_svg(&[obj], Affine::IDENTITY, Rect::new(0.0, 0.0, 200.0, 50.0));
        assert!(svg.contains(">a &lt; b</tspan>"));
        assert!(svg.contains(">&amp; c</tspan>"));
        assert!(svg.contains("text-anchor=\"middle\""));
        assert!(svg.contains("font-weight=\"700\""));
        assert!(svg.contains("text-decoration=\"underline\""));
    }
}
