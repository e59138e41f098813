//! Raster export.
//!
//! A deliberately small rasterizer: shape outlines are flat-filled with a
//! per-pixel winding test and strokes are painted by distance to the
//! flattened outline. No anti-aliasing. Text and bitmap images are skipped.

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use pc_core::kurbo::{Affine, BezPath, Line, ParamCurveNearest, PathEl, Point, Rect, Shape as _};
use pc_core::{Color, SceneObject, Shape};
use std::io::Cursor;
use thiserror::Error;

/// Curve flattening tolerance, in output pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export region is empty ({width}x{height})")]
    EmptyCrop { width: f64, height: f64 },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            RasterFormat::Png => "png",
            RasterFormat::Jpeg => "jpeg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            RasterFormat::Png => "image/png",
            RasterFormat::Jpeg => "image/jpeg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Output region in surface coordinates (after the viewport).
    pub crop: Rect,
    /// Output pixels per surface unit.
    pub multiplier: f64,
}

/// Paint `objects` (back-to-front) into a transparent RGBA buffer covering
/// `opts.crop`.
pub fn rasterize(
    objects: &[SceneObject],
    viewport: Affine,
    opts: &RasterOptions,
) -> Result<RgbaImage, ExportError> {
    let width = (opts.crop.width() * opts.multiplier).round();
    let height = (opts.crop.height() * opts.multiplier).round();
    if !(width >= 1.0 && height >= 1.0) {
        return Err(ExportError::EmptyCrop { width, height });
    }
    let mut canvas = RgbaImage::new(width as u32, height as u32);
    let to_pixels = Affine::scale(opts.multiplier)
        * Affine::translate((-opts.crop.x0, -opts.crop.y0))
        * viewport;

    for obj in objects {
        if matches!(obj.shape, Shape::Textbox(_) | Shape::Image { .. }) {
            continue;
        }
        let transform = to_pixels * obj.transform();
        let mut outline = obj.shape.outline();
        outline.apply_affine(transform);

        if obj.shape.is_closed()
            && let Some(fill) = obj.fill.as_deref().and_then(Color::parse)
        {
            fill_path(&mut canvas, &outline, fill, obj.opacity);
        }
        if let Some(stroke) = obj.stroke.as_deref().and_then(Color::parse)
            && obj.stroke_width > 0.0
        {
            let width = obj.stroke_width * transform.determinant().abs().sqrt();
            stroke_path(&mut canvas, &outline, width, stroke, obj.opacity);
        }
    }
    log::trace!(
        "raster export: {} objects into {}x{}",
        objects.len(),
        canvas.width(),
        canvas.height()
    );
    Ok(canvas)
}

/// Encode to PNG, or to JPEG composited on white. `quality` is in `0.0..=1.0`.
pub fn encode(image: &RgbaImage, format: RasterFormat, quality: f64) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    match format {
        RasterFormat::Png => {
            DynamicImage::ImageRgba8(image.clone())
                .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)?;
        }
        RasterFormat::Jpeg => {
            let mut flat = RgbaImage::from_pixel(image.width(), image.height(), Rgba([255, 255, 255, 255]));
            for (x, y, px) in image.enumerate_pixels() {
                blend(flat.get_pixel_mut(x, y), *px, 1.0);
            }
            let q = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
            let rgb = DynamicImage::ImageRgba8(flat).to_rgb8();
            DynamicImage::ImageRgb8(rgb)
                .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Jpeg(q))?;
        }
    }
    Ok(bytes)
}

/// Pixel range covered by `area`, clipped to the canvas.
fn pixel_span(canvas: &RgbaImage, area: Rect) -> Option<(u32, u32, u32, u32)> {
    let x0 = area.x0.floor().max(0.0);
    let y0 = area.y0.floor().max(0.0);
    let x1 = area.x1.ceil().min(f64::from(canvas.width()));
    let y1 = area.y1.ceil().min(f64::from(canvas.height()));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
}

fn fill_path(canvas: &mut RgbaImage, path: &BezPath, color: Color, opacity: f64) {
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, path.bounding_box()) else {
        return;
    };
    let src = Rgba(color.to_rgba8());
    for y in y0..y1 {
        for x in x0..x1 {
            let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            if path.contains(center) {
                blend(canvas.get_pixel_mut(x, y), src, opacity);
            }
        }
    }
}

fn stroke_path(canvas: &mut RgbaImage, path: &BezPath, width: f64, color: Color, opacity: f64) {
    let half = width / 2.0;
    let lines = flatten_lines(path);
    let Some((x0, y0, x1, y1)) = pixel_span(canvas, path.bounding_box().inflate(half, half)) else {
        return;
    };
    // Coverage mask so overlapping segments don't double-blend.
    let cols = (x1 - x0) as usize;
    let mut covered = vec![false; cols * (y1 - y0) as usize];
    for line in &lines {
        let reach = line.bounding_box().inflate(half, half);
        let Some((lx0, ly0, lx1, ly1)) = pixel_span(canvas, reach) else {
            continue;
        };
        for y in ly0.max(y0)..ly1.min(y1) {
            for x in lx0.max(x0)..lx1.min(x1) {
                let cell = (y - y0) as usize * cols + (x - x0) as usize;
                if covered[cell] {
                    continue;
                }
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if line.nearest(center, 1e-6).distance_sq <= half * half {
                    covered[cell] = true;
                }
            }
        }
    }
    let src = Rgba(color.to_rgba8());
    for (i, _) in covered.iter().enumerate().filter(|(_, c)| **c) {
        let x = x0 + (i % cols) as u32;
        let y = y0 + (i / cols) as u32;
        blend(canvas.get_pixel_mut(x, y), src, opacity);
    }
}

fn flatten_lines(path: &BezPath) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut start = Point::ZERO;
    let mut last = Point::ZERO;
    path.flatten(FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = p;
            last = p;
        }
        PathEl::LineTo(p) => {
            lines.push(Line::new(last, p));
            last = p;
        }
        PathEl::ClosePath => {
            if last != start {
                lines.push(Line::new(last, start));
            }
            last = start;
        }
        // flatten only emits the three above
        PathEl::QuadTo(_, p) | PathEl::CurveTo(_, _, p) => {
            lines.push(Line::new(last, p));
            last = p;
        }
    });
    lines
}

/// Source-over blend of a straight-alpha pixel.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, opacity: f64) {
    let sa = f64::from(src[3]) / 255.0 * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = f64::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let s = f64::from(src[c]);
        let d = f64::from(dst[c]);
        dst[c] = ((s * sa + d * da * (1.0 - sa)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}
