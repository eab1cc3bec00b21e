//! Software raster surface backed by an RGBA8 pixel buffer.

use crate::glyphs::GlyphLibrary;
use crate::renderer::{RenderError, RenderResult};
use image::RgbaImage;
use inkpad_core::marks::Rgba;
use inkpad_core::surface::Surface;
use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape};

/// A CPU raster surface.
///
/// Strokes are rasterized by per-segment capsule coverage with a one-pixel
/// anti-aliased edge; the capsule's round ends give polylines round caps
/// and joins, so a one-point stroke lands as a dot. Glyphs go through
/// [`GlyphLibrary`] outline lookup and a scanline nonzero fill.
pub struct RasterSurface {
    pixels: RgbaImage,
    glyphs: GlyphLibrary,
}

impl RasterSurface {
    /// Acquire a surface of the given pixel size, with glyphs served from
    /// the system fonts.
    ///
    /// Fails with [`RenderError::SurfaceUnavailable`] for a zero-sized
    /// surface; that is fatal at startup and must not be swallowed.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable(format!(
                "zero-sized surface {width}x{height}"
            )));
        }
        Ok(Self {
            pixels: RgbaImage::new(width, height),
            glyphs: GlyphLibrary::from_system_fonts(),
        })
    }

    /// Use a specific glyph library instead of the system fonts.
    pub fn with_glyphs(mut self, glyphs: GlyphLibrary) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Read a pixel (for tests and embeddings that blit the buffer).
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let px = self.pixels.get_pixel(x, y);
        Rgba::new(px.0[0], px.0[1], px.0[2], px.0[3])
    }

    /// The raw RGBA8 buffer, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Encode the current contents as a PNG byte stream.
    ///
    /// A failed encode leaves the surface untouched; re-invoking is the
    /// only retry.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .map_err(|e| RenderError::EncodeFailed(e.to_string()))?;
        Ok(bytes)
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Rgba, coverage: f64) {
        let alpha = f64::from(color.a) / 255.0 * coverage;
        if alpha <= 0.0 {
            return;
        }
        let px = self.pixels.get_pixel_mut(x, y);
        let blend = |src: u8, dst: u8| -> u8 {
            (f64::from(src) * alpha + f64::from(dst) * (1.0 - alpha)).round() as u8
        };
        let out_a = (alpha * 255.0 + f64::from(px.0[3]) * (1.0 - alpha)).round() as u8;
        *px = image::Rgba([
            blend(color.r, px.0[0]),
            blend(color.g, px.0[1]),
            blend(color.b, px.0[2]),
            out_a,
        ]);
    }

    /// Paint the capsule of the segment a-b with the given radius.
    fn stamp_segment(&mut self, a: Point, b: Point, radius: f64, color: Rgba) {
        let pad = radius + 1.0;
        let x0 = (a.x.min(b.x) - pad).floor().max(0.0) as u32;
        let y0 = (a.y.min(b.y) - pad).floor().max(0.0) as u32;
        let x1 = ((a.x.max(b.x) + pad).ceil() as i64).clamp(0, i64::from(self.width())) as u32;
        let y1 = ((a.y.max(b.y) + pad).ceil() as i64).clamp(0, i64::from(self.height())) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let dist = segment_distance(center, a, b);
                let coverage = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }

    /// Scanline nonzero fill of a flattened path.
    fn fill_path(&mut self, path: &BezPath, color: Rgba) {
        let mut edges: Vec<(Point, Point)> = Vec::new();
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        kurbo::flatten(path.iter(), 0.1, |el| match el {
            PathEl::MoveTo(p) => {
                start = p;
                last = p;
            }
            PathEl::LineTo(p) => {
                edges.push((last, p));
                last = p;
            }
            PathEl::ClosePath => {
                edges.push((last, start));
                last = start;
            }
            _ => {}
        });
        if edges.is_empty() {
            return;
        }

        let bounds = path.bounding_box();
        let y0 = bounds.y0.floor().max(0.0) as u32;
        let y1 = (bounds.y1.ceil() as i64).clamp(0, i64::from(self.height())) as u32;

        for y in y0..y1 {
            let scan_y = f64::from(y) + 0.5;
            let mut crossings: Vec<(f64, i32)> = Vec::new();
            for &(a, b) in &edges {
                let (top, bottom, dir) = if a.y <= b.y { (a, b, 1) } else { (b, a, -1) };
                if scan_y < top.y || scan_y >= bottom.y {
                    continue;
                }
                let t = (scan_y - top.y) / (bottom.y - top.y);
                crossings.push((top.x + t * (bottom.x - top.x), dir));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for (x, dir) in crossings {
                if winding == 0 {
                    span_start = x;
                }
                winding += dir;
                if winding == 0 {
                    let px0 = span_start.round().max(0.0) as u32;
                    let px1 = (x.round() as i64).clamp(0, i64::from(self.width())) as u32;
                    for px in px0..px1 {
                        self.blend_pixel(px, y, color, 1.0);
                    }
                }
            }
        }
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self, color: Rgba) {
        // Opaque fill: alpha forced to 255 so exports bake the background in.
        for px in self.pixels.pixels_mut() {
            *px = image::Rgba([color.r, color.g, color.b, 255]);
        }
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba) {
        if points.is_empty() {
            return;
        }
        let radius = (width / 2.0).max(0.5);
        if points.len() == 1 {
            self.stamp_segment(points[0], points[0], radius, color);
            return;
        }
        for window in points.windows(2) {
            self.stamp_segment(window[0], window[1], radius, color);
        }
    }

    fn fill_glyph(&mut self, glyph: &str, center: Point, size: f64, rotation: f64, color: Rgba) {
        let Some((mut path, units_per_em)) = self.glyphs.outline(glyph) else {
            log::warn!("no outline for glyph {glyph:?}; sticker skipped");
            return;
        };
        let glyph_bounds: Rect = path.bounding_box();
        let scale = size / units_per_em;
        // Font units are y-up; flip while scaling, center the glyph box on
        // `center` and rotate about it.
        let transform = Affine::translate(center.to_vec2())
            * Affine::rotate(rotation.to_radians())
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-glyph_bounds.center().to_vec2());
        path.apply_affine(transform);
        self.fill_path(&path, color);
    }
}

/// Distance from a point to the segment a-b.
fn segment_distance(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_surface(width: u32, height: u32) -> RasterSurface {
        RasterSurface::new(width, height)
            .unwrap()
            .with_glyphs(GlyphLibrary::empty())
    }

    #[test]
    fn test_zero_sized_surface_is_unavailable() {
        assert!(matches!(
            RasterSurface::new(0, 64),
            Err(RenderError::SurfaceUnavailable(_))
        ));
    }

    #[test]
    fn test_clear_fills_opaque_background() {
        let mut surface = test_surface(8, 8);
        surface.clear(Rgba::new(250, 250, 250, 0));

        let px = surface.pixel(3, 3);
        assert_eq!((px.r, px.g, px.b), (250, 250, 250));
        assert_eq!(px.a, 255);
    }

    #[test]
    fn test_horizontal_stroke_covers_center_not_corner() {
        let mut surface = test_surface(32, 32);
        surface.clear(Rgba::white());
        surface.stroke_polyline(
            &[Point::new(4.0, 16.0), Point::new(28.0, 16.0)],
            4.0,
            Rgba::black(),
        );

        assert!(surface.pixel(16, 16).r < 64);
        assert_eq!(surface.pixel(0, 0), Rgba::white());
        // Well above the stroke stays background.
        assert_eq!(surface.pixel(16, 4), Rgba::white());
    }

    #[test]
    fn test_single_point_stroke_renders_dot() {
        let mut surface = test_surface(16, 16);
        surface.clear(Rgba::white());
        surface.stroke_polyline(&[Point::new(8.0, 8.0)], 4.0, Rgba::black());

        assert!(surface.pixel(8, 8).r < 64);
        assert_eq!(surface.pixel(2, 2), Rgba::white());
    }

    #[test]
    fn test_segment_distance_degenerate_segment() {
        let d = segment_distance(Point::new(3.0, 4.0), Point::ZERO, Point::ZERO);
        assert!((d - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_glyph_leaves_pixels_untouched() {
        let mut surface = test_surface(16, 16);
        surface.clear(Rgba::white());
        surface.fill_glyph("🙂", Point::new(8.0, 8.0), 12.0, 0.0, Rgba::black());

        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(surface.pixel(x, y), Rgba::white());
            }
        }
    }

    #[test]
    fn test_fill_path_square() {
        let mut surface = test_surface(16, 16);
        surface.clear(Rgba::white());

        let mut path = BezPath::new();
        path.move_to(Point::new(4.0, 4.0));
        path.line_to(Point::new(12.0, 4.0));
        path.line_to(Point::new(12.0, 12.0));
        path.line_to(Point::new(4.0, 12.0));
        path.close_path();
        surface.fill_path(&path, Rgba::black());

        assert_eq!(surface.pixel(8, 8), Rgba::black());
        assert_eq!(surface.pixel(1, 1), Rgba::white());
    }

    #[test]
    fn test_rasterization_is_idempotent() {
        let points = [Point::new(2.0, 2.0), Point::new(20.0, 14.0)];

        let mut first = test_surface(24, 24);
        first.clear(Rgba::white());
        first.stroke_polyline(&points, 3.0, Rgba::black());

        let mut second = test_surface(24, 24);
        second.clear(Rgba::white());
        second.stroke_polyline(&points, 3.0, Rgba::black());

        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_png_encode_emits_signature() {
        let mut surface = test_surface(8, 8);
        surface.clear(Rgba::white());

        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
