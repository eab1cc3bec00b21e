//! Glyph outline lookup backed by fontdb.

use kurbo::{BezPath, Point};
use rustybuzz::ttf_parser::OutlineBuilder;

/// Finds a face that covers a glyph and extracts its outline as a Bezier
/// path.
///
/// Outline extraction works for regular vector faces; color-only emoji
/// faces expose no outlines and resolve to `None`, which callers treat as
/// a skipped draw.
pub struct GlyphLibrary {
    db: fontdb::Database,
}

impl GlyphLibrary {
    /// Load the fonts installed on the system.
    pub fn from_system_fonts() -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("glyph library loaded {} font faces", db.len());
        Self { db }
    }

    /// An empty library; every lookup misses. Useful for headless tests.
    pub fn empty() -> Self {
        Self {
            db: fontdb::Database::new(),
        }
    }

    /// Add an in-memory font (e.g. an embedded emoji font).
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
    }

    /// Outline of the first character of `glyph` in font units (y-up),
    /// together with the face's units-per-em. Scans loaded faces in order
    /// and takes the first one that covers the character.
    pub fn outline(&self, glyph: &str) -> Option<(BezPath, f64)> {
        let ch = glyph.chars().next()?;
        let ids: Vec<fontdb::ID> = self.db.faces().map(|info| info.id).collect();
        for id in ids {
            let outlined = self.db.with_face_data(id, |data, index| {
                let face = rustybuzz::Face::from_slice(data, index)?;
                let glyph_id = face.as_ref().glyph_index(ch)?;
                let mut builder = PathBuilder::default();
                face.as_ref().outline_glyph(glyph_id, &mut builder)?;
                Some((builder.path, f64::from(face.as_ref().units_per_em())))
            });
            if let Some(Some(found)) = outlined {
                return Some(found);
            }
        }
        None
    }
}

impl std::fmt::Debug for GlyphLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphLibrary")
            .field("faces", &self.db.len())
            .finish()
    }
}

/// Collects ttf-parser outline callbacks into a kurbo path.
#[derive(Default)]
struct PathBuilder {
    path: BezPath,
}

impl OutlineBuilder for PathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to(Point::new(f64::from(x), f64::from(y)));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to(Point::new(f64::from(x), f64::from(y)));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to(
            Point::new(f64::from(x1), f64::from(y1)),
            Point::new(f64::from(x), f64::from(y)),
        );
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path.curve_to(
            Point::new(f64::from(x1), f64::from(y1)),
            Point::new(f64::from(x2), f64::from(y2)),
            Point::new(f64::from(x), f64::from(y)),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_library_misses_every_glyph() {
        let library = GlyphLibrary::empty();
        assert!(library.outline("A").is_none());
        assert!(library.outline("🙂").is_none());
    }

    #[test]
    fn test_outline_of_empty_string_is_none() {
        let library = GlyphLibrary::from_system_fonts();
        assert!(library.outline("").is_none());
    }
}
