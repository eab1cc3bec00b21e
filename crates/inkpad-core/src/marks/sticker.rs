//! Glyph sticker mark.

use super::{MarkId, MarkTrait, Rgba};
use crate::surface::Surface;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A positioned, optionally rotated glyph mark.
///
/// The position follows the pointer while the sticker is the active drag
/// and is fixed once the sticker is committed to history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sticker {
    pub(crate) id: MarkId,
    /// The glyph to stamp (usually a single emoji).
    pub glyph: String,
    /// Center of the glyph on the surface.
    pub position: Point,
    /// Rotation in degrees about `position` (0 = upright).
    #[serde(default)]
    pub rotation: f64,
    /// Em size the glyph is drawn at.
    pub size: f64,
    /// Fill color for outline glyphs.
    pub color: Rgba,
}

impl Sticker {
    /// Default em size for new stickers.
    pub const DEFAULT_SIZE: f64 = 32.0;

    /// Create a new sticker at the given position.
    pub fn new(glyph: impl Into<String>, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            glyph: glyph.into(),
            position,
            rotation: 0.0,
            size: Self::DEFAULT_SIZE,
            color: Rgba::black(),
        }
    }

    /// Set the rotation in degrees.
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Set the em size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the fill color.
    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Move the sticker. Only meaningful while the sticker is in progress.
    pub fn reposition(&mut self, position: Point) {
        self.position = position;
    }
}

impl MarkTrait for Sticker {
    fn id(&self) -> MarkId {
        self.id
    }

    fn bounds(&self) -> Rect {
        // Approximate: a centered square with the em size as its side,
        // inflated to cover any rotation.
        let half = self.size / 2.0 * std::f64::consts::SQRT_2;
        Rect::new(
            self.position.x - half,
            self.position.y - half,
            self.position.x + half,
            self.position.y + half,
        )
    }

    fn render(&self, surface: &mut dyn Surface) {
        surface.fill_glyph(&self.glyph, self.position, self.size, self.rotation, self.color);
    }

    fn transform(&mut self, affine: Affine) {
        self.position = affine * self.position;
        // Scale the em size under uniform scaling (rotation is kept as-is).
        let coeffs = affine.as_coeffs();
        let scale = (coeffs[0].abs() + coeffs[3].abs()) / 2.0;
        if (scale - 1.0).abs() > 0.01 {
            self.size *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    #[test]
    fn test_sticker_creation() {
        let sticker = Sticker::new("⭐", Point::new(50.0, 60.0));
        assert_eq!(sticker.glyph, "⭐");
        assert!((sticker.rotation).abs() < f64::EPSILON);
        assert!((sticker.size - Sticker::DEFAULT_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reposition_moves_center() {
        let mut sticker = Sticker::new("⭐", Point::new(0.0, 0.0));
        sticker.reposition(Point::new(25.0, 30.0));
        assert_eq!(sticker.position, Point::new(25.0, 30.0));
    }

    #[test]
    fn test_render_emits_glyph_command() {
        let sticker = Sticker::new("🙂", Point::new(10.0, 20.0)).with_rotation(45.0);

        let mut recorder = Recorder::new();
        sticker.render(&mut recorder);

        assert_eq!(
            recorder.commands(),
            &[DrawCommand::Glyph {
                glyph: "🙂".to_string(),
                center: Point::new(10.0, 20.0),
                size: Sticker::DEFAULT_SIZE,
                rotation: 45.0,
                color: Rgba::black(),
            }]
        );
    }

    #[test]
    fn test_transform_scales_position_and_size() {
        let mut sticker = Sticker::new("⭐", Point::new(10.0, 10.0)).with_size(32.0);
        sticker.transform(Affine::scale(4.0));

        assert_eq!(sticker.position, Point::new(40.0, 40.0));
        assert!((sticker.size - 128.0).abs() < f64::EPSILON);
    }
}
