//! The drawing-surface boundary contract.

use crate::marks::Rgba;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A 2D raster target that marks render onto.
///
/// Concrete rasterizing implementations live outside this crate (see the
/// render crate's software surface); [`Recorder`] below is a display-list
/// implementation for replay-order tests and headless embeddings.
pub trait Surface {
    /// Clear the whole surface to an opaque fill.
    fn clear(&mut self, color: Rgba);

    /// Stroke a polyline through `points` in order with round caps and
    /// joins. A single point is a zero-length polyline; round caps turn it
    /// into a dot of diameter `width`.
    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba);

    /// Draw `glyph` centered at `center` at em size `size`, rotated
    /// `rotation` degrees about `center` (0 = upright).
    fn fill_glyph(&mut self, glyph: &str, center: Point, size: f64, rotation: f64, color: Rgba);
}

/// A single recorded surface operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: Rgba,
    },
    Glyph {
        glyph: String,
        center: Point,
        size: f64,
        rotation: f64,
        color: Rgba,
    },
}

/// A surface that records draw commands instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands recorded so far, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for Recorder {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear { color });
    }

    fn stroke_polyline(&mut self, points: &[Point], width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_glyph(&mut self, glyph: &str, center: Point, size: f64, rotation: f64, color: Rgba) {
        self.commands.push(DrawCommand::Glyph {
            glyph: glyph.to_string(),
            center,
            size,
            rotation,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_draw_order() {
        let mut recorder = Recorder::new();
        recorder.clear(Rgba::white());
        recorder.stroke_polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], 2.0, Rgba::black());
        recorder.fill_glyph("*", Point::new(5.0, 5.0), 32.0, 0.0, Rgba::black());

        assert_eq!(recorder.commands().len(), 3);
        assert!(matches!(recorder.commands()[0], DrawCommand::Clear { .. }));
        assert!(matches!(recorder.commands()[2], DrawCommand::Glyph { .. }));
    }

    #[test]
    fn test_take_empties_recorder() {
        let mut recorder = Recorder::new();
        recorder.clear(Rgba::white());

        let commands = recorder.take();
        assert_eq!(commands.len(), 1);
        assert!(recorder.commands().is_empty());
    }
}
