//! Freehand stroke mark.

use super::{MarkId, MarkTrait, Rgba};
use crate::surface::Surface;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A freehand polyline mark with width and color.
///
/// Points are append-only while the stroke is the active drag; nothing in
/// this crate mutates a stroke after it has been committed to history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: MarkId,
    /// Points in draw order.
    pub points: Vec<Point>,
    /// Stroke width in surface pixels.
    pub thickness: f64,
    /// Stroke color.
    pub color: Rgba,
}

impl Stroke {
    /// Create a new stroke seeded with its start point.
    pub fn new(start: Point, thickness: f64, color: Rgba) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![start],
            thickness,
            color,
        }
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, thickness: f64, color: Rgba) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            thickness,
            color,
        }
    }

    /// Append a point to the path. Only meaningful while the stroke is in
    /// progress.
    pub fn extend(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl MarkTrait for Stroke {
    fn id(&self) -> MarkId {
        self.id
    }

    fn bounds(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::ZERO;
        }

        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;

        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }

        Rect::new(min_x, min_y, max_x, max_y).inflate(self.thickness / 2.0, self.thickness / 2.0)
    }

    fn render(&self, surface: &mut dyn Surface) {
        if self.points.is_empty() {
            return;
        }
        // A single-point stroke is a zero-length polyline; the surface's
        // round caps turn it into a visible dot of diameter `thickness`.
        surface.stroke_polyline(&self.points, self.thickness, self.color);
    }

    fn transform(&mut self, affine: Affine) {
        for point in &mut self.points {
            *point = affine * *point;
        }
        // Scale the width under uniform scaling so exports keep proportions.
        let coeffs = affine.as_coeffs();
        let scale = (coeffs[0].abs() + coeffs[3].abs()) / 2.0;
        if (scale - 1.0).abs() > 0.01 {
            self.thickness *= scale;
        }
    }
}
