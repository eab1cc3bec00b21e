//! Mark definitions for the sketch canvas.

mod sticker;
mod stroke;

pub use sticker::Sticker;
pub use stroke::Stroke;

use crate::surface::Surface;
use kurbo::{Affine, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<Rgba> for Color {
    fn from(color: Rgba) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Unique identifier for marks.
pub type MarkId = Uuid;

/// Common trait for all marks.
pub trait MarkTrait {
    /// Get the unique identifier.
    fn id(&self) -> MarkId;

    /// Get the bounding box in surface coordinates.
    fn bounds(&self) -> Rect;

    /// Draw this mark onto a surface from its own stored geometry and
    /// style; no external state is read.
    fn render(&self, surface: &mut dyn Surface);

    /// Apply a transform to this mark.
    fn transform(&mut self, affine: Affine);
}

/// Enum wrapper for all mark types (for serialization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Mark {
    Stroke(Stroke),
    Sticker(Sticker),
}

impl Mark {
    pub fn id(&self) -> MarkId {
        match self {
            Mark::Stroke(m) => m.id(),
            Mark::Sticker(m) => m.id(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Mark::Stroke(m) => m.bounds(),
            Mark::Sticker(m) => m.bounds(),
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        match self {
            Mark::Stroke(m) => m.render(surface),
            Mark::Sticker(m) => m.render(surface),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Mark::Stroke(m) => m.transform(affine),
            Mark::Sticker(m) => m.transform(affine),
        }
    }

    /// Check if this mark is a stroke.
    pub fn is_stroke(&self) -> bool {
        matches!(self, Mark::Stroke(_))
    }

    /// Get the stroke if this mark is a stroke.
    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            Mark::Stroke(s) => Some(s),
            _ => None,
        }
    }

    /// Get the sticker if this mark is a sticker.
    pub fn as_sticker(&self) -> Option<&Sticker> {
        match self {
            Mark::Sticker(s) => Some(s),
            _ => None,
        }
    }
}
