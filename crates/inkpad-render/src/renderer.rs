//! Replay renderer over the surface boundary.

use inkpad_core::marks::{Mark, Rgba};
use inkpad_core::surface::Surface;
use thiserror::Error;

/// Render and export errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing surface could not be acquired. Fatal at startup.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),
    /// Export encoding failed; the attempt is abandoned with no partial
    /// output and may be retried by re-invoking.
    #[error("encode failed: {0}")]
    EncodeFailed(String),
    /// Writing the exported file failed.
    #[error("save failed: {0}")]
    SaveFailed(#[from] std::io::Error),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Replays the committed marks (plus the live one) onto a surface.
#[derive(Debug, Clone)]
pub struct Renderer {
    /// Opaque background color, baked into every frame and export.
    pub background: Rgba,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            background: Rgba::white(),
        }
    }
}

impl Renderer {
    /// Create a renderer with a white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the background color.
    pub fn with_background(mut self, color: impl Into<Rgba>) -> Self {
        self.background = color.into();
        self
    }

    /// Redraw the full surface from scratch.
    ///
    /// Clears to the opaque background, replays `marks` oldest first so
    /// later marks draw on top, then draws the live in-progress mark above
    /// everything. The same inputs always produce the same output.
    pub fn render(&self, surface: &mut dyn Surface, marks: &[Mark], live: Option<&Mark>) {
        surface.clear(self.background);
        for mark in marks {
            mark.render(surface);
        }
        if let Some(mark) = live {
            mark.render(surface);
        }
    }
}
