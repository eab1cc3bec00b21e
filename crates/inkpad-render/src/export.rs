//! One-shot PNG export of the committed drawing.

use crate::raster::RasterSurface;
use crate::renderer::{RenderResult, Renderer};
use inkpad_core::marks::Mark;
use kurbo::Affine;
use std::path::Path;

/// Exports the drawing as an upscaled PNG with the background baked in.
///
/// Export is a one-shot, unacknowledged operation: a failed attempt has no
/// side effects on the session and the only retry is re-invoking it.
#[derive(Debug, Clone)]
pub struct Exporter {
    /// Upscale factor applied to the whole drawing.
    pub scale: u32,
    /// Renderer carrying the baked-in background.
    pub renderer: Renderer,
}

impl Exporter {
    /// Default upscale factor.
    pub const DEFAULT_SCALE: u32 = 4;

    /// Create an exporter with the default 4x upscale and white background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the upscale factor.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Render `marks` at `base_width` x `base_height` times the upscale
    /// factor and encode the result as PNG bytes.
    pub fn export_png(
        &self,
        marks: &[Mark],
        base_width: u32,
        base_height: u32,
    ) -> RenderResult<Vec<u8>> {
        let mut surface = RasterSurface::new(base_width * self.scale, base_height * self.scale)?;

        let upscale = Affine::scale(f64::from(self.scale));
        let scaled: Vec<Mark> = marks
            .iter()
            .cloned()
            .map(|mut mark| {
                mark.transform(upscale);
                mark
            })
            .collect();

        self.renderer.render(&mut surface, &scaled, None);
        let bytes = surface.encode_png()?;
        log::info!(
            "exported {}x{} PNG ({} bytes)",
            surface.width(),
            surface.height(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Export straight to a file: the fire-and-forget save path.
    pub fn export_to_file(
        &self,
        marks: &[Mark],
        base_width: u32,
        base_height: u32,
        path: &Path,
    ) -> RenderResult<()> {
        let bytes = self.export_png(marks, base_width, base_height)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self {
            scale: Self::DEFAULT_SCALE,
            renderer: Renderer::new(),
        }
    }
}
