//! Inkpad Render Library
//!
//! Replays the committed drawing onto a surface, provides a CPU raster
//! surface implementation and PNG export.

mod export;
mod glyphs;
mod raster;
mod renderer;

pub use export::Exporter;
pub use glyphs::GlyphLibrary;
pub use raster::RasterSurface;
pub use renderer::{RenderError, RenderResult, Renderer};
