//! Inkpad Core Library
//!
//! Platform-agnostic data model and logic for the Inkpad sketch canvas:
//! marks (strokes and stickers), the linear undo/redo history, the pointer
//! interaction state machine and the drawing-surface boundary contract.

pub mod history;
pub mod marks;
pub mod session;
pub mod surface;

pub use history::History;
pub use marks::{Mark, MarkId, MarkTrait, Rgba, Sticker, Stroke};
pub use session::{InputSession, Session, Tool};
pub use surface::{DrawCommand, Recorder, Surface};
