//! Pointer interaction state machine and per-session state.

use crate::history::History;
use crate::marks::{Mark, Rgba, Sticker, Stroke};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// The active tool descriptor supplied by the embedding UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand marker with a pen width and color.
    Marker { thickness: f64, color: Rgba },
    /// Glyph sticker stamp with a preset rotation.
    Sticker {
        glyph: String,
        rotation: f64,
        size: f64,
        color: Rgba,
    },
}

impl Tool {
    /// A marker tool with the given width, drawing in black.
    pub fn marker(thickness: f64) -> Self {
        Tool::Marker {
            thickness,
            color: Rgba::black(),
        }
    }

    /// A sticker tool for the given glyph at the default size, upright.
    pub fn sticker(glyph: impl Into<String>) -> Self {
        Tool::Sticker {
            glyph: glyph.into(),
            rotation: 0.0,
            size: Sticker::DEFAULT_SIZE,
            color: Rgba::black(),
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Tool::marker(1.0)
    }
}

/// Tracks one pointer interaction from start to end.
///
/// Idle until [`begin`](Self::begin); while active the in-progress mark
/// follows the pointer via [`update`](Self::update); [`end`](Self::end)
/// hands the mark back for committing and returns to idle.
#[derive(Debug, Clone, Default)]
pub struct InputSession {
    tool: Tool,
    active: Option<Mark>,
}

impl InputSession {
    /// Create an idle input session with the default tool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tool used by the *next* interaction. Never cancels or
    /// alters an interaction already in progress.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Get the current tool.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Check if a pointer interaction is active.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The in-progress mark, if any.
    pub fn live_mark(&self) -> Option<&Mark> {
        self.active.as_ref()
    }

    /// Start an interaction at `point` with the current tool.
    ///
    /// A second begin while already active is ignored; the event source
    /// serializes interactions, so this only happens on inconsistent input.
    pub fn begin(&mut self, point: Point) {
        if self.active.is_some() {
            log::debug!("interaction start while already active; ignored");
            return;
        }
        let mark = match &self.tool {
            Tool::Marker { thickness, color } => {
                Mark::Stroke(Stroke::new(point, *thickness, *color))
            }
            Tool::Sticker {
                glyph,
                rotation,
                size,
                color,
            } => Mark::Sticker(
                Sticker::new(glyph.clone(), point)
                    .with_rotation(*rotation)
                    .with_size(*size)
                    .with_color(*color),
            ),
        };
        self.active = Some(mark);
    }

    /// Move the in-progress mark: extend the stroke or reposition the
    /// sticker. No-op while idle.
    pub fn update(&mut self, point: Point) {
        match &mut self.active {
            Some(Mark::Stroke(stroke)) => stroke.extend(point),
            Some(Mark::Sticker(sticker)) => sticker.reposition(point),
            None => {}
        }
    }

    /// Finish the interaction and hand back the mark for committing.
    pub fn end(&mut self) -> Option<Mark> {
        self.active.take()
    }
}

/// Explicit owner of all per-session state: the history and the input
/// machine.
///
/// The embedding UI forwards pointer events and history verbs here and
/// re-renders whenever [`take_dirty`](Self::take_dirty) reports a change.
/// All mutations run to completion inside these handlers, one at a time,
/// in arrival order.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub history: History,
    pub input: InputSession,
    dirty: bool,
}

impl Session {
    /// Create a fresh session with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the tool for the next interaction.
    pub fn set_tool(&mut self, tool: Tool) {
        self.input.set_tool(tool);
    }

    /// Pointer pressed on the surface.
    pub fn pointer_down(&mut self, point: Point) {
        self.input.begin(point);
        self.dirty = true;
    }

    /// Pointer moved. Only changes anything while an interaction is active.
    pub fn pointer_move(&mut self, point: Point) {
        if self.input.is_active() {
            self.input.update(point);
            self.dirty = true;
        }
    }

    /// Pointer released: commit the in-progress mark.
    pub fn pointer_up(&mut self) {
        if let Some(mark) = self.input.end() {
            self.history.commit(mark);
            self.dirty = true;
        }
    }

    /// Pointer left the surface mid-drag. Treated exactly like a release:
    /// what exists so far is committed, there is no abort path.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Undo the most recent mark, if any.
    pub fn undo(&mut self) {
        if self.history.undo() {
            self.dirty = true;
        }
    }

    /// Redo the most recently undone mark, if any.
    pub fn redo(&mut self) {
        if self.history.redo() {
            self.dirty = true;
        }
    }

    /// Wipe the drawing and the redo stack.
    pub fn clear(&mut self) {
        self.history.clear();
        self.dirty = true;
    }

    /// Committed marks, oldest first.
    pub fn marks(&self) -> &[Mark] {
        self.history.marks()
    }

    /// The in-progress mark that draws on top of everything.
    pub fn live_mark(&self) -> Option<&Mark> {
        self.input.live_mark()
    }

    /// True when the visible output changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
