//! Drag-select state shared by every tile on the board.

/// Pointer gesture state shared across all tiles of a grid.
///
/// The press that starts a gesture decides its polarity; every tile entered
/// while the button is held adopts that polarity instead of toggling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragGesture {
    pressed: bool,
    pending: bool,
}

impl DragGesture {
    /// Whether a pointer button is currently held over the board.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Selection value propagated by the current (or most recent) gesture.
    #[must_use]
    pub const fn pending_selection(&self) -> bool {
        self.pending
    }

    /// Selection value to force onto an entered tile, if a gesture is active.
    pub(crate) const fn propagated(&self) -> Option<bool> {
        if self.pressed {
            Some(self.pending)
        } else {
            None
        }
    }

    pub(crate) fn begin(&mut self, polarity: bool) {
        self.pressed = true;
        self.pending = polarity;
    }

    /// Ends the gesture, reporting whether one was active.
    pub(crate) fn end(&mut self) -> bool {
        let was_pressed = self.pressed;
        self.pressed = false;
        was_pressed
    }
}
