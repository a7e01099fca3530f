//! Position within the active image list, with wrap-around stepping.

use crate::error::{SessionError, SessionResult};

/// Cursor over a list of `len` images.
///
/// `index < len` holds whenever `len > 0`. Stepping an empty cursor is a
/// silent no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Advance one image, wrapping from the last to the first.
    pub fn next(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
    }

    /// Step back one image, wrapping from the first to the last.
    pub fn previous(&mut self) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
    }

    /// Point at a new list of `len` images, starting from the first.
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.index = 0;
    }

    /// Jump to an absolute position.
    pub fn jump(&mut self, index: usize) -> SessionResult<()> {
        if index >= self.len {
            return Err(SessionError::image_not_found(format!(
                "#{} (list has {})",
                index + 1,
                self.len
            )));
        }
        self.index = index;
        Ok(())
    }

    /// Current position, or `None` when the list is empty.
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
