//! Surfaces: the text display the console renders into.
//!
//! The host UI owns the real widget; the console only needs the handful of
//! operations in [`TextSurface`]. Two implementations ship with the crate:
//!
//! - [`MemorySurface`]: an in-memory text buffer with a line viewport
//! - [`TerminalSurface`]: a `MemorySurface` painted onto a terminal
//!
//! All offsets are character offsets, never byte offsets.

mod memory;
mod terminal;

pub use memory::MemorySurface;
pub use terminal::TerminalSurface;

use crate::error::Result;
use bitflags::bitflags;

bitflags! {
    /// Surface state flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SurfaceFlags: u8 {
        /// Mutations are accepted
        const EDITABLE = 0b0000_0001;
        /// Content or viewport changed since the last refresh
        const DIRTY = 0b0000_0010;
    }
}

impl std::fmt::Debug for SurfaceFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A scrollback text display owned by the UI thread.
///
/// Implementations are expected to reject mutations while read-only; the
/// renderer brackets every write with [`set_editable`](Self::set_editable).
pub trait TextSurface {
    /// Append text at the end.
    fn insert_end(&mut self, text: &str) -> Result<()>;

    /// Delete characters in `start..end`; `None` means to the end.
    fn delete_range(&mut self, start: usize, end: Option<usize>) -> Result<()>;

    /// Read characters in `start..end`; `None` means to the end.
    fn text_range(&self, start: usize, end: Option<usize>) -> Result<String>;

    /// Total length in characters.
    fn char_count(&self) -> usize;

    /// Vertical scroll position: the bottom edge of the view as a fraction
    /// of the content, in `[0.0, 1.0]`. `1.0` means the end is visible.
    fn scroll_fraction(&self) -> f64;

    /// Move the view so its bottom edge sits at `fraction`.
    fn scroll_to(&mut self, fraction: f64) -> Result<()>;

    /// Toggle between editable and read-only.
    fn set_editable(&mut self, editable: bool);

    /// Check whether the surface currently accepts mutations.
    fn is_editable(&self) -> bool;

    /// Scroll so the end of the content is visible.
    fn scroll_to_end(&mut self) -> Result<()> {
        self.scroll_to(1.0)
    }

    /// Process pending redraw and layout work.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    /// Delete everything.
    fn clear_all(&mut self) -> Result<()> {
        self.delete_range(0, None)
    }

    /// Read the whole content.
    fn contents(&self) -> Result<String> {
        self.text_range(0, None)
    }
}

impl<S: TextSurface + ?Sized> TextSurface for Box<S> {
    fn insert_end(&mut self, text: &str) -> Result<()> {
        (**self).insert_end(text)
    }

    fn delete_range(&mut self, start: usize, end: Option<usize>) -> Result<()> {
        (**self).delete_range(start, end)
    }

    fn text_range(&self, start: usize, end: Option<usize>) -> Result<String> {
        (**self).text_range(start, end)
    }

    fn char_count(&self) -> usize {
        (**self).char_count()
    }

    fn scroll_fraction(&self) -> f64 {
        (**self).scroll_fraction()
    }

    fn scroll_to(&mut self, fraction: f64) -> Result<()> {
        (**self).scroll_to(fraction)
    }

    fn set_editable(&mut self, editable: bool) {
        (**self).set_editable(editable);
    }

    fn is_editable(&self) -> bool {
        (**self).is_editable()
    }

    fn scroll_to_end(&mut self) -> Result<()> {
        (**self).scroll_to_end()
    }

    fn refresh(&mut self) -> Result<()> {
        (**self).refresh()
    }

    fn clear_all(&mut self) -> Result<()> {
        (**self).clear_all()
    }

    fn contents(&self) -> Result<String> {
        (**self).contents()
    }
}
