//! Memory surface: plain-text scrollback with a line viewport.
//!
//! The viewport works like the scroll buffer of a terminal: a fixed number
//! of visible lines and a top line. Growing the content does not move the
//! view; only [`TextSurface::scroll_to`] and the scroll helpers do.

use super::{SurfaceFlags, TextSurface};
use crate::error::{ConsoleError, Result};

/// Default number of visible lines.
const DEFAULT_VIEWPORT_LINES: usize = 24;

/// In-memory [`TextSurface`].
#[derive(Debug, Clone)]
pub struct MemorySurface {
    /// Content.
    text: String,
    /// Content length in characters.
    char_len: usize,
    /// Number of lines (newlines + 1).
    line_count: usize,
    /// Index of the first visible line.
    top_line: usize,
    /// Number of visible lines.
    viewport_lines: usize,
    /// Editable/dirty state.
    flags: SurfaceFlags,
}

impl MemorySurface {
    /// Create an empty, read-only surface with the default viewport.
    pub fn new() -> Self {
        Self::with_viewport(DEFAULT_VIEWPORT_LINES)
    }

    /// Create an empty, read-only surface showing `viewport_lines` lines.
    pub fn with_viewport(viewport_lines: usize) -> Self {
        Self {
            text: String::new(),
            char_len: 0,
            line_count: 1,
            top_line: 0,
            viewport_lines: viewport_lines.max(1),
            flags: SurfaceFlags::empty(),
        }
    }

    /// Borrow the content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines, counting the (possibly empty) last one.
    pub const fn line_count(&self) -> usize {
        self.line_count
    }

    /// Index of the first visible line.
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Number of visible lines.
    pub const fn viewport_lines(&self) -> usize {
        self.viewport_lines
    }

    /// Current state flags.
    pub const fn flags(&self) -> SurfaceFlags {
        self.flags
    }

    /// Resize the viewport.
    pub fn set_viewport_lines(&mut self, lines: usize) {
        self.viewport_lines = lines.max(1);
        self.clamp_view();
        self.flags.insert(SurfaceFlags::DIRTY);
    }

    /// Lines currently in view, top to bottom.
    pub fn visible_lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n').skip(self.top_line).take(self.viewport_lines)
    }

    /// Check if the last line is in view.
    pub const fn at_bottom(&self) -> bool {
        self.top_line >= self.max_top()
    }

    /// Scroll up by the given number of lines.
    pub fn scroll_up(&mut self, lines: usize) {
        self.set_top(self.top_line.saturating_sub(lines));
    }

    /// Scroll down by the given number of lines.
    pub fn scroll_down(&mut self, lines: usize) {
        self.set_top((self.top_line + lines).min(self.max_top()));
    }

    /// Mark the surface for a full repaint.
    pub fn invalidate(&mut self) {
        self.flags.insert(SurfaceFlags::DIRTY);
    }

    /// Return and reset the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        let dirty = self.flags.contains(SurfaceFlags::DIRTY);
        self.flags.remove(SurfaceFlags::DIRTY);
        dirty
    }

    /// Highest valid top line.
    const fn max_top(&self) -> usize {
        self.line_count.saturating_sub(self.viewport_lines)
    }

    fn set_top(&mut self, top: usize) {
        if top != self.top_line {
            self.top_line = top;
            self.flags.insert(SurfaceFlags::DIRTY);
        }
    }

    fn clamp_view(&mut self) {
        self.top_line = self.top_line.min(self.max_top());
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.flags.contains(SurfaceFlags::EDITABLE) {
            Ok(())
        } else {
            Err(ConsoleError::ReadOnly)
        }
    }

    /// Validate a `start..end` character range, resolving an open end.
    fn resolve(&self, start: usize, end: Option<usize>) -> Result<(usize, usize)> {
        let end = end.unwrap_or(self.char_len);
        if end > self.char_len {
            return Err(ConsoleError::OutOfRange {
                offset: end,
                len: self.char_len,
            });
        }
        if start > end {
            return Err(ConsoleError::OutOfRange {
                offset: start,
                len: self.char_len,
            });
        }
        Ok((start, end))
    }

    /// Convert a validated character offset into a byte offset.
    fn byte_offset(&self, offset: usize) -> usize {
        if offset >= self.char_len {
            return self.text.len();
        }
        // Offsets near the tail are the common case; walk from whichever end is closer.
        let found = if offset > self.char_len / 2 {
            self.text
                .char_indices()
                .rev()
                .nth(self.char_len - offset - 1)
        } else {
            self.text.char_indices().nth(offset)
        };
        found.map_or(self.text.len(), |(i, _)| i)
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSurface for MemorySurface {
    fn insert_end(&mut self, text: &str) -> Result<()> {
        self.ensure_editable()?;
        if text.is_empty() {
            return Ok(());
        }

        self.text.push_str(text);
        self.char_len += text.chars().count();
        self.line_count += text.matches('\n').count();
        self.flags.insert(SurfaceFlags::DIRTY);
        Ok(())
    }

    fn delete_range(&mut self, start: usize, end: Option<usize>) -> Result<()> {
        self.ensure_editable()?;
        let (start, end) = self.resolve(start, end)?;
        if start == end {
            return Ok(());
        }

        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        self.line_count -= self.text[from..to].matches('\n').count();
        self.text.replace_range(from..to, "");
        self.char_len -= end - start;
        self.clamp_view();
        self.flags.insert(SurfaceFlags::DIRTY);
        Ok(())
    }

    fn text_range(&self, start: usize, end: Option<usize>) -> Result<String> {
        let (start, end) = self.resolve(start, end)?;
        let (from, to) = (self.byte_offset(start), self.byte_offset(end));
        Ok(self.text[from..to].to_string())
    }

    fn char_count(&self) -> usize {
        self.char_len
    }

    #[allow(clippy::cast_precision_loss)]
    fn scroll_fraction(&self) -> f64 {
        if self.line_count <= self.viewport_lines {
            return 1.0;
        }
        let bottom = (self.top_line + self.viewport_lines).min(self.line_count);
        bottom as f64 / self.line_count as f64
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn scroll_to(&mut self, fraction: f64) -> Result<()> {
        let fraction = if fraction.is_nan() { 1.0 } else { fraction.clamp(0.0, 1.0) };
        let bottom = (fraction * self.line_count as f64).round() as usize;
        let top = bottom.saturating_sub(self.viewport_lines).min(self.max_top());
        self.set_top(top);
        Ok(())
    }

    fn set_editable(&mut self, editable: bool) {
        self.flags.set(SurfaceFlags::EDITABLE, editable);
    }

    fn is_editable(&self) -> bool {
        self.flags.contains(SurfaceFlags::EDITABLE)
    }

    fn contents(&self) -> Result<String> {
        Ok(self.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editable(viewport: usize) -> MemorySurface {
        let mut surface = MemorySurface::with_viewport(viewport);
        surface.set_editable(true);
        surface
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let mut surface = MemorySurface::new();
        assert!(matches!(surface.insert_end("x"), Err(ConsoleError::ReadOnly)));
        assert!(matches!(surface.delete_range(0, None), Err(ConsoleError::ReadOnly)));
        assert_eq!(surface.char_count(), 0);
    }

    #[test]
    fn test_insert_and_ranges_use_char_offsets() {
        let mut surface = editable(10);
        surface.insert_end("ab\u{2588}cd\nef").unwrap();

        assert_eq!(surface.char_count(), 8);
        assert_eq!(surface.line_count(), 2);
        assert_eq!(surface.text_range(2, Some(4)).unwrap(), "\u{2588}c");
        assert_eq!(surface.text_range(6, None).unwrap(), "ef");

        surface.delete_range(3, None).unwrap();
        assert_eq!(surface.text(), "ab\u{2588}");
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut surface = editable(10);
        surface.insert_end("abc").unwrap();

        assert!(matches!(
            surface.text_range(0, Some(9)),
            Err(ConsoleError::OutOfRange { offset: 9, len: 3 })
        ));
        assert!(matches!(
            surface.delete_range(3, Some(2)),
            Err(ConsoleError::OutOfRange { offset: 3, len: 3 })
        ));
    }

    #[test]
    fn test_growth_does_not_move_view() {
        let mut surface = editable(5);
        assert!((surface.scroll_fraction() - 1.0).abs() < f64::EPSILON);

        for i in 0..9 {
            surface.insert_end(&format!("line {i}\n")).unwrap();
        }
        // 10 lines, view still at the top
        assert_eq!(surface.top_line(), 0);
        assert!((surface.scroll_fraction() - 0.5).abs() < f64::EPSILON);

        surface.scroll_to_end().unwrap();
        assert!(surface.at_bottom());
        assert_eq!(surface.top_line(), 5);
        assert_eq!(surface.visible_lines().last(), Some(""));
    }

    #[test]
    fn test_scroll_helpers() {
        let mut surface = editable(3);
        surface.insert_end("0\n1\n2\n3\n4\n5").unwrap();
        surface.scroll_to_end().unwrap();
        assert_eq!(surface.top_line(), 3);

        surface.scroll_up(2);
        assert_eq!(surface.top_line(), 1);
        assert!(!surface.at_bottom());
        assert_eq!(surface.visible_lines().collect::<Vec<_>>(), ["1", "2", "3"]);

        surface.scroll_down(10);
        assert!(surface.at_bottom());
    }

    #[test]
    fn test_clear_resets_view() {
        let mut surface = editable(2);
        surface.insert_end("a\nb\nc\nd").unwrap();
        surface.scroll_to_end().unwrap();

        surface.clear_all().unwrap();
        assert_eq!(surface.top_line(), 0);
        assert_eq!(surface.line_count(), 1);
        assert!(surface.at_bottom());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut surface = editable(2);
        assert!(!surface.take_dirty());
        surface.insert_end("x").unwrap();
        assert!(surface.take_dirty());
        assert!(!surface.take_dirty());
    }
}
