//! Terminal surface: a [`MemorySurface`] painted onto a terminal.
//!
//! Mutations only touch the in-memory model. [`TextSurface::refresh`]
//! repaints the visible rows through crossterm when something changed,
//! queueing every command and flushing once.

use super::{MemorySurface, TextSurface};
use crate::error::Result;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use std::borrow::Cow;
use std::io::{self, Stdout, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Columns per tab stop.
const TAB_WIDTH: usize = 4;

/// A [`TextSurface`] that draws into a terminal region.
pub struct TerminalSurface<W: Write> {
    /// Content model.
    inner: MemorySurface,
    /// Output sink.
    out: W,
    /// Region width in columns.
    width: u16,
    /// First terminal row of the region.
    origin_y: u16,
}

impl TerminalSurface<Stdout> {
    /// Create a surface covering the whole terminal on stdout.
    pub fn stdout() -> Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::new(io::stdout(), width, height))
    }
}

impl<W: Write> TerminalSurface<W> {
    /// Create a surface of `width` x `height` cells at the top of `out`.
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            inner: MemorySurface::with_viewport(usize::from(height)),
            out,
            width,
            origin_y: 0,
        }
    }

    /// Move the region down to start at terminal row `y`.
    #[must_use]
    pub fn with_origin(mut self, y: u16) -> Self {
        self.origin_y = y;
        self.inner.invalidate();
        self
    }

    /// Resize the region.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.inner.set_viewport_lines(usize::from(height));
    }

    /// Borrow the content model.
    pub const fn model(&self) -> &MemorySurface {
        &self.inner
    }

    /// Mutable access to the content model, e.g. for user scrolling.
    pub fn model_mut(&mut self) -> &mut MemorySurface {
        &mut self.inner
    }

    /// Borrow the output sink.
    pub const fn writer(&self) -> &W {
        &self.out
    }

    /// Unwrap the output sink.
    pub fn into_writer(self) -> W {
        self.out
    }

    /// Paint every visible row, clearing rows without content.
    #[allow(clippy::cast_possible_truncation)]
    fn paint(&mut self) -> io::Result<()> {
        let width = usize::from(self.width);
        let rows = self.inner.viewport_lines();
        let mut lines = self.inner.visible_lines();

        for row in 0..rows {
            let y = self.origin_y.saturating_add(row as u16);
            queue!(self.out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
            if let Some(line) = lines.next() {
                let expanded = expand_line(line);
                queue!(self.out, Print(fit_width(&expanded, width)))?;
            }
        }

        self.out.flush()
    }
}

impl<W: Write> TextSurface for TerminalSurface<W> {
    fn insert_end(&mut self, text: &str) -> Result<()> {
        self.inner.insert_end(text)
    }

    fn delete_range(&mut self, start: usize, end: Option<usize>) -> Result<()> {
        self.inner.delete_range(start, end)
    }

    fn text_range(&self, start: usize, end: Option<usize>) -> Result<String> {
        self.inner.text_range(start, end)
    }

    fn char_count(&self) -> usize {
        self.inner.char_count()
    }

    fn scroll_fraction(&self) -> f64 {
        self.inner.scroll_fraction()
    }

    fn scroll_to(&mut self, fraction: f64) -> Result<()> {
        self.inner.scroll_to(fraction)
    }

    fn set_editable(&mut self, editable: bool) {
        self.inner.set_editable(editable);
    }

    fn is_editable(&self) -> bool {
        self.inner.is_editable()
    }

    fn refresh(&mut self) -> Result<()> {
        if self.inner.take_dirty() {
            self.paint()?;
        }
        Ok(())
    }

    fn contents(&self) -> Result<String> {
        self.inner.contents()
    }
}

/// Expand tabs and replace vertical tab / form feed with spaces.
fn expand_line(line: &str) -> Cow<'_, str> {
    if !line.contains(['\t', '\x0b', '\x0c']) {
        return Cow::Borrowed(line);
    }

    let mut out = String::with_capacity(line.len() + TAB_WIDTH);
    let mut col = 0;
    for grapheme in line.graphemes(true) {
        match grapheme {
            "\t" => {
                let spaces = TAB_WIDTH - (col % TAB_WIDTH);
                out.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            }
            "\x0b" | "\x0c" => {
                out.push(' ');
                col += 1;
            }
            _ => {
                out.push_str(grapheme);
                col += UnicodeWidthStr::width(grapheme);
            }
        }
    }
    Cow::Owned(out)
}

/// Longest prefix of `line` that fits in `width` columns.
fn fit_width(line: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, grapheme) in line.grapheme_indices(true) {
        let w = UnicodeWidthStr::width(grapheme);
        if used + w > width {
            return &line[..idx];
        }
        used += w;
    }
    line
}
