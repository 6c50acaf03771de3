//! Carriage-return emulation at line granularity.
//!
//! A terminal moves the cursor back to column zero on `\r` and the next text
//! overwrites the line. A text surface can only append and delete, so the
//! whole current line is replaced instead. This is what progress bars rely
//! on: a stream of `\r`-separated updates collapses into a single line while
//! `\n`-terminated lines stay in the scrollback.
//!
//! The state machine tracks where the current line starts, so no rescanning
//! of the surface is needed on the hot path:
//!
//! ```text
//!                 \r
//!   Committed ─────────▶ Pending ──┐ \r
//!       ▲                   │  ◀───┘
//!       └───────────────────┘
//!   text (line replaced) or \n (line kept)
//! ```

use crate::error::Result;
use crate::surface::TextSurface;

/// Carriage-return state for one surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarriageReturn {
    /// Char offset of the first character after the last `\n`.
    line_start: usize,
    /// A `\r` was seen and the current line has not been overwritten yet.
    pending: bool,
    /// Surface length after our last write. A mismatch means the surface
    /// changed behind our back and `line_start` must be recomputed.
    expected_len: usize,
}

impl CarriageReturn {
    /// Create the state for an empty surface.
    pub const fn new() -> Self {
        Self {
            line_start: 0,
            pending: false,
            expected_len: 0,
        }
    }

    /// Char offset where the current line starts.
    pub const fn line_start(&self) -> usize {
        self.line_start
    }

    /// Check if the current line will be replaced by the next text.
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Forget everything; call after the surface was erased.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Append `text`, resolving carriage returns against the current line.
    pub fn write_text<S: TextSurface + ?Sized>(&mut self, surface: &mut S, text: &str) -> Result<()> {
        self.resync(surface)?;

        let mut segments = text.split('\r').peekable();
        while let Some(segment) = segments.next() {
            self.append_segment(surface, segment)?;
            if segments.peek().is_some() {
                self.pending = true;
            }
        }

        Ok(())
    }

    /// Append one `\r`-free segment.
    fn append_segment<S: TextSurface + ?Sized>(&mut self, surface: &mut S, segment: &str) -> Result<()> {
        if segment.is_empty() {
            return Ok(());
        }

        if self.pending {
            // Text before the first newline replaces the line; a bare newline commits it.
            let overwrites = !segment.starts_with('\n');
            if overwrites {
                surface.delete_range(self.line_start, None)?;
            }
            self.pending = false;
        }

        surface.insert_end(segment)?;
        let len = surface.char_count();

        if let Some(idx) = segment.rfind('\n') {
            let tail = segment[idx + 1..].chars().count();
            self.line_start = len - tail;
        }
        self.expected_len = len;

        Ok(())
    }

    /// Recompute `line_start` if the surface no longer matches our record.
    fn resync<S: TextSurface + ?Sized>(&mut self, surface: &S) -> Result<()> {
        let len = surface.char_count();
        if len == self.expected_len && self.line_start <= len {
            return Ok(());
        }

        let contents = surface.contents()?;
        self.line_start = contents
            .rfind('\n')
            .map_or(0, |idx| contents[..=idx].chars().count());
        self.pending = false;
        self.expected_len = len;
        log::trace!("carriage return state resynced, line starts at {}", self.line_start);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    fn render(chunks: &[&str]) -> String {
        let mut surface = MemorySurface::new();
        surface.set_editable(true);
        let mut cr = CarriageReturn::new();
        for chunk in chunks {
            cr.write_text(&mut surface, chunk).unwrap();
        }
        surface.text().to_string()
    }

    #[test]
    fn test_overwrite_within_chunk() {
        assert_eq!(render(&["progress 10%\rprogress 20%\n"]), "progress 20%\n");
    }

    #[test]
    fn test_overwrite_across_chunks() {
        assert_eq!(render(&["\r 10%", "\r 20%", "\r 30%", "\n"]), " 30%\n");
        assert_eq!(render(&["10%\r", "20%\r", "30%\r", "done\n"]), "done\n");
    }

    #[test]
    fn test_completed_lines_are_kept() {
        let out = render(&["first\n", "\rstep 1", "\rstep 2\n", "last\n"]);
        assert_eq!(out, "first\nstep 2\nlast\n");
    }

    #[test]
    fn test_crlf_commits_line() {
        assert_eq!(render(&["one\r\ntwo\r\n"]), "one\ntwo\n");
        assert_eq!(render(&["one\r", "\ntwo"]), "one\ntwo");
    }

    #[test]
    fn test_repeated_returns() {
        assert_eq!(render(&["abc\r\r\rxyz"]), "xyz");
        assert_eq!(render(&["abc\r\r"]), "abc");
    }

    #[test]
    fn test_overwrite_then_more_lines() {
        let out = render(&["a\rb\nc\rd\ne"]);
        assert_eq!(out, "b\nd\ne");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(render(&["no returns\n", "here"]), "no returns\nhere");
    }

    #[test]
    fn test_state_tracking() {
        let mut surface = MemorySurface::new();
        surface.set_editable(true);
        let mut cr = CarriageReturn::new();

        cr.write_text(&mut surface, "ab\ncd\r").unwrap();
        assert_eq!(cr.line_start(), 3);
        assert!(cr.is_pending());

        cr.write_text(&mut surface, "\n").unwrap();
        assert_eq!(cr.line_start(), 6);
        assert!(!cr.is_pending());
    }

    #[test]
    fn test_resync_after_external_change() {
        let mut surface = MemorySurface::new();
        surface.set_editable(true);
        surface.insert_end("kept\nold").unwrap();

        let mut cr = CarriageReturn::new();
        cr.write_text(&mut surface, "\rnew").unwrap();
        assert_eq!(surface.text(), "kept\nnew");

        surface.delete_range(0, None).unwrap();
        surface.insert_end("x\ny\nz").unwrap();
        cr.write_text(&mut surface, "\rw").unwrap();
        assert_eq!(surface.text(), "x\ny\nw");
    }

    #[test]
    fn test_multibyte_offsets() {
        let out = render(&["\u{2588}\u{2588}\n[\u{2588}  ]\r", "[\u{2588}\u{2588} ]"]);
        assert_eq!(out, "\u{2588}\u{2588}\n[\u{2588}\u{2588} ]");
    }

    /// Feed the same output to a VT100 emulator and compare the screens.
    ///
    /// Updates never shrink, so line-level replacement and the terminal's
    /// column-level overwrite must agree.
    #[test]
    fn test_matches_vt100_for_growing_updates() {
        let chunks = [
            "Downloading\n",
            "\r[#         ] 10%",
            "\r[###       ] 30%",
            "\r[##########] 100%\n",
            "epoch 1: loss 0.9\r",
            "epoch 1: loss 0.52\r",
            "epoch 1: loss 0.417\n",
            "Done\n",
        ];

        let mut parser = vt100::Parser::new(24, 80, 0);
        for chunk in chunks {
            parser.process(chunk.replace('\n', "\r\n").as_bytes());
        }
        let mut expected: Vec<String> = parser
            .screen()
            .rows(0, 80)
            .map(|row| row.trim_end().to_string())
            .collect();
        while expected.last().is_some_and(String::is_empty) {
            expected.pop();
        }

        let rendered = render(&chunks);
        let mut actual: Vec<String> = rendered.split('\n').map(|l| l.trim_end().to_string()).collect();
        while actual.last().is_some_and(String::is_empty) {
            actual.pop();
        }

        assert_eq!(actual, expected);
    }
}
