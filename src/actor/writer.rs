//! Producer handle: the thread-safe write side of a console.

use crate::queue::{Entry, OutputQueue, Sanitizer};
use std::fmt;
use std::io;
use std::sync::Arc;

/// State shared by every writer of one console.
#[derive(Debug, Default)]
pub(crate) struct Shared {
    pub(crate) queue: OutputQueue,
    pub(crate) sanitizer: Sanitizer,
}

/// Cloneable, `Send + Sync` handle for worker threads.
///
/// Writers only ever touch the queue; the surface stays with the
/// [`Console`](super::Console) on the UI thread. Implements [`io::Write`] and
/// [`fmt::Write`] so it can stand in wherever a text stream is expected.
#[derive(Debug)]
pub struct ConsoleWriter {
    shared: Arc<Shared>,
    /// Incomplete UTF-8 sequence left over from the last `io::Write::write`.
    partial: Vec<u8>,
}

impl ConsoleWriter {
    pub(crate) const fn new(shared: Arc<Shared>) -> Self {
        Self {
            shared,
            partial: Vec::new(),
        }
    }

    pub(crate) fn queue(&self) -> &OutputQueue {
        &self.shared.queue
    }

    /// Sanitize `text` and queue what survives.
    ///
    /// Returns `true` if an entry was queued.
    pub fn write(&self, text: &str) -> bool {
        match self.shared.sanitizer.sanitize(text) {
            Some(clean) => {
                self.shared.queue.push(Entry::Text(clean));
                true
            }
            None => false,
        }
    }

    /// Write `text` followed by a newline.
    pub fn write_line(&self, text: &str) -> bool {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write(&line)
    }

    /// Queue an erase of the display, ordered after everything written so far.
    pub fn clear(&self) {
        self.shared.queue.push(Entry::Clear);
    }

    /// No-op; output is delivered by the drain loop.
    pub const fn flush(&self) {}

    /// Check if nothing is waiting to be drained. Only a hint under
    /// concurrent writes.
    pub fn buffer_empty(&self) -> bool {
        self.shared.queue.is_empty()
    }

    /// Drop everything not yet drained. Unlike [`clear`](Self::clear) this
    /// leaves the display alone.
    pub fn clear_buffer(&self) {
        self.shared.queue.replace();
    }
}

impl Clone for ConsoleWriter {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.shared))
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = take_utf8(&mut self.partial, buf);
        if !text.is_empty() {
            ConsoleWriter::write(self, &text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        ConsoleWriter::flush(self);
        Ok(())
    }
}

impl fmt::Write for ConsoleWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        ConsoleWriter::write(self, s);
        Ok(())
    }
}

/// Decode as much of `partial ++ buf` as possible.
///
/// Invalid sequences are skipped; an incomplete sequence at the end is left
/// in `partial` for the next call.
fn take_utf8(partial: &mut Vec<u8>, buf: &[u8]) -> String {
    partial.extend_from_slice(buf);

    let mut out = String::with_capacity(partial.len());
    let mut input: &[u8] = partial;
    loop {
        match std::str::from_utf8(input) {
            Ok(valid) => {
                out.push_str(valid);
                input = &[];
                break;
            }
            Err(err) => {
                let (valid, after) = input.split_at(err.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match err.error_len() {
                    Some(len) => input = &after[len..],
                    None => {
                        input = after;
                        break;
                    }
                }
            }
        }
    }

    let tail = input.to_vec();
    *partial = tail;
    out
}
