//! Producer side: the output queue and the text sanitizer.
//!
//! - [`Entry`]: a text chunk or the clear marker
//! - [`OutputQueue`]: unbounded MPSC FIFO that can be swapped out atomically
//! - [`Sanitizer`]: strips characters a text surface cannot display

mod entry;
mod sanitize;
mod shared;

pub use entry::Entry;
pub use sanitize::{Sanitizer, SanitizerConfig, FULL_BLOCK};
pub use shared::OutputQueue;
