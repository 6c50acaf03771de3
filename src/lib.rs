//! # Outview
//!
//! A thread-safe output console for text widgets.
//!
//! Worker threads write progress text at any rate; a single UI thread drains
//! it into a scrollback display at a fixed cadence, so producers never touch
//! the widget and never block on it.
//!
//! ## Core Concepts
//!
//! - **Queue**: unbounded FIFO shared by every writer, swapped out on discard
//! - **Sanitizer**: drops characters the display cannot show before queuing
//! - **Drain tick**: renders a bounded batch per tick, then yields to the UI
//! - **Carriage return**: `\r` overwrites the current line, like a terminal
//! - **Auto-scroll**: follows new output only while the view is at the bottom
//!
//! ## Example
//!
//! ```rust,ignore
//! use outview::{Console, MemorySurface};
//!
//! let mut console = Console::new(MemorySurface::new());
//! let writer = console.writer();
//!
//! std::thread::spawn(move || {
//!     for pct in (0..=100).step_by(10) {
//!         writer.write(&format!("\rdownloading {pct}%"));
//!     }
//!     writer.write("\n");
//! });
//!
//! // From the UI thread's timer:
//! console.drain_tick();
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod error;
pub mod queue;
pub mod render;
pub mod surface;

// Re-exports for convenience
pub use actor::{Console, ConsoleConfig, ConsoleWriter, DrainReport, DrainTicker, Tick};
pub use error::{ConsoleError, Result};
pub use queue::{Entry, OutputQueue, Sanitizer, SanitizerConfig, FULL_BLOCK};
pub use render::{CarriageReturn, Renderer};
pub use surface::{MemorySurface, SurfaceFlags, TerminalSurface, TextSurface};
