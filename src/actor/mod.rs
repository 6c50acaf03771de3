//! Threading: producers write, the UI thread drains.
//!
//! - **Writers**: any number of [`ConsoleWriter`] clones, one per worker
//!   thread, pushing into the shared queue
//! - **Console**: owned by the UI thread, the only code that touches the
//!   surface
//! - **Ticker**: optional timer thread pacing the drain loop
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   Entry    ┌──────────────┐  drain_tick  ┌─────────────┐
//! │ Worker(s)    │ ─────────▶ │ OutputQueue  │ ───────────▶ │ TextSurface │
//! └──────────────┘            └──────────────┘              └─────────────┘
//!                                                                  ▲
//! ┌──────────────┐    Tick    ┌──────────────┐                     │
//! │ DrainTicker  │ ─────────▶ │  UI thread   │ ────────────────────┘
//! └──────────────┘            └──────────────┘
//! ```

mod console;
mod ticker;
mod writer;

pub use console::{Console, ConsoleConfig, DrainReport};
pub use ticker::{DrainTicker, Tick};
pub use writer::ConsoleWriter;
