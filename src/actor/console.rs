//! Console: owns the surface and drains the queue into it.
//!
//! The console is the UI-thread half. It stays on one thread:
//! the host keeps it next to its widget and hands [`ConsoleWriter`]s to the
//! worker threads.

use super::ticker::DrainTicker;
use super::writer::{ConsoleWriter, Shared};
use crate::queue::{Entry, OutputQueue, Sanitizer, SanitizerConfig};
use crate::render::Renderer;
use crate::surface::TextSurface;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a [`Console`].
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Period of the drain loop.
    pub drain_interval: Duration,
    /// Maximum entries rendered per tick.
    pub batch_limit: usize,
    /// Follow new output when the view is at the bottom.
    pub auto_scroll: bool,
    /// Character filtering applied by writers.
    pub sanitizer: SanitizerConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            drain_interval: Duration::from_millis(50),
            batch_limit: 120,
            auto_scroll: true,
            sanitizer: SanitizerConfig::default(),
        }
    }
}

/// Outcome of one drain tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Entries taken from the queue.
    pub processed: usize,
    /// The queue ran dry before the batch limit.
    pub exhausted: bool,
    /// A surface error cut the tick short.
    pub failed: bool,
}

impl DrainReport {
    fn merge(&mut self, other: Self) {
        self.processed += other.processed;
        self.exhausted = other.exhausted;
        self.failed |= other.failed;
    }
}

/// Thread-safe output console.
///
/// Producers write through [`ConsoleWriter`] handles from any thread. The
/// owner calls [`drain_tick`](Self::drain_tick) periodically from the thread
/// that owns the surface, either from its own timer or via the built-in
/// ticker ([`start_ticker`](Self::start_ticker) + [`poll`](Self::poll)).
pub struct Console<S: TextSurface> {
    /// Display surface; only touched by `drain_tick`.
    surface: S,
    /// Write handle sharing the queue with every clone.
    writer: ConsoleWriter,
    /// Render state.
    renderer: Renderer,
    /// Configuration.
    config: ConsoleConfig,
    /// Repeating timer, stopped when the console is dropped.
    ticker: Option<DrainTicker>,
}

impl<S: TextSurface> Console<S> {
    /// Create a console with default configuration.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ConsoleConfig::default())
    }

    /// Create a console with custom configuration.
    ///
    /// The surface is switched to read-only.
    pub fn with_config(mut surface: S, mut config: ConsoleConfig) -> Self {
        surface.set_editable(false);
        config.batch_limit = config.batch_limit.max(1);

        let shared = Arc::new(Shared {
            queue: OutputQueue::new(),
            sanitizer: Sanitizer::new(config.sanitizer.clone()),
        });

        Self {
            surface,
            writer: ConsoleWriter::new(shared),
            renderer: Renderer::new(config.auto_scroll),
            config,
            ticker: None,
        }
    }

    /// Get a new write handle for a producer thread.
    pub fn writer(&self) -> ConsoleWriter {
        self.writer.clone()
    }

    /// Get the configuration.
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Borrow the surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface, e.g. for user scrolling.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Tear down the console and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// See [`ConsoleWriter::write`].
    pub fn write(&self, text: &str) -> bool {
        self.writer.write(text)
    }

    /// See [`ConsoleWriter::write_line`].
    pub fn write_line(&self, text: &str) -> bool {
        self.writer.write_line(text)
    }

    /// See [`ConsoleWriter::clear`].
    pub fn clear(&self) {
        self.writer.clear();
    }

    /// See [`ConsoleWriter::flush`].
    pub const fn flush(&self) {}

    /// See [`ConsoleWriter::buffer_empty`].
    pub fn buffer_empty(&self) -> bool {
        self.writer.buffer_empty()
    }

    /// See [`ConsoleWriter::clear_buffer`].
    pub fn clear_buffer(&self) {
        self.writer.clear_buffer();
    }

    /// Render up to `batch_limit` queued entries.
    ///
    /// Never blocks and never fails: a surface error ends the tick early,
    /// is logged, and leaves the rest of the queue for the next tick.
    pub fn drain_tick(&mut self) -> DrainReport {
        let mut report = DrainReport::default();

        while report.processed < self.config.batch_limit {
            let Some(entry) = self.writer.queue().try_pop() else {
                report.exhausted = true;
                break;
            };
            report.processed += 1;

            let rendered = match &entry {
                Entry::Clear => self.renderer.erase(&mut self.surface),
                Entry::Text(text) => self.renderer.append(&mut self.surface, text),
            };

            if let Err(err) = rendered.and_then(|()| self.surface.refresh()) {
                log::debug!("drain tick aborted after {} entries: {err}", report.processed);
                report.failed = true;
                break;
            }
        }

        if report.processed > 0 {
            log::trace!(
                "drained {} entries, {} left",
                report.processed,
                self.writer.queue().len()
            );
        }

        report
    }

    /// Keep draining until the queue is empty or a tick fails.
    ///
    /// Useful before tearing down, when nothing else will drain.
    pub fn drain_all(&mut self) -> DrainReport {
        let mut total = DrainReport::default();
        loop {
            let report = self.drain_tick();
            total.merge(report);
            if report.exhausted || report.failed {
                return total;
            }
        }
    }

    /// Start the built-in ticker at `drain_interval`. Does nothing if it is
    /// already running.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticker thread cannot be spawned.
    pub fn start_ticker(&mut self) -> io::Result<()> {
        if self.ticker.is_none() {
            let ticker = DrainTicker::spawn(self.config.drain_interval).inspect_err(|err| {
                log::warn!("failed to spawn drain ticker: {err}");
            })?;
            self.ticker = Some(ticker);
        }
        Ok(())
    }

    /// Stop the built-in ticker.
    pub fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.join();
        }
    }

    /// Get the built-in ticker, if running.
    pub const fn ticker(&self) -> Option<&DrainTicker> {
        self.ticker.as_ref()
    }

    /// Run one drain tick for every tick that has elapsed, without blocking.
    ///
    /// Returns `None` when no tick was due (or the ticker is not running).
    pub fn poll(&mut self) -> Option<DrainReport> {
        let mut total: Option<DrainReport> = None;
        while self.ticker.as_ref().and_then(DrainTicker::try_tick).is_some() {
            let report = self.drain_tick();
            total.get_or_insert_with(DrainReport::default).merge(report);
        }
        total
    }
}
