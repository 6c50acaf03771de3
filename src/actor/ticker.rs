//! Drain ticker: dedicated thread that paces the drain loop.
//!
//! The UI thread never sleeps waiting for output. It polls the tick
//! receiver from its own event loop (or `select!`s on it) and drains the
//! queue once per tick. The ticker stops when it is dropped, which ties the
//! drain loop's lifetime to whoever owns it.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number (monotonically increasing).
    pub seq: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
}

/// Repeating timer driving [`Console::drain_tick`](super::Console::drain_tick).
pub struct DrainTicker {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
    /// Tick period.
    interval: Duration,
}

impl DrainTicker {
    /// Spawn a ticker firing every `interval`.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the ticker thread.
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Bounded channel with small buffer - ticks must not queue up behind a busy UI
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("outview-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, interval);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
            interval,
        })
    }

    /// Get a reference to the tick receiver.
    ///
    /// Use this with `select!` in event-driven loops:
    ///
    /// ```ignore
    /// loop {
    ///     select! {
    ///         recv(ui_events) -> event => handle(event),
    ///         recv(ticker.receiver()) -> _ => { console.drain_tick(); }
    ///     }
    /// }
    /// ```
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Tick period.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Take the next tick if one is due, without blocking.
    pub fn try_tick(&self) -> Option<Tick> {
        self.tick_rx.try_recv().ok()
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check if shutdown was requested.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &Arc<AtomicBool>, interval: Duration) {
        let start = Instant::now();
        let mut seq = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    seq,
                    elapsed: now - start,
                };

                // Non-blocking send - a full buffer means the UI is behind; skip this tick
                match tick_tx.try_send(tick) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => break,
                }

                seq += 1;
                next_tick += interval;

                // Behind schedule: catch up without queuing
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }

        log::trace!("drain ticker stopped after {seq} ticks");
    }
}

impl Drop for DrainTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
