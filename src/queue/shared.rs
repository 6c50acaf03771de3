//! `OutputQueue`: swappable multi-producer, single-consumer FIFO.

use super::entry::Entry;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::sync::{PoisonError, RwLock};

/// The live channel pair.
#[derive(Debug)]
struct Channel {
    tx: Sender<Entry>,
    rx: Receiver<Entry>,
}

impl Channel {
    fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }
}

/// Unbounded FIFO of [`Entry`] values.
///
/// Sends and receives go through a read lock on the current channel;
/// [`replace`](Self::replace) takes the write lock and installs a fresh one,
/// dropping everything still queued in the old channel.
#[derive(Debug)]
pub struct OutputQueue {
    channel: RwLock<Channel>,
}

impl OutputQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            channel: RwLock::new(Channel::new()),
        }
    }

    /// Append an entry.
    pub fn push(&self, entry: Entry) {
        let channel = self.channel.read().unwrap_or_else(PoisonError::into_inner);
        // The receiver lives in the same struct, so the channel is never disconnected.
        let _ = channel.tx.send(entry);
    }

    /// Pop the oldest entry without blocking.
    pub fn try_pop(&self) -> Option<Entry> {
        let channel = self.channel.read().unwrap_or_else(PoisonError::into_inner);
        match channel.rx.try_recv() {
            Ok(entry) => Some(entry),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Check if the queue is empty. Racy by nature.
    pub fn is_empty(&self) -> bool {
        let channel = self.channel.read().unwrap_or_else(PoisonError::into_inner);
        channel.rx.is_empty()
    }

    /// Number of queued entries. Racy by nature.
    pub fn len(&self) -> usize {
        let channel = self.channel.read().unwrap_or_else(PoisonError::into_inner);
        channel.rx.len()
    }

    /// Swap in a fresh channel, discarding every queued entry.
    ///
    /// Returns how many entries were dropped.
    pub fn replace(&self) -> usize {
        let old = {
            let mut channel = self.channel.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *channel, Channel::new())
        };
        let dropped = old.rx.len();
        log::debug!("output queue replaced, {dropped} pending entries discarded");
        dropped
    }
}

impl Default for OutputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = OutputQueue::new();
        queue.push(Entry::Text("a".into()));
        queue.push(Entry::Clear);
        queue.push(Entry::Text("b".into()));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_pop(), Some(Entry::Text("a".into())));
        assert_eq!(queue.try_pop(), Some(Entry::Clear));
        assert_eq!(queue.try_pop(), Some(Entry::Text("b".into())));
        assert_eq!(queue.try_pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_replace_discards_pending() {
        let queue = OutputQueue::new();
        for i in 0..10 {
            queue.push(Entry::Text(i.to_string()));
        }

        assert_eq!(queue.replace(), 10);
        assert!(queue.is_empty());
        assert_eq!(queue.try_pop(), None);

        // Still usable afterwards
        queue.push(Entry::Text("after".into()));
        assert_eq!(queue.try_pop(), Some(Entry::Text("after".into())));
    }

    #[test]
    fn test_concurrent_producers() {
        let queue = Arc::new(OutputQueue::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..250 {
                        queue.push(Entry::Text(format!("{t}:{i}")));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(queue.len(), 1000);

        // Per-producer order is preserved
        let mut last = [None::<usize>; 4];
        while let Some(Entry::Text(text)) = queue.try_pop() {
            let (t, i) = text.split_once(':').unwrap();
            let (t, i): (usize, usize) = (t.parse().unwrap(), i.parse().unwrap());
            assert!(last[t].map_or(true, |prev| prev < i));
            last[t] = Some(i);
        }
    }
}
