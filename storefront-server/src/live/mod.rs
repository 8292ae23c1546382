//! Admin live notifications
//!
//! Fan-out channel for connected admin sessions. Each WebSocket
//! connection registers an mpsc sender; broadcast walks the registry and
//! drops peers whose channel is closed or full, so one dead connection
//! never blocks the rest.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const PEER_BUFFER: usize = 32;

#[derive(Default)]
struct ChannelInner {
    peers: DashMap<u64, mpsc::Sender<String>>,
    next_id: AtomicU64,
}

/// Registry of connected admin observers
#[derive(Clone, Default)]
pub struct AdminChannel {
    inner: Arc<ChannelInner>,
}

impl AdminChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new observer; returns its id and the receiving half
    pub fn register(&self) -> (u64, mpsc::Receiver<String>) {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(PEER_BUFFER);
        self.inner.peers.insert(id, tx);
        debug!(peer_id = id, "Admin observer registered");
        (id, rx)
    }

    /// Remove an observer (connection closed)
    pub fn unregister(&self, id: u64) {
        if self.inner.peers.remove(&id).is_some() {
            debug!(peer_id = id, "Admin observer unregistered");
        }
    }

    /// Deliver `message` to every connected observer.
    ///
    /// Observers that cannot accept the message are removed from the
    /// registry. Returns the number of successful deliveries.
    pub async fn broadcast(&self, message: &str) -> usize {
        let mut delivered = 0;
        let mut dead: Vec<u64> = Vec::new();

        for entry in self.inner.peers.iter() {
            match entry.value().try_send(message.to_string()) {
                Ok(()) => delivered += 1,
                Err(_) => dead.push(*entry.key()),
            }
        }

        for id in dead {
            warn!(peer_id = id, "Dropping unreachable admin observer");
            self.inner.peers.remove(&id);
        }

        delivered
    }

    /// Number of currently connected observers
    pub fn connected(&self) -> usize {
        self.inner.peers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_all_observers() {
        let channel = AdminChannel::new();
        let (_id_a, mut rx_a) = channel.register();
        let (_id_b, mut rx_b) = channel.register();

        let delivered = channel.broadcast("New Order with id 7").await;
        assert_eq!(delivered, 2);
        assert_eq!(rx_a.recv().await.unwrap(), "New Order with id 7");
        assert_eq!(rx_b.recv().await.unwrap(), "New Order with id 7");
    }

    #[tokio::test]
    async fn dead_observer_is_removed_and_others_still_receive() {
        let channel = AdminChannel::new();
        let (_id_a, rx_a) = channel.register();
        let (_id_b, mut rx_b) = channel.register();

        drop(rx_a);

        let delivered = channel.broadcast("New Order with id 8").await;
        assert_eq!(delivered, 1);
        assert_eq!(channel.connected(), 1);
        assert_eq!(rx_b.recv().await.unwrap(), "New Order with id 8");
    }

    #[tokio::test]
    async fn unregister_removes_observer() {
        let channel = AdminChannel::new();
        let (id, _rx) = channel.register();
        assert_eq!(channel.connected(), 1);
        channel.unregister(id);
        assert_eq!(channel.connected(), 0);
    }

    #[tokio::test]
    async fn broadcast_with_no_observers_is_a_noop() {
        let channel = AdminChannel::new();
        assert_eq!(channel.broadcast("anything").await, 0);
    }
}
