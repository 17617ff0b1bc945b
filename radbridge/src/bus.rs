//! Async event bus between the UI channel and the bridge core.
//!
//! Requests flow through a bounded queue into the gateway loop; terminal
//! events are broadcast back so any number of UI listeners can observe
//! them. One bus instance is shared by cloning.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::trace;

use crate::error::{BusError, BusResult};
use crate::events::{BridgeEvent, BridgeRequest};

/// Default capacity for the request queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Default capacity for the event broadcast channel.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Async event bus carrying [`BridgeRequest`]s in and [`BridgeEvent`]s out.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

struct EventBusInner {
    /// Request queue (UI → gateway).
    request_tx: mpsc::Sender<BridgeRequest>,
    request_rx: RwLock<Option<mpsc::Receiver<BridgeRequest>>>,

    /// Event broadcast (gateway → UI).
    event_tx: broadcast::Sender<BridgeEvent>,

    /// Statistics.
    stats: RwLock<BusStats>,
}

/// Event bus statistics.
#[derive(Debug, Default, Clone, Copy)]
pub struct BusStats {
    /// Total requests accepted.
    pub requests: u64,
    /// Total events published.
    pub events: u64,
}

impl EventBus {
    /// Create a bus with default capacities.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    /// Create a bus with the given request queue capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (request_tx, request_rx) = mpsc::channel(capacity);
        let (event_tx, _) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);

        Self {
            inner: Arc::new(EventBusInner {
                request_tx,
                request_rx: RwLock::new(Some(request_rx)),
                event_tx,
                stats: RwLock::new(BusStats::default()),
            }),
        }
    }

    /// Publish an inbound request from the UI.
    pub async fn publish_request(&self, request: BridgeRequest) -> BusResult<()> {
        trace!(?request, "publishing request");
        self.inner
            .request_tx
            .send(request)
            .await
            .map_err(|_| BusError::RequestsClosed)?;
        self.inner.stats.write().await.requests += 1;
        Ok(())
    }

    /// Consume the next request.
    ///
    /// Only the gateway loop should call this. Returns `None` when every
    /// request handle is gone and the queue has drained.
    pub async fn consume_request(&self) -> Option<BridgeRequest> {
        let mut rx_guard = self.inner.request_rx.write().await;
        if let Some(rx) = rx_guard.as_mut() {
            rx.recv().await
        } else {
            None
        }
    }

    /// Publish a terminal event to all subscribers.
    ///
    /// Dropped silently if nobody is listening, which is fine: terminal
    /// events are observations, not commands.
    pub async fn publish_event(&self, event: BridgeEvent) {
        trace!(?event, "publishing event");
        let _ = self.inner.event_tx.send(event);
        self.inner.stats.write().await.events += 1;
    }

    /// Subscribe to all outbound events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BridgeEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Get current bus statistics.
    pub async fn stats(&self) -> BusStats {
        *self.inner.stats.read().await
    }

    /// Create a lightweight handle for publishing requests.
    #[must_use]
    pub fn request_handle(&self) -> RequestHandle {
        RequestHandle {
            tx: self.inner.request_tx.clone(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Lightweight handle for publishing requests without cloning the bus.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    tx: mpsc::Sender<BridgeRequest>,
}

impl RequestHandle {
    /// Publish an inbound request.
    pub async fn publish(&self, request: BridgeRequest) -> BusResult<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| BusError::RequestsClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_request_flow() {
        let bus = EventBus::new();
        bus.publish_request(BridgeRequest::Login).await.unwrap();

        let received = bus.consume_request().await;
        assert_eq!(received, Some(BridgeRequest::Login));
    }

    #[tokio::test]
    async fn test_event_broadcast_reaches_all_subscribers() {
        let bus = EventBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish_event(BridgeEvent::Login(true)).await;

        assert_eq!(rx1.recv().await.unwrap(), BridgeEvent::Login(true));
        assert_eq!(rx2.recv().await.unwrap(), BridgeEvent::Login(true));
    }

    #[tokio::test]
    async fn test_request_handle() {
        let bus = EventBus::new();
        let handle = bus.request_handle();
        handle
            .publish(BridgeRequest::ConnectWallet("nami".into()))
            .await
            .unwrap();

        let received = bus.consume_request().await.unwrap();
        assert_eq!(received, BridgeRequest::ConnectWallet("nami".into()));
    }

    #[tokio::test]
    async fn test_stats() {
        let bus = EventBus::new();
        bus.publish_request(BridgeRequest::QueryBalance)
            .await
            .unwrap();
        bus.publish_event(BridgeEvent::AssetBalance(0)).await;

        let stats = bus.stats().await;
        assert_eq!(stats.requests, 1);
        assert_eq!(stats.events, 1);
    }
}
