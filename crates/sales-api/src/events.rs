//! In-process broadcast of sales changes for SSE subscribers

use futures::Stream;
use sales_core::services::{SalesEvent, SalesEventPublisher};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct TenantEvent {
    pub tenant_id: Uuid,
    pub event: SalesEvent,
}

pub struct EventBus {
    tx: broadcast::Sender<TenantEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TenantEvent> {
        self.tx.subscribe()
    }

    /// Events for one tenant. Lagged receivers skip what they missed and
    /// keep going; the stream ends when the bus is dropped.
    pub fn tenant_stream(&self, tenant_id: Uuid) -> impl Stream<Item = SalesEvent> + Send + 'static {
        let mut rx = self.subscribe();
        async_stream::stream! {
            loop {
                match rx.recv().await {
                    Ok(event) if event.tenant_id == tenant_id => yield event.event,
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!("SSE subscriber for tenant {} lagged, skipped {} events", tenant_id, skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }
}

impl SalesEventPublisher for EventBus {
    fn publish(&self, tenant_id: Uuid, event: SalesEvent) {
        if self.tx.send(TenantEvent { tenant_id, event }).is_err() {
            debug!("No live subscribers for tenant {}", tenant_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::time::Duration;

    #[tokio::test]
    async fn stream_only_yields_own_tenant() {
        let bus = EventBus::new(16);
        let mine = Uuid::new_v4();
        let other = Uuid::new_v4();
        let stream = bus.tenant_stream(mine);
        tokio::pin!(stream);

        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        bus.publish(other, SalesEvent::SalesCreated { record_id: Uuid::new_v4() });
        bus.publish(mine, SalesEvent::SalesCreated { record_id: first });
        bus.publish(other, SalesEvent::SalesImported { count: 3 });
        bus.publish(mine, SalesEvent::SalesDeleted { record_id: second });

        assert_eq!(stream.next().await, Some(SalesEvent::SalesCreated { record_id: first }));
        assert_eq!(stream.next().await, Some(SalesEvent::SalesDeleted { record_id: second }));
    }

    #[tokio::test]
    async fn lagged_subscriber_continues_with_latest() {
        let bus = EventBus::new(2);
        let tenant = Uuid::new_v4();
        let stream = bus.tenant_stream(tenant);
        tokio::pin!(stream);

        for count in 1..=5 {
            bus.publish(tenant, SalesEvent::SalesImported { count });
        }

        let next = tokio::time::timeout(Duration::from_secs(1), stream.next()).await.unwrap();
        assert_eq!(next, Some(SalesEvent::SalesImported { count: 4 }));
        let next = tokio::time::timeout(Duration::from_secs(1), stream.next()).await.unwrap();
        assert_eq!(next, Some(SalesEvent::SalesImported { count: 5 }));
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::new(4);
        bus.publish(Uuid::new_v4(), SalesEvent::SalesImported { count: 1 });
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(SalesEvent::SalesImported { count: 2 }).unwrap();
        assert_eq!(json["type"], "sales_imported");
        assert_eq!(json["payload"]["count"], 2);
    }
}
