//! Change notifications pushed to dashboard subscribers

use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum SalesEvent {
    SalesCreated { record_id: Uuid },
    SalesImported { count: usize },
    SalesUpdated { record_id: Uuid },
    SalesDeleted { record_id: Uuid },
}

/// Port for broadcasting sales changes to a tenant's live subscribers.
pub trait SalesEventPublisher: Send + Sync {
    fn publish(&self, tenant_id: Uuid, event: SalesEvent);
}
