use axum_helpers::UserId;
use std::sync::Arc;
use tracing::{debug, warn};

use super::registry::ConnectionRegistry;
use crate::events::TaskEvent;
use crate::service::PostCommitHook;

/// Pushes task events to every live connection of the owning user.
#[derive(Clone)]
pub struct NotificationFanout {
    registry: Arc<ConnectionRegistry>,
}

impl NotificationFanout {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Queue `event` on each of `identity`'s connections.
    ///
    /// Returns how many queues accepted it. Closed connections are skipped;
    /// no connections at all is not an error.
    pub fn publish(&self, identity: &UserId, event: TaskEvent) -> usize {
        let targets = self.registry.connections_for(identity);
        if targets.is_empty() {
            debug!(user_id = %identity, event = event.kind(), "No live connections");
            return 0;
        }

        let kind = event.kind();
        let event = Arc::new(event);
        let mut queued = 0;

        for connection in &targets {
            match connection.send(event.clone()) {
                Ok(()) => queued += 1,
                Err(e) => warn!(
                    user_id = %identity,
                    connection_id = %connection.id(),
                    event = kind,
                    "Skipping closed connection: {}",
                    e
                ),
            }
        }

        debug!(user_id = %identity, event = kind, queued, total = targets.len(), "Event fanned out");
        queued
    }
}

impl PostCommitHook for NotificationFanout {
    fn after_commit(&self, owner: &UserId, event: TaskEvent) -> eyre::Result<()> {
        self.publish(owner, event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::realtime::registry::ConnectionHandle;
    use uuid::Uuid;

    fn deleted() -> TaskEvent {
        TaskEvent::Deleted { id: Uuid::now_v7() }
    }

    #[test]
    fn test_publish_without_connections_is_noop() {
        let fanout = NotificationFanout::new(Arc::new(ConnectionRegistry::new()));
        assert_eq!(fanout.publish(&UserId::new("alice"), deleted()), 0);
    }

    #[test]
    fn test_publish_reaches_every_connection_of_identity_only() {
        let registry = Arc::new(ConnectionRegistry::new());
        let alice = UserId::new("alice");
        let bob = UserId::new("bob");

        let (a1, mut rx_a1) = ConnectionHandle::channel();
        let (a2, mut rx_a2) = ConnectionHandle::channel();
        let (b1, mut rx_b1) = ConnectionHandle::channel();
        registry.register(&alice, a1);
        registry.register(&alice, a2);
        registry.register(&bob, b1);

        let fanout = NotificationFanout::new(registry);
        let event = deleted();
        assert_eq!(fanout.publish(&alice, event.clone()), 2);

        assert_eq!(*rx_a1.try_recv().unwrap(), event);
        assert_eq!(*rx_a2.try_recv().unwrap(), event);
        assert!(rx_a1.try_recv().is_err());
        assert!(rx_b1.try_recv().is_err());
    }

    #[test]
    fn test_closed_connection_does_not_block_others() {
        let registry = Arc::new(ConnectionRegistry::new());
        let alice = UserId::new("alice");

        let (dead, dead_rx) = ConnectionHandle::channel();
        let (live, mut live_rx) = ConnectionHandle::channel();
        registry.register(&alice, dead);
        registry.register(&alice, live);
        drop(dead_rx);

        let fanout = NotificationFanout::new(registry);
        assert_eq!(fanout.publish(&alice, deleted()), 1);
        assert!(live_rx.try_recv().is_ok());
    }

    #[test]
    fn test_events_keep_publish_order() {
        let registry = Arc::new(ConnectionRegistry::new());
        let alice = UserId::new("alice");
        let (handle, mut rx) = ConnectionHandle::channel();
        registry.register(&alice, handle);

        let fanout = NotificationFanout::new(registry);
        let first = deleted();
        let second = deleted();
        fanout.after_commit(&alice, first.clone()).unwrap();
        fanout.after_commit(&alice, second.clone()).unwrap();

        assert_eq!(*rx.try_recv().unwrap(), first);
        assert_eq!(*rx.try_recv().unwrap(), second);
    }
}
