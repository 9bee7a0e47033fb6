use axum_helpers::UserId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::TaskEvent;

/// Identifier of one live real-time connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub type Outbound = Arc<TaskEvent>;

/// The outbound queue was dropped; the connection is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("connection {0} is closed")]
pub struct ConnectionClosed(pub ConnectionId);

/// Sending half of a connection's outbound queue.
///
/// Cheap to clone; the registry keeps one per registered connection.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ConnectionHandle {
    /// New handle with a fresh id, plus the receiver its writer drains
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = Self {
            id: ConnectionId::new(),
            tx,
        };
        (handle, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue an event without waiting on the socket.
    pub fn send(&self, event: Outbound) -> Result<(), ConnectionClosed> {
        self.tx.send(event).map_err(|_| ConnectionClosed(self.id))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[derive(Default)]
struct Inner {
    by_identity: HashMap<UserId, HashMap<ConnectionId, ConnectionHandle>>,
    owners: HashMap<ConnectionId, UserId>,
}

/// Routing table from user identity to that user's live connections.
///
/// One mutex guards both directions of the mapping. Each method holds it for
/// a single lookup or mutation; nothing awaits under it.
#[derive(Default)]
pub struct ConnectionRegistry {
    inner: Mutex<Inner>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `handle` to the set for `identity`.
    ///
    /// Returns `true` when the connection is registered under `identity`
    /// afterwards (including when it already was). A connection bound to a
    /// different identity stays where it is and `false` is returned.
    pub fn register(&self, identity: &UserId, handle: ConnectionHandle) -> bool {
        let mut inner = self.inner.lock();
        let id = handle.id();

        if let Some(current) = inner.owners.get(&id) {
            return current == identity;
        }

        inner.owners.insert(id, identity.clone());
        inner
            .by_identity
            .entry(identity.clone())
            .or_default()
            .insert(id, handle);
        true
    }

    /// Remove the connection from whichever identity holds it.
    ///
    /// Returns that identity; `None` if it was never registered or is
    /// already gone.
    pub fn deregister(&self, id: ConnectionId) -> Option<UserId> {
        let mut inner = self.inner.lock();
        let identity = inner.owners.remove(&id)?;

        if let Some(connections) = inner.by_identity.get_mut(&identity) {
            connections.remove(&id);
            if connections.is_empty() {
                inner.by_identity.remove(&identity);
            }
        }

        Some(identity)
    }

    /// Snapshot of the live connections for `identity`
    pub fn connections_for(&self, identity: &UserId) -> Vec<ConnectionHandle> {
        self.inner
            .lock()
            .by_identity
            .get(identity)
            .map(|connections| connections.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn identity_of(&self, id: ConnectionId) -> Option<UserId> {
        self.inner.lock().owners.get(&id).cloned()
    }

    pub fn connection_count(&self) -> usize {
        self.inner.lock().owners.len()
    }

    pub fn identity_count(&self) -> usize {
        self.inner.lock().by_identity.len()
    }
}
