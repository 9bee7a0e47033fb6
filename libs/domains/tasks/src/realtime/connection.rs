use axum_helpers::{IdentityVerifier, UserId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::registry::{ConnectionHandle, ConnectionId, ConnectionRegistry, Outbound};

/// Lifecycle of one real-time connection.
///
/// `Unauthenticated -> Authenticated -> Disconnected`, with `Disconnected`
/// reachable from either earlier state and terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Live but receives nothing
    Unauthenticated,
    Authenticated(UserId),
    Disconnected,
}

/// A live connection and its registry membership.
///
/// Dropping it deregisters, so a connection can never outlive its socket in
/// the registry.
pub struct Connection {
    handle: ConnectionHandle,
    state: ConnectionState,
    /// Set by the first `authenticate` call, whatever its outcome
    attempted: bool,
    registry: Arc<ConnectionRegistry>,
}

impl Connection {
    /// Open an unauthenticated connection and return the receiver for its
    /// outbound queue.
    pub fn open(registry: Arc<ConnectionRegistry>) -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (handle, rx) = ConnectionHandle::channel();
        debug!(connection_id = %handle.id(), "Connection opened");

        let connection = Self {
            handle,
            state: ConnectionState::Unauthenticated,
            attempted: false,
            registry,
        };
        (connection, rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.handle.id()
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&UserId> {
        match &self.state {
            ConnectionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Try to bind the connection to the identity behind `credential`.
    ///
    /// Only the first call on a live connection does anything; later calls
    /// return the current state untouched. A missing or rejected credential
    /// leaves the connection unauthenticated for good.
    pub fn authenticate(
        &mut self,
        verifier: &dyn IdentityVerifier,
        credential: Option<&str>,
    ) -> &ConnectionState {
        if self.attempted || self.state != ConnectionState::Unauthenticated {
            return &self.state;
        }
        self.attempted = true;

        let Some(credential) = credential else {
            debug!(connection_id = %self.id(), "No credential presented");
            return &self.state;
        };

        match verifier.verify(credential) {
            Ok(identity) => {
                if self.registry.register(&identity, self.handle.clone()) {
                    info!(connection_id = %self.id(), user_id = %identity, "Connection authenticated");
                    self.state = ConnectionState::Authenticated(identity);
                }
            }
            Err(e) => {
                info!(connection_id = %self.id(), "Connection stays unauthenticated: {}", e);
            }
        }

        &self.state
    }

    /// Leave the registry and enter the terminal state. Repeat calls are no-ops.
    pub fn disconnect(&mut self) {
        if self.state == ConnectionState::Disconnected {
            return;
        }

        self.registry.deregister(self.id());
        debug!(connection_id = %self.id(), "Connection closed");
        self.state = ConnectionState::Disconnected;
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::AuthError;

    /// Accepts "token-<user>" and returns <user>
    struct PrefixVerifier;

    impl IdentityVerifier for PrefixVerifier {
        fn verify(&self, credential: &str) -> Result<UserId, AuthError> {
            credential
                .strip_prefix("token-")
                .map(UserId::new)
                .ok_or_else(|| AuthError::InvalidCredential("bad token".to_string()))
        }
    }

    #[test]
    fn test_valid_credential_registers() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut connection, _rx) = Connection::open(registry.clone());

        let state = connection.authenticate(&PrefixVerifier, Some("token-alice"));
        assert_eq!(state, &ConnectionState::Authenticated(UserId::new("alice")));
        assert_eq!(
            registry.identity_of(connection.id()),
            Some(UserId::new("alice"))
        );
    }

    #[test]
    fn test_missing_or_invalid_credential_stays_unauthenticated() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut anonymous, _rx1) = Connection::open(registry.clone());
        let (mut rejected, _rx2) = Connection::open(registry.clone());

        anonymous.authenticate(&PrefixVerifier, None);
        rejected.authenticate(&PrefixVerifier, Some("garbage"));

        assert_eq!(anonymous.state(), &ConnectionState::Unauthenticated);
        assert_eq!(rejected.state(), &ConnectionState::Unauthenticated);
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn test_authenticates_at_most_once() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut connection, _rx) = Connection::open(registry.clone());

        connection.authenticate(&PrefixVerifier, Some("token-alice"));
        connection.authenticate(&PrefixVerifier, Some("token-bob"));

        assert_eq!(connection.identity(), Some(&UserId::new("alice")));
        assert!(registry.connections_for(&UserId::new("bob")).is_empty());
    }

    #[test]
    fn test_failed_attempt_is_final() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut anonymous, _rx1) = Connection::open(registry.clone());
        let (mut rejected, _rx2) = Connection::open(registry.clone());

        anonymous.authenticate(&PrefixVerifier, None);
        rejected.authenticate(&PrefixVerifier, Some("garbage"));

        let state = anonymous.authenticate(&PrefixVerifier, Some("token-alice"));
        assert_eq!(state, &ConnectionState::Unauthenticated);
        let state = rejected.authenticate(&PrefixVerifier, Some("token-alice"));
        assert_eq!(state, &ConnectionState::Unauthenticated);

        assert!(registry.connections_for(&UserId::new("alice")).is_empty());
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn test_disconnect_is_terminal() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut connection, _rx) = Connection::open(registry.clone());
        connection.authenticate(&PrefixVerifier, Some("token-alice"));

        connection.disconnect();
        assert_eq!(connection.state(), &ConnectionState::Disconnected);
        assert_eq!(registry.connection_count(), 0);

        connection.authenticate(&PrefixVerifier, Some("token-alice"));
        assert_eq!(connection.state(), &ConnectionState::Disconnected);
        assert_eq!(registry.connection_count(), 0);
    }

    #[test]
    fn test_drop_deregisters() {
        let registry = Arc::new(ConnectionRegistry::new());
        let (mut connection, _rx) = Connection::open(registry.clone());
        connection.authenticate(&PrefixVerifier, Some("token-alice"));
        assert_eq!(registry.connection_count(), 1);

        drop(connection);
        assert_eq!(registry.connection_count(), 0);
        assert_eq!(registry.identity_count(), 0);
    }
}
