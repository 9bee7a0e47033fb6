//! Real-time delivery of task events.
//!
//! ```text
//! TaskService --after_commit--> NotificationFanout --snapshot--> ConnectionRegistry
//!                                      |
//!                                      +--> per-connection queue --> WebSocket writer
//! ```
//!
//! A [`Connection`] joins the registry once its handshake credential
//! verifies and leaves it when the socket closes or the value is dropped.

pub mod connection;
pub mod fanout;
pub mod registry;
pub mod ws;

pub use connection::{Connection, ConnectionState};
pub use fanout::NotificationFanout;
pub use registry::{ConnectionClosed, ConnectionHandle, ConnectionId, ConnectionRegistry, Outbound};
pub use ws::{RealtimeState, WsParams, handshake_credential};
