//! WebSocket endpoint for task notifications.

use axum::{
    Router,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::HeaderMap,
    response::Response,
    routing::get,
};
use axum_helpers::{SharedVerifier, ShutdownCoordinator, extract_token_from_headers};
use futures::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, warn};

use super::connection::Connection;
use super::registry::{ConnectionId, ConnectionRegistry, Outbound};

/// Everything a WebSocket session needs from the application
#[derive(Clone)]
pub struct RealtimeState {
    pub registry: Arc<ConnectionRegistry>,
    pub verifier: SharedVerifier,
    pub shutdown: ShutdownCoordinator,
}

#[derive(Debug, Deserialize)]
pub struct WsParams {
    token: Option<String>,
}

/// Frames the server sends that are not task events
#[derive(Debug, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
enum ControlFrame {
    Connected {
        connection_id: ConnectionId,
        authenticated: bool,
    },
}

/// Router exposing the WebSocket upgrade at `/`.
///
/// Authentication is optional at the transport level: sessions without a
/// valid credential stay connected but never receive events.
pub fn router(state: RealtimeState) -> Router {
    Router::new().route("/", get(ws_handler)).with_state(state)
}

/// Credential sources, in order: `token` query parameter, bearer header,
/// `access_token` cookie.
pub fn handshake_credential(params: WsParams, headers: &HeaderMap) -> Option<String> {
    params
        .token
        .filter(|t| !t.is_empty())
        .or_else(|| extract_token_from_headers(headers))
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<RealtimeState>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
) -> Response {
    let credential = handshake_credential(params, &headers);
    ws.on_upgrade(move |socket| handle_socket(socket, state, credential))
}

async fn handle_socket(socket: WebSocket, state: RealtimeState, credential: Option<String>) {
    let (mut connection, outbound) = Connection::open(state.registry.clone());
    connection.authenticate(state.verifier.as_ref(), credential.as_deref());

    let hello = ControlFrame::Connected {
        connection_id: connection.id(),
        authenticated: connection.identity().is_some(),
    };
    debug!(connection_id = %connection.id(), state = ?connection.state(), "WebSocket session started");

    let (sink, stream) = socket.split();
    let shutdown = state.shutdown.subscribe();

    let mut writer = tokio::spawn(write_loop(sink, outbound, hello, shutdown));
    let mut reader = tokio::spawn(read_loop(stream, connection.id()));

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    connection.disconnect();
}

/// Drains the outbound queue to the socket in FIFO order.
async fn write_loop(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::UnboundedReceiver<Outbound>,
    hello: ControlFrame,
    mut shutdown: broadcast::Receiver<()>,
) {
    match serde_json::to_string(&hello) {
        Ok(text) => {
            if sink.send(Message::Text(text.into())).await.is_err() {
                return;
            }
        }
        Err(e) => warn!("Failed to serialize connected frame: {}", e),
    }

    loop {
        tokio::select! {
            event = outbound.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(event.as_ref()) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(event = event.kind(), "Failed to serialize task event: {}", e);
                        continue;
                    }
                };
                if sink.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
            _ = shutdown.recv() => {
                let _ = sink.send(Message::Close(None)).await;
                break;
            }
        }
    }
}

/// Consumes client frames until the peer closes. Their content is ignored.
async fn read_loop(mut stream: SplitStream<WebSocket>, connection_id: ConnectionId) {
    while let Some(frame) = stream.next().await {
        match frame {
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(%connection_id, "WebSocket read error: {}", e);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn params(token: Option<&str>) -> WsParams {
        WsParams {
            token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_query_token_wins_over_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer header-token"));

        assert_eq!(
            handshake_credential(params(Some("query-token")), &headers).as_deref(),
            Some("query-token")
        );
    }

    #[test]
    fn test_falls_back_to_bearer_then_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("theme=dark; access_token=cookie-token"));
        assert_eq!(
            handshake_credential(params(None), &headers).as_deref(),
            Some("cookie-token")
        );

        headers.insert("authorization", HeaderValue::from_static("Bearer header-token"));
        assert_eq!(
            handshake_credential(params(Some("")), &headers).as_deref(),
            Some("header-token")
        );
    }

    #[test]
    fn test_no_credential() {
        assert!(handshake_credential(params(None), &HeaderMap::new()).is_none());
    }

    #[test]
    fn test_connected_frame_shape() {
        let id = ConnectionId::new();
        let frame = ControlFrame::Connected {
            connection_id: id,
            authenticated: true,
        };

        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            serde_json::json!({
                "event": "connected",
                "data": {"connection_id": id.to_string(), "authenticated": true}
            })
        );
    }
}
