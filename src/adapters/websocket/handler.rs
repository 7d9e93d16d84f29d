//! WebSocket upgrade handler for live shipment subscriptions.
//!
//! Connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Wait for `connection_init` within the handshake timeout
//! 3. Resolve its credentials; reject and close without a principal
//! 4. Relay subscribe/unsubscribe/ping frames until disconnect
//! 5. Abort every subscription of the connection

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::adapters::http::AppState;
use crate::domain::foundation::Principal;

use super::connection::{Connection, Flow};
use super::messages::{ClientMessage, ServerMessage};

/// Route: `GET /api/subscriptions`
pub async fn subscriptions_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Why the handshake did not produce a principal.
#[derive(Debug)]
enum HandshakeError {
    /// Client went away; nothing to answer.
    Disconnected,
    /// Answer with an error frame, then close.
    Rejected(String),
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::new_v4();
    let (mut sender, mut receiver) = socket.split();

    let handshake = tokio::time::timeout(
        state.subscriptions.handshake_timeout(),
        await_init(&mut receiver, &state),
    )
    .await;

    let principal = match handshake {
        Ok(Ok(principal)) => principal,
        Ok(Err(HandshakeError::Disconnected)) => return,
        Ok(Err(HandshakeError::Rejected(message))) => {
            tracing::debug!(%connection_id, reason = %message, "Subscription handshake rejected");
            reject(&mut sender, message).await;
            return;
        }
        Err(_) => {
            tracing::debug!(%connection_id, "Subscription handshake timed out");
            reject(&mut sender, "Connection initialisation timeout".to_string()).await;
            return;
        }
    };

    if send_message(&mut sender, &ServerMessage::ConnectionAck)
        .await
        .is_err()
    {
        return;
    }
    tracing::info!(%connection_id, user_id = %principal.id, "Subscription connection opened");

    let (outbound_tx, mut outbound_rx) = mpsc::channel::<ServerMessage>(state.subscriptions.buffer);
    let mut connection = Connection::new(principal, state.broadcaster.clone(), outbound_tx);

    let mut send_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if let Err(e) = send_message(&mut sender, &message).await {
                tracing::debug!(%connection_id, "Send error, closing connection: {}", e);
                break;
            }
        }
        let _ = sender.close().await;
    });

    let mut writer_done = false;
    loop {
        tokio::select! {
            _ = &mut send_task => {
                writer_done = true;
                break;
            }
            frame = receiver.next() => {
                let Some(Ok(frame)) = frame else { break };
                match frame {
                    Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => {
                            if connection.handle(message).await == Flow::Close {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::debug!(%connection_id, error = %e, "Malformed subscription frame");
                            connection
                                .handle_invalid(format!("Invalid message: {}", e))
                                .await;
                        }
                    },
                    Message::Close(_) => break,
                    // Protocol-level ping/pong is answered by axum; binary is unsupported.
                    Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
                }
            }
        }
    }

    let user_id = connection.principal().id;
    connection.close();
    // Dropping the connection closes the outbound queue, which ends the writer.
    drop(connection);
    if !writer_done {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(1), send_task).await;
    }
    tracing::info!(%connection_id, user_id = %user_id, "Subscription connection closed");
}

/// Reads frames until `connection_init` arrives and resolves its credentials.
async fn await_init(
    receiver: &mut SplitStream<WebSocket>,
    state: &AppState,
) -> Result<Principal, HandshakeError> {
    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) | Err(_) => return Err(HandshakeError::Disconnected),
            Ok(_) => continue,
        };
        return match serde_json::from_str::<ClientMessage>(&text) {
            Ok(ClientMessage::ConnectionInit { payload }) => state
                .resolver
                .resolve_header(payload.credential())
                .await
                .map_err(|_| HandshakeError::Rejected("Internal server error".into()))?
                .ok_or_else(|| HandshakeError::Rejected("Authentication required".into())),
            Ok(_) => Err(HandshakeError::Rejected(
                "Connection not initialised".into(),
            )),
            Err(e) => Err(HandshakeError::Rejected(format!("Invalid message: {}", e))),
        };
    }
    Err(HandshakeError::Disconnected)
}

async fn reject(sender: &mut SplitSink<WebSocket, Message>, message: String) {
    let _ = send_message(sender, &ServerMessage::error(None, message)).await;
    let _ = sender.close().await;
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sender: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}
