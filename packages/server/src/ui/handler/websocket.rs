//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ChatEvent, ConnectionId, DisplayName, RECIPIENT_QUEUE_CAPACITY},
    infrastructure::dto::websocket::ClientEvent,
    ui::{session::ConnectionSession, state::AppState},
};

/// join_error reason for a display name that fails validation
const INVALID_NAME_MESSAGE: &str = "昵称不合法，请更换昵称";

/// join_error reason for a join attempt on an already-joined session
const ALREADY_JOINED_MESSAGE: &str = "您已加入聊天室，请勿重复加入";

/// Upgrade the connection and hand it to the socket loop
///
/// No query parameters: the display name arrives in-band as a `join` event,
/// so a rejected name can be retried over the same connection.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the recipient channel into the WebSocket sender.
///
/// This function handles the outbound message flow: events broadcast to this
/// connection arrive on the channel already serialized and are written to the
/// socket in arrival order. The task ends when the channel is closed or the
/// socket rejects a write.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the RoomBroadcaster
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::new();
    let (tx, rx) = mpsc::channel(RECIPIENT_QUEUE_CAPACITY);

    // Register the recipient channel before any join so that sender-only
    // events (join_error) are deliverable from the first frame on
    state
        .broadcaster
        .register_recipient(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' established", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);
    let mut session = ConnectionSession::new(connection_id);

    loop {
        tokio::select! {
            maybe_msg = receiver.next() => {
                let msg = match maybe_msg {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error on '{}': {}", connection_id, e);
                        break;
                    }
                    None => break,
                };

                match msg {
                    Message::Text(text) => {
                        handle_client_event(&state, &mut session, &text).await;
                    }
                    Message::Ping(_) => {
                        tracing::debug!("Received ping");
                        // Ping/pong is handled automatically by the WebSocket protocol
                    }
                    Message::Close(_) => {
                        tracing::info!("Connection '{}' requested close", connection_id);
                        break;
                    }
                    _ => {}
                }
            }
            // The write side ended (socket gone): stop reading as well
            _ = &mut send_task => break,
        }
    }

    // Teardown. The session state machine guarantees the leave flow runs at
    // most once even when read and write failures race.
    send_task.abort();
    state.broadcaster.unregister_recipient(&connection_id).await;
    match session.close() {
        Some(left_name) => {
            tracing::info!(
                "Connection '{}' ('{}') disconnected",
                connection_id,
                left_name
            );
            state.leave_room_usecase.execute(connection_id).await;
        }
        None => {
            tracing::info!("Connection '{}' disconnected before joining", connection_id);
        }
    }
}

/// Handle one inbound text frame against the session state machine
async fn handle_client_event(state: &Arc<AppState>, session: &mut ConnectionSession, raw: &str) {
    // Parse the incoming message; unparseable frames are ignored
    let event = match serde_json::from_str::<ClientEvent>(raw) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Ignoring unparseable frame: {}", e);
            return;
        }
    };

    let connection_id = session.connection_id();

    match event {
        ClientEvent::Join { name } => {
            if session.is_joined() {
                tracing::warn!("Connection '{}' tried to join twice", connection_id);
                send_join_error(state, &connection_id, ALREADY_JOINED_MESSAGE).await;
                return;
            }

            // Convert String -> DisplayName (Domain Model)
            let display_name = match DisplayName::new(name) {
                Ok(display_name) => display_name,
                Err(e) => {
                    tracing::warn!("Rejecting invalid display name: {}", e);
                    send_join_error(state, &connection_id, INVALID_NAME_MESSAGE).await;
                    return;
                }
            };

            match state
                .join_room_usecase
                .execute(display_name.clone(), connection_id)
                .await
            {
                Ok(_) => {
                    session.mark_joined(display_name);
                }
                Err(e) => {
                    // join_error is already delivered by the UseCase;
                    // the session stays joinable for a retry
                    tracing::info!("Join rejected on '{}': {}", connection_id, e);
                }
            }
        }
        ClientEvent::SendMessage { text } => match session.joined_name() {
            Some(sender_name) => {
                state
                    .dispatch_message_usecase
                    .execute(sender_name, &text)
                    .await;
            }
            None => {
                tracing::warn!(
                    "Ignoring message from connection '{}' before join",
                    connection_id
                );
            }
        },
    }
}

/// Send a join_error to a single connection
async fn send_join_error(state: &Arc<AppState>, connection_id: &ConnectionId, reason: &str) {
    let event = ChatEvent::JoinError {
        reason: reason.to_string(),
    };
    if let Err(e) = state.broadcaster.send_to(connection_id, &event).await {
        tracing::warn!(
            "Failed to deliver join_error to '{}': {}",
            connection_id,
            e
        );
    }
}
