//! Chat Session Gateway
//!
//! The per-connection glue between the socket channel and the room hub.
//!
//! A connected client declares interest in a conversation with a
//! `join conversation` event. The gateway checks that the principal is a
//! participant of that conversation, subscribes the connection to the
//! room, and forwards every broadcast to the socket until the connection
//! closes. One connection may be joined to any number of rooms.
//!
//! Messages are never *sent* over the socket: the send path is the REST
//! `POST /messages` handler, which persists first and then hands the
//! message to the hub. The socket is a pure notification channel.
//!
//! Stale connections are detected with a server-driven ping/pong
//! heartbeat; a connection that stops answering is closed, which drops
//! all of its room memberships.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::backend::chat::db;
use crate::backend::middleware::auth::{AuthUser, Principal};
use crate::backend::server::state::AppState;
use crate::shared::event::{ClientEvent, ServerEvent};

/// Outgoing frame buffer per connection
const OUTBOX_CAPACITY: usize = 64;

/// Handle the socket upgrade (GET /ws)
pub async fn chat_socket(
    ws: WebSocketUpgrade,
    AuthUser(principal): AuthUser,
    State(state): State<AppState>,
) -> impl IntoResponse {
    tracing::info!("[Gateway] User {} connecting", principal.user_id);
    ws.on_upgrade(move |socket| handle_socket(socket, principal, state))
}

/// Drive one connection until it closes or times out
async fn handle_socket(socket: WebSocket, principal: Principal, state: AppState) {
    let (mut sink, mut stream) = socket.split();

    // All writers (room forwarders, heartbeat, error replies) share the
    // socket through one outbox so frames are never interleaved.
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(OUTBOX_CAPACITY);
    let writer = tokio::spawn(async move {
        while let Some(frame) = out_rx.recv().await {
            if sink.send(frame).await.is_err() {
                break;
            }
        }
    });

    let last_pong = Arc::new(Mutex::new(Instant::now()));
    let mut heartbeat = spawn_heartbeat(&state, out_tx.clone(), last_pong.clone());

    // One forwarding task per joined room; membership is the receiver held
    // inside the task, so aborting the task leaves the room.
    let mut room_tasks: Vec<JoinHandle<()>> = Vec::new();

    loop {
        tokio::select! {
            maybe_frame = stream.next() => {
                match maybe_frame {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_event(
                            text.as_str(),
                            &principal,
                            &state,
                            &out_tx,
                            &mut room_tasks,
                        )
                        .await;
                    }
                    Some(Ok(Message::Pong(_))) => {
                        *last_pong.lock().unwrap() = Instant::now();
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            _ = &mut heartbeat => {
                tracing::info!(
                    "[Gateway] User {} timed out, closing connection",
                    principal.user_id
                );
                break;
            }
        }
    }

    // Disconnect: tear down every room membership and the shared writer.
    for task in &room_tasks {
        task.abort();
    }
    heartbeat.abort();
    drop(out_tx);
    writer.abort();

    tracing::info!("[Gateway] User {} disconnected", principal.user_id);
}

/// Parse and apply a client event
async fn handle_client_event(
    text: &str,
    principal: &Principal,
    state: &AppState,
    out_tx: &mpsc::Sender<Message>,
    room_tasks: &mut Vec<JoinHandle<()>>,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!("[Gateway] Unparseable client event: {:?}", e);
            send_event(
                out_tx,
                &ServerEvent::Error {
                    message: "unrecognized event".to_string(),
                },
            )
            .await;
            return;
        }
    };

    match event {
        ClientEvent::JoinConversation { conversation_id } => {
            let allowed = match &state.db_pool {
                Some(pool) => {
                    db::is_participant(pool, principal.user_id, conversation_id)
                        .await
                        .unwrap_or(false)
                }
                None => false,
            };

            if !allowed {
                tracing::warn!(
                    "[Gateway] User {} denied join to conversation {}",
                    principal.user_id,
                    conversation_id
                );
                send_event(
                    out_tx,
                    &ServerEvent::Error {
                        message: "not a participant of this conversation".to_string(),
                    },
                )
                .await;
                return;
            }

            let room_rx = state.hub.join(conversation_id);
            room_tasks.push(spawn_room_forwarder(room_rx, out_tx.clone()));
            tracing::info!(
                "[Gateway] User {} joined conversation {}",
                principal.user_id,
                conversation_id
            );
        }
    }
}

/// Forward one room's broadcasts to the connection's outbox
fn spawn_room_forwarder(
    mut room_rx: broadcast::Receiver<ServerEvent>,
    out_tx: mpsc::Sender<Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match room_rx.recv().await {
                Ok(event) => {
                    let json = match serde_json::to_string(&event) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!("[Gateway] Failed to serialize event: {:?}", e);
                            continue;
                        }
                    };
                    if out_tx.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Dropped deliveries are not an error; the client
                    // catches up through the message listing endpoint.
                    tracing::warn!("[Gateway] Slow consumer skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Ping on an interval; finish (signalling a stale connection) when the
/// client has not answered within interval + timeout.
fn spawn_heartbeat(
    state: &AppState,
    out_tx: mpsc::Sender<Message>,
    last_pong: Arc<Mutex<Instant>>,
) -> JoinHandle<()> {
    let ping_interval = state.config.ping_interval;
    let ping_timeout = state.config.ping_timeout;

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(ping_interval);
        // The first tick fires immediately; skip it so a fresh connection
        // is not pinged before it finished the handshake.
        interval.tick().await;
        loop {
            interval.tick().await;

            let idle = last_pong.lock().unwrap().elapsed();
            if idle > ping_interval + ping_timeout {
                break;
            }

            if out_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                break;
            }
        }
    })
}

/// Serialize and queue an event for this connection only
async fn send_event(out_tx: &mpsc::Sender<Message>, event: &ServerEvent) {
    match serde_json::to_string(event) {
        Ok(json) => {
            let _ = out_tx.send(Message::Text(json.into())).await;
        }
        Err(e) => {
            tracing::error!("[Gateway] Failed to serialize event: {:?}", e);
        }
    }
}
