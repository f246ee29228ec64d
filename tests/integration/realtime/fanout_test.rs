//! End-to-end shaped tests for the room hub
//!
//! These exercise the fan-out scenarios the gateway relies on: room
//! scoping, sender-inclusive delivery, ordering relative to later
//! messages, and the persist-before-broadcast rule.

use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use tokio::sync::broadcast::error::TryRecvError;
use uuid::Uuid;

use talkwire::shared::chat::ChatMessage;
use talkwire::shared::event::ServerEvent;

use crate::common::{principal_header, test_server, test_state};

fn persisted(conversation_id: Uuid, sender_id: Uuid, content: &str) -> ChatMessage {
    ChatMessage {
        id: Uuid::new_v4(),
        conversation_id,
        sender_id,
        content: content.to_string(),
        is_read: false,
        deleted: false,
        created_at: Utc::now(),
    }
}

/// Scenario: two participants joined to the same room both receive the
/// message (the sender included), a third user in another room receives
/// nothing.
#[tokio::test]
async fn test_broadcast_reaches_both_members_and_nobody_else() {
    let state = test_state();
    let c1 = Uuid::new_v4();
    let other = Uuid::new_v4();
    let u1 = Uuid::new_v4();

    let mut u1_conn = state.hub.join(c1);
    let mut u2_conn = state.hub.join(c1);
    let mut u3_conn = state.hub.join(other);

    let delivered = state
        .hub
        .broadcast(c1, ServerEvent::ChatMessage(persisted(c1, u1, "hello")));
    assert_eq!(delivered, 2);

    // Sender-inclusive policy: U1's own connection receives the event too.
    for conn in [&mut u1_conn, &mut u2_conn] {
        let event = conn.recv().await.unwrap();
        assert_matches!(event, ServerEvent::ChatMessage(ref message) => {
            assert_eq!(message.content, "hello");
            assert_eq!(message.conversation_id, c1);
        });
    }

    assert_matches!(u3_conn.try_recv(), Err(TryRecvError::Empty));
}

/// Scenario: messages sent while a participant is away are not replayed
/// by the hub on rejoin; the store listing is the catch-up path.
#[tokio::test]
async fn test_rejoin_does_not_replay_missed_broadcasts() {
    let state = test_state();
    let c1 = Uuid::new_v4();
    let u2 = Uuid::new_v4();

    let u1_conn = state.hub.join(c1);
    drop(u1_conn); // U1 disconnects

    let mut u2_conn = state.hub.join(c1);
    state
        .hub
        .broadcast(c1, ServerEvent::ChatMessage(persisted(c1, u2, "while away")));
    u2_conn.recv().await.unwrap();

    // U1 reconnects; the room holds no history for it.
    let mut u1_again = state.hub.join(c1);
    assert_matches!(u1_again.try_recv(), Err(TryRecvError::Empty));
}

/// A send that fails validation must not emit any event to room members,
/// even though the room has live subscribers.
#[tokio::test]
async fn test_failed_send_emits_no_event() {
    let state = test_state();
    let server = test_server(state.clone());
    let c1 = Uuid::new_v4();
    let u1 = Uuid::new_v4();
    let (name, value) = principal_header(u1);

    let mut u2_conn = state.hub.join(c1);

    let response = server
        .post("/messages")
        .add_header(name, value)
        .json(&json!({
            "conversationId": c1,
            "senderId": u1,
            "content": "",
        }))
        .await;
    assert_eq!(response.status_code(), axum::http::StatusCode::BAD_REQUEST);

    assert_matches!(u2_conn.try_recv(), Err(TryRecvError::Empty));
}

/// Broadcasts within one room arrive in send order relative to each other.
#[tokio::test]
async fn test_interleaved_rooms_keep_per_room_order() {
    let state = test_state();
    let room_a = Uuid::new_v4();
    let room_b = Uuid::new_v4();
    let sender = Uuid::new_v4();

    let mut conn_a = state.hub.join(room_a);
    let mut conn_b = state.hub.join(room_b);

    state
        .hub
        .broadcast(room_a, ServerEvent::ChatMessage(persisted(room_a, sender, "a1")));
    state
        .hub
        .broadcast(room_b, ServerEvent::ChatMessage(persisted(room_b, sender, "b1")));
    state
        .hub
        .broadcast(room_a, ServerEvent::ChatMessage(persisted(room_a, sender, "a2")));

    let expect = |event: ServerEvent, content: &str| {
        assert_matches!(event, ServerEvent::ChatMessage(ref message) => {
            assert_eq!(message.content, content);
        });
    };

    expect(conn_a.recv().await.unwrap(), "a1");
    expect(conn_a.recv().await.unwrap(), "a2");
    expect(conn_b.recv().await.unwrap(), "b1");
    assert_matches!(conn_a.try_recv(), Err(TryRecvError::Empty));
}
