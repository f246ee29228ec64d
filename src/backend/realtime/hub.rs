//! Room Fan-out Hub
//!
//! This module provides the in-process publish/subscribe layer for live
//! message delivery. Each conversation gets its own `tokio::sync::broadcast`
//! channel ("room"), created lazily on first join, so events for one
//! conversation never reach subscribers of another.
//!
//! # Delivery Semantics
//!
//! - Joining a room is subscribing to its channel; membership ends when the
//!   receiver is dropped (connection closed).
//! - Broadcasts reach every receiver subscribed at send time, in send
//!   order, including the sender's own connection if it joined the room.
//! - Delivery is best-effort: a lagged or closed receiver misses events
//!   silently. The message listing endpoint is the durable catch-up path.
//!
//! # Scaling
//!
//! Room state is process-local. Running more than one server process
//! requires an external pub/sub backplane behind this same
//! `join`/`broadcast` contract; that is a deployment concern, not core
//! logic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::shared::event::ServerEvent;

/// Capacity of each room's broadcast channel
const ROOM_CHANNEL_CAPACITY: usize = 100;

/// Per-conversation broadcast rooms
///
/// Cloning is cheap and shares the underlying room table, so the hub can
/// be stored in the application state and handed to every handler.
#[derive(Clone, Default)]
pub struct RoomHub {
    rooms: Arc<Mutex<HashMap<Uuid, broadcast::Sender<ServerEvent>>>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Join a conversation's room, creating the room lazily.
    ///
    /// The returned receiver is the membership: dropping it leaves the
    /// room. A connection may hold receivers for any number of rooms.
    pub fn join(&self, conversation_id: Uuid) -> broadcast::Receiver<ServerEvent> {
        let mut rooms = self.rooms.lock().unwrap();
        rooms
            .entry(conversation_id)
            .or_insert_with(|| broadcast::channel(ROOM_CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Broadcast an event to every current member of a room.
    ///
    /// Returns the number of receivers the event was handed to. A room
    /// with no members (or that never existed) is not an error; the event
    /// is simply dropped.
    pub fn broadcast(&self, conversation_id: Uuid, event: ServerEvent) -> usize {
        let sender = {
            let rooms = self.rooms.lock().unwrap();
            rooms.get(&conversation_id).cloned()
        };

        match sender {
            Some(sender) => sender.send(event).unwrap_or(0),
            None => 0,
        }
    }

    /// Current member count of a room
    pub fn subscriber_count(&self, conversation_id: Uuid) -> usize {
        let rooms = self.rooms.lock().unwrap();
        rooms
            .get(&conversation_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Drop rooms that no connection is subscribed to anymore
    pub fn cleanup_inactive(&self) {
        self.rooms
            .lock()
            .unwrap()
            .retain(|_, sender| sender.receiver_count() > 0);
    }

    /// Number of rooms currently held (including inactive ones)
    pub fn room_count(&self) -> usize {
        self.rooms.lock().unwrap().len()
    }
}
