/**
 * Wire Protocol Types
 *
 * This module defines the type-tagged messages exchanged over the room
 * WebSocket, plus the presence and room view records shared with the REST
 * surface.
 *
 * # Message Shape
 *
 * Every structured frame is a JSON object with a `type` discriminator and
 * type-specific payload fields. Inbound frames deserialize into
 * `ClientMessage`; outbound frames serialize from `ServerMessage`. Unknown
 * inbound types map to `ClientMessage::Unknown` and are silently ignored
 * by the dispatcher.
 *
 * # Binary Frames
 *
 * Raw binary frames carry document updates directly and never pass through
 * these types; they are applied and rebroadcast verbatim.
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transient per-user metadata visible to other room members
///
/// Created on a `join` message, updated in place by `cursor`/`selection`
/// messages, and deleted on disconnect. The `simulated` flag marks entries
/// created by the load-simulation interface so they can be bulk-removed
/// without touching organically joined users; it is omitted from JSON for
/// organic users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPresence {
    /// Client id this presence entry belongs to
    pub id: String,
    /// Display name shown to other participants
    pub name: String,
    /// Display color (hex string)
    pub color: String,
    /// Optional avatar reference
    pub avatar_url: Option<String>,
    /// Last reported cursor position (opaque to the hub)
    pub cursor_position: Option<Value>,
    /// Last reported selection range (opaque to the hub)
    pub selection: Option<Value>,
    /// Set for synthetic load-test users
    #[serde(default, skip_serializing_if = "is_false")]
    pub simulated: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl UserPresence {
    /// Build a presence entry from a `join` message, filling defaults
    ///
    /// Missing names default to `User-<first 6 chars of the client id>`,
    /// missing colors to the default blue.
    pub fn from_join(
        client_id: &str,
        name: Option<String>,
        color: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        let short_id: String = client_id.chars().take(6).collect();
        Self {
            id: client_id.to_string(),
            name: name.unwrap_or_else(|| format!("User-{short_id}")),
            color: color.unwrap_or_else(|| "#3B82F6".to_string()),
            avatar_url,
            cursor_position: None,
            selection: None,
            simulated: false,
        }
    }
}

/// Single-room view returned by the REST room endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomInfo {
    pub id: String,
    pub name: String,
    pub user_count: usize,
    pub doc_size: usize,
    pub users: Vec<UserPresence>,
}

/// Inbound structured message, classified by its `type` field
///
/// Payload fields are optional across the board; the dispatcher applies
/// defaults or ignores the message when a precondition is missing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// User joining with display info
    Join {
        name: Option<String>,
        color: Option<String>,
        avatar_url: Option<String>,
    },
    /// Cursor position update
    Cursor { position: Option<Value> },
    /// Selection range update
    Selection { selection: Option<Value> },
    /// Awareness protocol relay, opaque payload
    Awareness { data: Option<Value> },
    /// Client requesting a full snapshot
    SyncRequest,
    /// Document update, hex encoded
    Update { data: Option<String> },
    /// Liveness probe, echoed back as `pong`
    Ping { timestamp: Option<Value> },
    /// Any unrecognized type; dispatched as a no-op
    #[serde(other)]
    Unknown,
}

/// Outbound structured message, tagged the same way as inbound frames
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Full snapshot push, hex encoded
    Sync { data: String },
    /// Current presence list, sent once after connect
    Users { users: Vec<UserPresence> },
    UserJoined { user: UserPresence },
    UserLeft { user_id: String },
    Cursor {
        user_id: String,
        position: Option<Value>,
    },
    Selection {
        user_id: String,
        selection: Option<Value>,
    },
    Awareness {
        user_id: String,
        data: Option<Value>,
    },
    /// Rebroadcast document update with the sender id
    Update { data: String, from: String },
    Pong { timestamp: Option<Value> },
    /// Direct error reply for malformed frames; connection stays open
    Error { message: String },
}
