//! Lanyard socket envelope: `{op, d}` frames.
//!
//! Outbound frames are built here so the exact wire shape is testable;
//! inbound frames are classified into [`Inbound`]. Malformed payloads are
//! surfaced as errors and dropped by the caller rather than ending the
//! session.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use super::model::PresenceSnapshot;

pub const OP_EVENT: u8 = 0;
pub const OP_HELLO: u8 = 1;
pub const OP_SUBSCRIBE: u8 = 2;
pub const OP_HEARTBEAT: u8 = 3;

/// Subscribe envelope, sent once immediately after the socket opens.
pub fn subscribe_frame(account_id: &str) -> String {
    json!({ "op": OP_SUBSCRIBE, "d": { "subscribe_to_id": account_id } }).to_string()
}

/// Heartbeat envelope, sent on the server-dictated period.
pub fn heartbeat_frame() -> String {
    json!({ "op": OP_HEARTBEAT }).to_string()
}

/// Classified inbound frame.
#[derive(Debug)]
pub enum Inbound {
    /// `op=1`: begin heartbeating on this period.
    Hello { heartbeat_interval: Duration },
    /// `op=0`: wholesale presence replacement.
    Event(Box<PresenceSnapshot>),
    /// Any other opcode; ignored by the client.
    Ignored(u8),
}

#[derive(Deserialize)]
struct RawEnvelope {
    op: u8,
    #[serde(default)]
    d: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct HelloPayload {
    heartbeat_interval: u64,
}

/// Parse one inbound text frame into its classified form.
pub fn parse_inbound(text: &str) -> Result<Inbound, serde_json::Error> {
    let envelope: RawEnvelope = serde_json::from_str(text)?;
    let payload = envelope.d.unwrap_or(serde_json::Value::Null);

    match envelope.op {
        OP_HELLO => {
            let hello: HelloPayload = serde_json::from_value(payload)?;
            Ok(Inbound::Hello {
                heartbeat_interval: Duration::from_millis(hello.heartbeat_interval),
            })
        }
        OP_EVENT => {
            let snapshot: PresenceSnapshot = serde_json::from_value(payload)?;
            Ok(Inbound::Event(Box::new(snapshot)))
        }
        other => Ok(Inbound::Ignored(other)),
    }
}
