//! Lanyard presence client and the data model it publishes.
//!
//! The client owns one WebSocket session: subscribe handshake, server-paced
//! heartbeats, and wholesale state replacement on every inbound event. State
//! flows out through a `tokio::sync::watch` channel so any number of
//! consumers can sample the latest phase without buffering.

pub mod cdn;
pub mod client;
pub mod model;
pub mod profile;
pub mod view;
pub mod wire;

pub use client::{PresenceClient, PresenceHandle};
pub use model::{
    Activity, DiscordUser, OnlineStatus, PresenceSnapshot, ProfileSupplement, SpotifySession,
};
pub use view::{PresencePhase, PresenceView};
