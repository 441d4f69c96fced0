//! Subset of the Lanyard payload the app consumes.
//!
//! Unknown fields are tolerated everywhere; a snapshot is replaced
//! wholesale on every inbound event, never merged field by field.

use serde::{Deserialize, Serialize};

/// Activity category code for a "playing" activity.
pub const ACTIVITY_PLAYING: u8 = 0;
/// Activity category code for a custom status.
pub const ACTIVITY_CUSTOM: u8 = 4;

/// Connection status of the tracked account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnlineStatus {
    Online,
    Idle,
    Dnd,
    #[default]
    Offline,
}

impl OnlineStatus {
    /// Uppercase label shown next to the status dot.
    pub fn label(self) -> &'static str {
        match self {
            OnlineStatus::Online => "ONLINE",
            OnlineStatus::Idle => "IDLE",
            OnlineStatus::Dnd => "DO NOT DISTURB",
            OnlineStatus::Offline => "OFFLINE",
        }
    }

    /// Status dot color as RGBA.
    pub fn color(self) -> [u8; 4] {
        match self {
            OnlineStatus::Online => [16, 185, 129, 255],
            OnlineStatus::Idle => [245, 158, 11, 255],
            OnlineStatus::Dnd => [239, 68, 68, 255],
            OnlineStatus::Offline => [82, 82, 91, 255],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clan {
    pub tag: String,
    #[serde(default)]
    pub identity_guild_id: Option<String>,
    #[serde(default)]
    pub identity_enabled: bool,
    #[serde(default)]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub discriminator: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub clan: Option<Clan>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub animated: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ActivityTimestamps {
    #[serde(default)]
    pub start: Option<u64>,
    #[serde(default)]
    pub end: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityAssets {
    #[serde(default)]
    pub large_image: Option<String>,
    #[serde(default)]
    pub large_text: Option<String>,
    #[serde(default)]
    pub small_image: Option<String>,
    #[serde(default)]
    pub small_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub emoji: Option<Emoji>,
    #[serde(default)]
    pub timestamps: Option<ActivityTimestamps>,
    #[serde(default)]
    pub assets: Option<ActivityAssets>,
    #[serde(default)]
    pub application_id: Option<String>,
}

/// Start/end of the current Spotify track, unix milliseconds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrackWindow {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpotifySession {
    #[serde(default)]
    pub track_id: Option<String>,
    pub song: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    pub timestamps: TrackWindow,
}

/// The latest known state of the tracked account, replaced wholesale on
/// every inbound `op=0` event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    pub discord_user: DiscordUser,
    #[serde(default)]
    pub discord_status: OnlineStatus,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub listening_to_spotify: bool,
    #[serde(default)]
    pub spotify: Option<SpotifySession>,
}

/// Clan subset carried by the profile supplement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileClan {
    pub tag: String,
    #[serde(default)]
    pub badge: Option<String>,
}

/// Supplementary display data fetched once per run, independent of the
/// realtime stream. Absence of every field is a valid terminal state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSupplement {
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub banner_color: Option<String>,
    #[serde(default)]
    pub clan: Option<ProfileClan>,
}
