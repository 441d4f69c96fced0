//! Display derivation from the latest presence snapshot.
//!
//! The panel never reads the raw snapshot; it renders a [`PresenceView`]
//! derived from exactly one snapshot plus the optional profile supplement.
//! A later snapshot fully replaces an earlier one, so derivation is a pure
//! function of the most recent message.

use super::model::{
    ACTIVITY_CUSTOM, ACTIVITY_PLAYING, Emoji, OnlineStatus, PresenceSnapshot, ProfileSupplement,
};

/// Lifecycle of the presence session as published by the client.
#[derive(Debug, Clone, Default)]
pub enum PresencePhase {
    /// Connected (or connecting) but no event received yet. Renders the
    /// loading skeleton, never the offline/empty card.
    #[default]
    Connecting,
    /// Latest snapshot, replaced wholesale on every event.
    Live(Box<PresenceSnapshot>),
    /// Terminal connection failure. No retry; stale data is never shown.
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomStatusView {
    pub text: Option<String>,
    pub emoji: Option<Emoji>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayingView {
    pub name: String,
    pub details: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpotifyView {
    pub song: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    /// Track window in unix milliseconds.
    pub start_ms: u64,
    pub end_ms: u64,
}

impl SpotifyView {
    /// Elapsed and total track seconds for the given wall clock, clamped
    /// into the track window.
    pub fn progress_secs(&self, now_ms: u64) -> (u64, u64) {
        let length = self.end_ms.saturating_sub(self.start_ms) / 1000;
        let elapsed = (now_ms.saturating_sub(self.start_ms) / 1000).min(length);
        (elapsed, length)
    }
}

/// Everything the presence panel draws, derived from the latest snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresenceView {
    pub status: OnlineStatus,
    pub display_name: String,
    pub username: String,
    pub avatar_hash: Option<String>,
    pub clan_tag: Option<String>,
    pub custom_status: Option<CustomStatusView>,
    pub playing: Option<PlayingView>,
    pub spotify: Option<SpotifyView>,
}

impl PresenceView {
    /// Derive the displayable view. Among inbound activities, at most one
    /// playing activity (first with category 0) and one custom status
    /// (first with category 4, kept only if it carries text or an emoji)
    /// are surfaced; a Spotify session is surfaced independently.
    pub fn derive(snapshot: &PresenceSnapshot, supplement: Option<&ProfileSupplement>) -> Self {
        let user = &snapshot.discord_user;

        let display_name = user
            .global_name
            .clone()
            .or_else(|| user.display_name.clone())
            .unwrap_or_else(|| user.username.clone());

        // Supplement clan wins over the snapshot clan.
        let clan_tag = supplement
            .and_then(|p| p.clan.as_ref().map(|c| c.tag.clone()))
            .or_else(|| user.clan.as_ref().map(|c| c.tag.clone()));

        let playing = snapshot
            .activities
            .iter()
            .find(|a| a.kind == ACTIVITY_PLAYING)
            .map(|a| PlayingView {
                name: a.name.clone(),
                details: a.details.clone(),
                state: a.state.clone(),
            });

        let custom_status = snapshot
            .activities
            .iter()
            .find(|a| a.kind == ACTIVITY_CUSTOM)
            .filter(|a| a.state.is_some() || a.emoji.is_some())
            .map(|a| CustomStatusView {
                text: a.state.clone(),
                emoji: a.emoji.clone(),
            });

        let spotify = snapshot.spotify.as_ref().map(|s| SpotifyView {
            song: s.song.clone(),
            artist: s.artist.clone(),
            album: s.album.clone(),
            album_art_url: s.album_art_url.clone(),
            start_ms: s.timestamps.start,
            end_ms: s.timestamps.end,
        });

        Self {
            status: snapshot.discord_status,
            display_name,
            username: user.username.clone(),
            avatar_hash: user.avatar.clone(),
            clan_tag,
            custom_status,
            playing,
            spotify,
        }
    }

    /// Whether the explicit "no current activity" placeholder applies:
    /// nothing playing, no Spotify session, and the account is not offline.
    pub fn show_no_activity(&self) -> bool {
        self.playing.is_none() && self.spotify.is_none() && self.status != OnlineStatus::Offline
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod view_tests;
