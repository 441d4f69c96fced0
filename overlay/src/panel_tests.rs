use noisefloor_core::presence::model::{Activity, DiscordUser, SpotifySession, TrackWindow};
use noisefloor_core::presence::{OnlineStatus, PresencePhase, PresenceSnapshot, ProfileSupplement};

use super::{custom_status_line, parse_hex_color, PresencePanel};
use crate::surface::Surface;

fn live_snapshot() -> PresenceSnapshot {
    PresenceSnapshot {
        discord_user: DiscordUser {
            id: "1".to_string(),
            username: "operator".to_string(),
            global_name: Some("Operator".to_string()),
            ..DiscordUser::default()
        },
        discord_status: OnlineStatus::Online,
        activities: vec![Activity {
            name: "Blender".to_string(),
            kind: 0,
            details: Some("Sculpting".to_string()),
            ..Activity::default()
        }],
        listening_to_spotify: true,
        spotify: Some(SpotifySession {
            song: "Track".to_string(),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            album_art_url: String::new(),
            track_id: None,
            timestamps: TrackWindow { start: 0, end: 180_000 },
        }),
    }
}

fn painted_pixels(surface: &Surface) -> usize {
    surface
        .pixmap()
        .pixels()
        .iter()
        .filter(|p| p.alpha() != 0)
        .count()
}

// ── phase rendering ─────────────────────────────────────────────────────

#[test]
fn every_phase_paints_something() {
    let panel = PresencePanel::new(20.0, 20.0, 320.0);
    for phase in [
        PresencePhase::Connecting,
        PresencePhase::Failed,
        PresencePhase::Live(Box::new(live_snapshot())),
    ] {
        let mut surface = Surface::new(400, 500).unwrap();
        panel.render(&mut surface, &phase, 60_000);
        assert!(painted_pixels(&surface) > 0, "nothing painted for {phase:?}");
    }
}

#[test]
fn live_card_grows_with_activity_content() {
    let panel = PresencePanel::new(0.0, 0.0, 320.0);

    let mut bare = live_snapshot();
    bare.activities.clear();
    bare.listening_to_spotify = false;
    bare.spotify = None;

    let mut small = Surface::new(400, 600).unwrap();
    panel.render(&mut small, &PresencePhase::Live(Box::new(bare)), 0);

    let mut large = Surface::new(400, 600).unwrap();
    panel.render(&mut large, &PresencePhase::Live(Box::new(live_snapshot())), 0);

    assert!(painted_pixels(&large) > painted_pixels(&small));
}

#[test]
fn supplement_banner_color_changes_the_banner_strip() {
    let mut panel = PresencePanel::new(0.0, 0.0, 320.0);
    let mut plain = Surface::new(400, 600).unwrap();
    panel.render(&mut plain, &PresencePhase::Live(Box::new(live_snapshot())), 0);

    panel.set_supplement(Some(ProfileSupplement {
        banner: None,
        banner_color: Some("#ff0044".to_string()),
        clan: None,
    }));
    let mut tinted = Surface::new(400, 600).unwrap();
    panel.render(&mut tinted, &PresencePhase::Live(Box::new(live_snapshot())), 0);

    assert_ne!(plain.pixmap().data(), tinted.pixmap().data());
}

// ── helpers ─────────────────────────────────────────────────────────────

#[test]
fn hex_banner_colors_parse_or_fall_through() {
    assert_eq!(parse_hex_color("#ff0044"), Some([255, 0, 68, 255]));
    assert_eq!(parse_hex_color("#FFAA00"), Some([255, 170, 0, 255]));
    assert_eq!(parse_hex_color("ff0044"), None, "missing hash");
    assert_eq!(parse_hex_color("#ff004"), None, "short");
    assert_eq!(parse_hex_color("#zzzzzz"), None, "not hex");
}

#[test]
fn multi_byte_banner_color_is_rejected_not_a_panic() {
    // Six bytes, but U+2502 straddles what byte-indexed slicing would cut.
    assert_eq!(parse_hex_color("#a\u{2502}xx"), None);
    assert_eq!(parse_hex_color("#ffff░"), None);

    let mut panel = PresencePanel::new(0.0, 0.0, 320.0);
    panel.set_supplement(Some(ProfileSupplement {
        banner: None,
        banner_color: Some("#a\u{2502}xx".to_string()),
        clan: None,
    }));
    let mut surface = Surface::new(400, 600).unwrap();
    panel.render(&mut surface, &PresencePhase::Live(Box::new(live_snapshot())), 0);
}

#[test]
fn custom_status_joins_emoji_and_text() {
    assert_eq!(custom_status_line(Some("🔥"), Some("shipping")), "🔥 shipping");
    assert_eq!(custom_status_line(Some("🔥"), None), "🔥");
    assert_eq!(custom_status_line(None, Some("shipping")), "shipping");
    assert_eq!(custom_status_line(None, None), "");
}
