//! Shared configuration types.
//!
//! Every tuning constant of the effects layer and the presence client lives
//! here as injected configuration rather than an embedded constant, so tests
//! and the app can substitute values. `Default` impls carry the shipped
//! values.

use serde::{Deserialize, Serialize};

/// Presence client configuration: which account to track and where the
/// external services live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Discord account id subscribed to on the Lanyard socket.
    pub account_id: String,
    /// Lanyard WebSocket endpoint.
    pub socket_url: String,
    /// Profile supplement endpoint (banner, clan). The account id is
    /// appended as a path segment.
    pub profile_url: String,
    /// Discord CDN base for avatars, banners and emoji.
    pub cdn_base: String,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            account_id: "1006197798577909880".to_string(),
            socket_url: "wss://api.lanyard.rest/socket".to_string(),
            profile_url: "https://dcdn.dstn.to/profile".to_string(),
            cdn_base: "https://cdn.discordapp.com".to_string(),
        }
    }
}

/// Noise field tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Internal buffer scale relative to the viewport (0.25 = quarter
    /// linear resolution, upscaled pixelated).
    pub scale: f32,
    /// Buffer regeneration rate in updates per second.
    pub fps: f32,
    /// Alpha of every noise pixel (0-255).
    pub alpha: u8,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { scale: 0.25, fps: 15.0, alpha: 10 }
    }
}

/// Cursor distortion halo tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionConfig {
    /// Per-frame low-pass factor toward the pointer target. Applied per
    /// rendered frame, not per unit time, matching the source behavior.
    pub ease: f32,
    /// Halo opacity while the pointer is moving.
    pub active_opacity: f32,
    /// Halo opacity after the idle deadline passes.
    pub resting_opacity: f32,
    /// Milliseconds without motion before the halo dims.
    pub idle_ms: u64,
    /// Halo disc radius in pixels.
    pub halo_radius: f32,
    /// Glitch ring radius in pixels.
    pub ring_radius: f32,
}

impl Default for DistortionConfig {
    fn default() -> Self {
        Self {
            ease: 0.15,
            active_opacity: 1.0,
            resting_opacity: 0.6,
            idle_ms: 150,
            halo_radius: 128.0,
            ring_radius: 64.0,
        }
    }
}

/// Glitch trail tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Fixed token pool capacity. Insertion recycles the oldest slot.
    pub capacity: usize,
    /// Minimum milliseconds between spawned tokens.
    pub throttle_ms: u64,
    /// Uniform jitter applied to the spawn position, in pixels each side.
    pub jitter: f32,
    /// Opacity lost per tick by every live token.
    pub fade_per_tick: f32,
    /// Glyphs a token may be assigned.
    pub glyphs: String,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 12,
            throttle_ms: 80,
            jitter: 15.0,
            fade_per_tick: 0.04,
            glyphs: "█▓▒░╔╗╚╝║═◢◣◤◥▲▼◀▶●○■□".to_string(),
        }
    }
}

/// Signal text reveal tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalTextConfig {
    /// Typewriter tick period in milliseconds.
    pub type_ms: u64,
    /// Decode pass period in milliseconds.
    pub decode_ms: u64,
    /// Number of decode passes before the full string is shown.
    pub decode_passes: usize,
    /// Glyphs substituted for not-yet-revealed characters.
    pub decode_glyphs: String,
    /// Period between post-completion glitch rolls, in milliseconds.
    pub glitch_period_ms: u64,
    /// Probability that a roll triggers a glitch pulse.
    pub glitch_chance: f64,
    /// Glitch pulse duration in milliseconds.
    pub glitch_ms: u64,
}

impl Default for SignalTextConfig {
    fn default() -> Self {
        Self {
            type_ms: 60,
            decode_ms: 40,
            decode_passes: 8,
            decode_glyphs: "▓▒░█▄▀■□●○".to_string(),
            glitch_period_ms: 3000,
            glitch_chance: 0.03,
            glitch_ms: 80,
        }
    }
}

/// Coordinates readout tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatesConfig {
    /// Anchor latitude in degrees north.
    pub lat: f64,
    /// Anchor longitude in degrees east.
    pub lng: f64,
    /// Maximum drift around the anchor, in degrees each side.
    pub drift: f64,
    /// Milliseconds between drift steps.
    pub drift_ms: u64,
    /// Milliseconds before the readout becomes visible.
    pub show_delay_ms: u64,
}

impl Default for CoordinatesConfig {
    fn default() -> Self {
        Self {
            lat: 48.8566,
            lng: 2.3522,
            drift: 0.0001,
            drift_ms: 4000,
            show_delay_ms: 200,
        }
    }
}

/// Combined effects-layer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub noise: NoiseConfig,
    pub distortion: DistortionConfig,
    pub trail: TrailConfig,
    pub signal_text: SignalTextConfig,
    pub coordinates: CoordinatesConfig,
}

/// Frame capture settings for the headless binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Composited frame width in pixels.
    pub width: u32,
    /// Composited frame height in pixels.
    pub height: u32,
    /// Compositor tick rate in frames per second.
    pub fps: f32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { width: 960, height: 540, fps: 60.0 }
    }
}
