pub mod config;
pub mod formatting;

pub use config::{
    CaptureConfig, CoordinatesConfig, DistortionConfig, EffectsConfig, NoiseConfig,
    PresenceConfig, SignalTextConfig, TrailConfig,
};
