//! Frame compositor for the noisefloor presence card.
//!
//! A [`Scene`] owns a pixel surface, a stack of cosmetic effects and the
//! presence panel; each tick it advances every effect from ambient input
//! (pointer position, elapsed time, viewport) and repaints. Effects are
//! fully self-contained: none of them shares state with the presence
//! client or with each other.

pub mod effects;
pub mod panel;
pub mod scene;
pub mod surface;
pub mod text;
pub mod utils;
pub mod widgets;

pub use effects::{Effect, EffectStack, FrameInput, Viewport};
pub use panel::PresencePanel;
pub use scene::Scene;
pub use surface::Surface;
