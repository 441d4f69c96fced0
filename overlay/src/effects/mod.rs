//! Self-contained cosmetic effects.
//!
//! Every effect owns its private animation state and advances it from
//! ambient input only: the tick clock, the viewport, and the pointer.
//! Anything an effect schedules (throttles, debounce deadlines, reveal
//! ticks) lives inside the effect and is reset by `detach`, so tearing a
//! stack down leaves nothing pending.
//!
//! # Effect Trait
//!
//! All effects implement [`Effect`], which gives the scene a unified
//! advance/paint interface regardless of the effect type.

mod coordinates;
mod distortion;
mod noise;
mod signal_text;
mod trail;

pub use coordinates::CoordinatesReadout;
pub use distortion::CursorDistortion;
pub use noise::NoiseField;
pub use signal_text::{RevealMode, SignalText};
pub use trail::GlitchTrail;

use std::time::Instant;

use crate::surface::Surface;

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Ambient input for one compositor tick.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Tick clock. Tests drive this directly instead of mocking timers.
    pub now: Instant,
    pub viewport: Viewport,
    /// Pointer position, if a pointer is present.
    pub pointer: Option<(f32, f32)>,
    /// Whether the pointer moved since the previous tick.
    pub pointer_moved: bool,
}

impl FrameInput {
    pub fn new(now: Instant, viewport: Viewport) -> Self {
        Self { now, viewport, pointer: None, pointer_moved: false }
    }

    pub fn with_pointer(mut self, x: f32, y: f32, moved: bool) -> Self {
        self.pointer = Some((x, y));
        self.pointer_moved = moved;
        self
    }
}

/// Trait implemented by all effects.
pub trait Effect {
    /// Advance internal state for one tick.
    fn update(&mut self, input: &FrameInput);

    /// Paint the current state onto the surface.
    fn paint(&mut self, surface: &mut Surface);

    /// Drop all pending animation state (throttles, deadlines, reveal
    /// progress). Called when the owning stack detaches the effect.
    fn detach(&mut self);
}

/// Owned, ordered stack of effects. Attach order is paint order. Detaching
/// (or dropping) the stack resets every effect so no private timer state
/// survives teardown.
#[derive(Default)]
pub struct EffectStack {
    effects: Vec<Box<dyn Effect>>,
}

impl EffectStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, effect: Box<dyn Effect>) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn update(&mut self, input: &FrameInput) {
        for effect in &mut self.effects {
            effect.update(input);
        }
    }

    pub fn paint(&mut self, surface: &mut Surface) {
        for effect in &mut self.effects {
            effect.paint(surface);
        }
    }

    /// Detach and drop every effect, resetting their state first.
    pub fn detach_all(&mut self) {
        for effect in &mut self.effects {
            effect.detach();
        }
        self.effects.clear();
    }
}

impl Drop for EffectStack {
    fn drop(&mut self) {
        self.detach_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    struct Probe {
        detached: Arc<AtomicUsize>,
    }

    impl Effect for Probe {
        fn update(&mut self, _input: &FrameInput) {}
        fn paint(&mut self, _surface: &mut Surface) {}
        fn detach(&mut self) {
            self.detached.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn dropping_a_stack_detaches_every_effect() {
        let detached = Arc::new(AtomicUsize::new(0));
        {
            let mut stack = EffectStack::new();
            stack.attach(Box::new(Probe { detached: detached.clone() }));
            stack.attach(Box::new(Probe { detached: detached.clone() }));
            let input = FrameInput::new(
                Instant::now(),
                Viewport { width: 100, height: 100 },
            );
            stack.update(&input);
        }
        assert_eq!(detached.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn detach_all_resets_then_empties() {
        let detached = Arc::new(AtomicUsize::new(0));
        let mut stack = EffectStack::new();
        stack.attach(Box::new(Probe { detached: detached.clone() }));
        stack.detach_all();
        assert!(stack.is_empty());
        assert_eq!(detached.load(Ordering::SeqCst), 1);
        drop(stack);
        // Already detached; dropping the empty stack adds nothing.
        assert_eq!(detached.load(Ordering::SeqCst), 1);
    }
}
