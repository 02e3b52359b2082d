//! Presentation-side tweens.
//!
//! The engine's state is final the moment a clear returns; these timers only decide where a
//! dot is drawn while it slides into place, and how large a freshly selected dot looks.
//! They advance from the frame loop and never call back into the engine.

use std::collections::HashMap;

use crate::core::{CellTransition, Vec2};
use crate::types::{CellIndex, DROP_ANIM_MS, PULSE_MS, PULSE_SCALE};

/// Linear move between two world positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: Vec2,
    to: Vec2,
    elapsed_ms: u32,
    duration_ms: u32,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            elapsed_ms: 0,
            duration_ms,
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms).min(self.duration_ms);
    }

    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.elapsed_ms as f32 / self.duration_ms as f32
    }

    pub fn position(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress())
    }

    pub fn done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// Grow to `peak` over one half-period, then shrink back over the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    elapsed_ms: u32,
    half_ms: u32,
    peak: f32,
}

impl Pulse {
    pub fn new(half_ms: u32, peak: f32) -> Self {
        Self {
            elapsed_ms: 0,
            half_ms,
            peak,
        }
    }

    pub fn tick(&mut self, dt_ms: u32) {
        self.elapsed_ms = self
            .elapsed_ms
            .saturating_add(dt_ms)
            .min(self.half_ms.saturating_mul(2));
    }

    pub fn scale(&self) -> f32 {
        if self.half_ms == 0 || self.done() {
            return 1.0;
        }
        let t = if self.elapsed_ms <= self.half_ms {
            self.elapsed_ms as f32 / self.half_ms as f32
        } else {
            (2 * self.half_ms - self.elapsed_ms) as f32 / self.half_ms as f32
        };
        1.0 + (self.peak - 1.0) * t
    }

    pub fn done(&self) -> bool {
        self.elapsed_ms >= self.half_ms.saturating_mul(2)
    }
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new(PULSE_MS, PULSE_SCALE)
    }
}

/// Per-cell drop and pulse timers for the board.
#[derive(Debug, Clone, Default)]
pub struct BoardAnimator {
    drops: HashMap<CellIndex, Tween>,
    pulses: HashMap<CellIndex, Pulse>,
}

impl BoardAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a slide for every cell a clear touched.
    pub fn play_clear(&mut self, transitions: &[CellTransition]) {
        for t in transitions {
            self.drops
                .insert(t.index, Tween::new(t.from, t.to, DROP_ANIM_MS));
        }
    }

    /// (Re)start the selection pulse on `cell`.
    pub fn play_pulse(&mut self, cell: CellIndex) {
        self.pulses.insert(cell, Pulse::default());
    }

    pub fn tick(&mut self, dt_ms: u32) {
        for t in self.drops.values_mut() {
            t.tick(dt_ms);
        }
        for p in self.pulses.values_mut() {
            p.tick(dt_ms);
        }
        self.drops.retain(|_, t| !t.done());
        self.pulses.retain(|_, p| !p.done());
    }

    /// Where `cell`'s dot is currently drawn, if it is still moving.
    pub fn position(&self, cell: CellIndex) -> Option<Vec2> {
        self.drops.get(&cell).map(Tween::position)
    }

    pub fn scale(&self, cell: CellIndex) -> f32 {
        self.pulses.get(&cell).map(Pulse::scale).unwrap_or(1.0)
    }

    pub fn is_animating(&self) -> bool {
        !self.drops.is_empty() || !self.pulses.is_empty()
    }

    /// Drop every timer (board replaced).
    pub fn clear(&mut self) {
        self.drops.clear();
        self.pulses.clear();
    }
}
