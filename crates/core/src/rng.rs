//! RNG module - color sampling for new dots
//!
//! Every color the engine assigns (initial fill, reset, refill after a clear) is drawn
//! through [`ColorSource`], so tests can script exact outcomes and games can be replayed
//! from a seed.

use crate::types::ColorId;

/// Anything that can hand out dot colors.
pub trait ColorSource {
    /// Draw a color in `[0, num_colors)`. `num_colors` is never zero.
    fn next_color(&mut self, num_colors: u8) -> ColorId;
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would stall the low bits for several steps.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high 16 bits; the low bits of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() >> 16) * max) >> 16
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ColorSource for SimpleRng {
    fn next_color(&mut self, num_colors: u8) -> ColorId {
        self.next_range(num_colors as u32) as ColorId
    }
}

/// Replays a fixed list of colors, cycling when exhausted.
///
/// Values are reduced modulo the requested color count so a script written for a larger
/// palette stays valid.
#[derive(Debug, Clone)]
pub struct ScriptedColors {
    script: Vec<ColorId>,
    pos: usize,
}

impl ScriptedColors {
    pub fn new(script: Vec<ColorId>) -> Self {
        Self { script, pos: 0 }
    }
}

impl ColorSource for ScriptedColors {
    fn next_color(&mut self, num_colors: u8) -> ColorId {
        if self.script.is_empty() {
            return 0;
        }
        let c = self.script[self.pos % self.script.len()];
        self.pos += 1;
        c % num_colors
    }
}
