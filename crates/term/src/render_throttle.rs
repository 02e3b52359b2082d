//! Frame pacing for the board view.
//!
//! While dots are sliding or pulsing every tick is drawn. A still board is redrawn only when
//! what it shows changes, plus a slow heartbeat so terminal damage gets repaired.

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    idle_interval_ms: u64,
    last_draw_ms: Option<u64>,
    last_fingerprint: u64,
}

impl RenderThrottle {
    pub fn new(idle_interval_ms: u64) -> Self {
        Self {
            idle_interval_ms,
            last_draw_ms: None,
            last_fingerprint: 0,
        }
    }

    /// Decide whether to draw a frame at `now_ms`.
    ///
    /// `fingerprint` summarises the visible state (board hash, path, cursor, hud).
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, animating: bool) -> bool {
        let draw = match self.last_draw_ms {
            None => true,
            Some(_) if animating || fingerprint != self.last_fingerprint => true,
            Some(last) => now_ms.saturating_sub(last) >= self.idle_interval_ms,
        };
        if draw {
            self.last_draw_ms = Some(now_ms);
            self.last_fingerprint = fingerprint;
        }
        draw
    }

    /// Make the next call draw unconditionally (terminal resized, board replaced).
    pub fn force(&mut self) {
        self.last_draw_ms = None;
    }
}

/// Mix values into a render fingerprint (FNV-1a over little-endian words).
pub fn fingerprint(parts: &[u64]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for part in parts {
        for b in part.to_le_bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x0000_0100_0000_01b3);
        }
    }
    h
}
