//! One play session: the engine plus everything the frame loop layers on top of it.
//!
//! `GameSession` is terminal-free. The binary feeds it pointer events and key commands and
//! asks it for a [`Scene`] to draw; tests drive it the same way.

use anyhow::Result;

use crate::config::{GameConfig, ResizeRequest};
use crate::core::{BoardEngine, BoardSnapshot, ColorSource, PointerOutcome, SimpleRng};
use crate::event_log::{EventLog, EventRecord};
use crate::term::{BoardAnimator, HudView, Scene};
use crate::types::{BoardCommand, Palette, PointerEvent};

/// How long a status message stays in the side panel.
pub const MESSAGE_MS: u32 = 2000;

pub struct GameSession<R: ColorSource = SimpleRng> {
    engine: BoardEngine<R>,
    animator: BoardAnimator,
    palette: Palette,
    log: EventLog,
    last_clear: u32,
    last_looped: bool,
    message: Option<(&'static str, u32)>,
}

impl GameSession<SimpleRng> {
    pub fn new(config: &GameConfig, log: EventLog) -> Result<Self> {
        let engine = BoardEngine::seeded(config.rows, config.cols, config.colors, config.seed)?;
        Ok(Self::with_engine(engine, log))
    }
}

impl<R: ColorSource> GameSession<R> {
    pub fn with_engine(engine: BoardEngine<R>, log: EventLog) -> Self {
        log.record(EventRecord::board_init(&engine.snapshot()));
        Self {
            engine,
            animator: BoardAnimator::new(),
            palette: Palette::default(),
            log,
            last_clear: 0,
            last_looped: false,
            message: None,
        }
    }

    pub fn engine(&self) -> &BoardEngine<R> {
        &self.engine
    }

    pub fn animator(&self) -> &BoardAnimator {
        &self.animator
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message.map(|(msg, _)| msg)
    }

    /// Route one gesture step to the engine and start the matching animation.
    pub fn pointer(&mut self, event: PointerEvent) -> Result<PointerOutcome> {
        let outcome = self.engine.apply_pointer(event)?;
        match (&outcome, event) {
            (PointerOutcome::Started(color), PointerEvent::Down(cell)) => {
                self.animator.play_pulse(cell);
                self.log.record(EventRecord::SelectionBegin {
                    cell,
                    color: *color,
                });
            }
            (PointerOutcome::Extended, PointerEvent::Enter(cell)) => {
                self.animator.play_pulse(cell);
                self.log.record(EventRecord::SelectionExtend {
                    cell,
                    accepted: true,
                    path_len: self.engine.selection().len(),
                });
            }
            (PointerOutcome::Rejected, PointerEvent::Enter(cell)) => {
                self.log.record(EventRecord::SelectionExtend {
                    cell,
                    accepted: false,
                    path_len: self.engine.selection().len(),
                });
            }
            (PointerOutcome::Ended(result), _) if !result.is_noop() => {
                self.animator.play_clear(&result.transitions);
                self.last_clear = result.cleared.len() as u32;
                self.last_looped = result.looped;
                self.log.record(EventRecord::clear(result));
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Apply a key command. Rejected resizes leave the board alone and post a message.
    pub fn command(&mut self, cmd: BoardCommand) -> Result<()> {
        self.log.record(EventRecord::Command {
            name: cmd.as_str().to_string(),
        });
        match cmd {
            BoardCommand::Reset => self.engine.reset(),
            _ => {
                let (dr, dc) = cmd.resize_delta();
                match ResizeRequest::nudge(self.engine.rows(), self.engine.cols(), (dr, dc)) {
                    Ok(req) => self.engine.resize(req.rows, req.cols)?,
                    Err(reason) => {
                        self.log.record(EventRecord::ResizeRejected {
                            rows: (self.engine.rows() as i32 + dr).max(0) as u16,
                            cols: (self.engine.cols() as i32 + dc).max(0) as u16,
                            reason: reason.to_string(),
                        });
                        self.message = Some((reason, MESSAGE_MS));
                        return Ok(());
                    }
                }
            }
        }
        self.animator.clear();
        self.last_clear = 0;
        self.last_looped = false;
        self.log.record(EventRecord::board_init(&self.engine.snapshot()));
        Ok(())
    }

    /// Advance animations and the status message by one frame.
    pub fn tick(&mut self, dt_ms: u32) {
        self.animator.tick(dt_ms);
        if let Some((msg, left)) = self.message {
            self.message = left.checked_sub(dt_ms).filter(|&l| l > 0).map(|l| (msg, l));
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.engine.snapshot()
    }

    pub fn hud(&self) -> HudView<'static> {
        HudView {
            last_clear: self.last_clear,
            last_looped: self.last_looped,
            message: self.message(),
        }
    }

    /// Everything [`crate::term::BoardView`] needs for one frame.
    pub fn scene<'a>(&'a self, snap: &'a BoardSnapshot, cursor: Option<(u16, u16)>) -> Scene<'a> {
        Scene {
            snap,
            palette: &self.palette,
            layout: self.engine.layout(),
            anim: Some(&self.animator),
            cursor: if snap.selecting() { cursor } else { None },
            hud: self.hud(),
        }
    }

    /// Flush and stop the event log.
    pub fn close(&mut self) {
        self.log.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Grid, ScriptedColors};

    fn session() -> GameSession<ScriptedColors> {
        let grid = Grid::from_colors(2, 2, 2, vec![0, 0, 1, 1]).unwrap();
        let engine = BoardEngine::from_grid(grid, ScriptedColors::new(vec![1, 0]));
        GameSession::with_engine(engine, EventLog::disabled())
    }

    #[test]
    fn clear_starts_drop_animation_and_updates_hud() {
        let mut s = session();
        s.pointer(PointerEvent::Down(0)).unwrap();
        s.pointer(PointerEvent::Enter(1)).unwrap();
        assert!(s.animator().scale(1) >= 1.0);
        let outcome = s.pointer(PointerEvent::Up).unwrap();
        assert!(matches!(outcome, PointerOutcome::Ended(ref r) if r.cleared.len() == 2));
        assert!(s.animator().is_animating());
        assert_eq!(s.hud().last_clear, 2);
        assert!(!s.hud().last_looped);
    }

    #[test]
    fn rejected_resize_posts_message_that_expires() {
        let mut s = session();
        s.command(BoardCommand::ShrinkRows).unwrap();
        s.command(BoardCommand::ShrinkRows).unwrap();
        assert_eq!(s.engine().rows(), 1);
        assert!(s.message().is_some());
        s.tick(MESSAGE_MS - 1);
        assert!(s.message().is_some());
        s.tick(1);
        assert!(s.message().is_none());
    }

    #[test]
    fn accepted_resize_rebuilds_board() {
        let mut s = session();
        let before = s.engine().board_id();
        s.command(BoardCommand::GrowCols).unwrap();
        assert_eq!((s.engine().rows(), s.engine().cols()), (2, 3));
        assert_eq!(s.engine().grid().len(), 6);
        assert!(s.engine().board_id() > before);
    }

    #[test]
    fn cursor_only_shown_while_selecting() {
        let mut s = session();
        let snap = s.snapshot();
        assert_eq!(s.scene(&snap, Some((3, 3))).cursor, None);
        s.pointer(PointerEvent::Down(0)).unwrap();
        let snap = s.snapshot();
        assert_eq!(s.scene(&snap, Some((3, 3))).cursor, Some((3, 3)));
    }
}
