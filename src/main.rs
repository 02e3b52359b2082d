//! Terminal Dots (default binary).
//!
//! Drag across same-colored dots with the mouse to connect them; release to clear.
//! Uses crossterm for input and the framebuffer renderer from `tui_dots::term`.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_dots::config::GameConfig;
use tui_dots::event_log::EventLog;
use tui_dots::input::{handle_key_event, should_quit, PointerTracker};
use tui_dots::session::GameSession;
use tui_dots::term::{fingerprint, BoardView, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_dots::types::TICK_MS;

/// Redraw interval for a board where nothing changes.
const IDLE_REDRAW_MS: u64 = 500;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::load(&args)?;
    let log = EventLog::from_path(config.log_path.as_deref())?;
    let mut session = GameSession::new(&config, log)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    session.close();
    if let Err(e) = &result {
        eprintln!("[Dots] fatal: {:#}", e);
    }
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = BoardView::default();
    let mut tracker = PointerTracker::new();
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);
    let mut fb = FrameBuffer::new(0, 0);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Render.
        let snap = session.snapshot();
        let scene = session.scene(&snap, tracker.cursor());
        let mut parts: Vec<u64> = Vec::with_capacity(snap.path.len() + 6);
        parts.push(snap.board_hash);
        parts.push(snap.board_id as u64);
        parts.push(((w as u64) << 16) | h as u64);
        parts.push(scene.cursor.map_or(u64::MAX, |(x, y)| ((x as u64) << 16) | y as u64));
        parts.push(scene.hud.message.map_or(0, |m| m.len() as u64 + 1));
        parts.extend(snap.path.iter().map(|&c| c as u64));
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, fingerprint(&parts), session.animator().is_animating()) {
            view.render_into(&scene, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(cmd) = handle_key_event(key) {
                        tracker.cancel();
                        session.command(cmd)?;
                    }
                }
                Event::Mouse(mouse) => {
                    let engine = session.engine();
                    let geo = view.geometry(engine.rows(), engine.cols(), viewport);
                    if let Some(ev) = tracker.handle_mouse(mouse, |x, y| geo.cell_at(x, y)) {
                        session.pointer(ev)?;
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.force();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            session.tick(TICK_MS);
        }
    }
}
