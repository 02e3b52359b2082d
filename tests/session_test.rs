use std::io::Write;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use tui_dots::core::{BoardEngine, Grid, PointerOutcome, ScriptedColors};
use tui_dots::event_log::EventLog;
use tui_dots::input::{handle_key_event, PointerTracker};
use tui_dots::session::GameSession;
use tui_dots::term::{BoardView, Viewport};
use tui_dots::types::BoardCommand;

#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Write for Sink {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Sink {
    fn records(&self) -> Vec<serde_json::Value> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }
}

fn mouse(kind: MouseEventKind, (column, row): (u16, u16)) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Bottom row first: [R R B / B R B / R B R].
fn session(sink: &Sink) -> GameSession<ScriptedColors> {
    let grid = Grid::from_colors(3, 3, 2, vec![0, 0, 1, 1, 0, 1, 0, 1, 0]).unwrap();
    let engine = BoardEngine::from_grid(grid, ScriptedColors::new(vec![1, 0]));
    GameSession::with_engine(engine, EventLog::spawn_writer(sink.clone()))
}

#[test]
fn mouse_drag_clears_and_logs() {
    let sink = Sink::default();
    let mut s = session(&sink);
    let view = BoardView::default();
    let geo = view.geometry(3, 3, Viewport::new(40, 20));
    let mut tracker = PointerTracker::new();

    let gestures = [
        mouse(MouseEventKind::Down(MouseButton::Left), geo.dot_xy(0)),
        mouse(MouseEventKind::Drag(MouseButton::Left), geo.dot_xy(3)),
        mouse(MouseEventKind::Drag(MouseButton::Left), geo.dot_xy(1)),
        mouse(MouseEventKind::Up(MouseButton::Left), geo.dot_xy(1)),
    ];
    let mut outcomes = Vec::new();
    for m in gestures {
        if let Some(ev) = tracker.handle_mouse(m, |x, y| geo.cell_at(x, y)) {
            outcomes.push(s.pointer(ev).unwrap());
        }
    }

    assert_eq!(outcomes[0], PointerOutcome::Started(0));
    assert_eq!(outcomes[1], PointerOutcome::Rejected);
    // A refused dot does not end the gesture.
    assert_eq!(outcomes[2], PointerOutcome::Extended);
    assert!(matches!(outcomes[3], PointerOutcome::Ended(ref r) if r.cleared == vec![1, 0]));
    assert_eq!(s.engine().grid().cells(), &[1, 0, 1, 0, 1, 1, 0, 1, 0]);
    assert_eq!(s.hud().last_clear, 2);

    s.close();
    let types: Vec<String> = sink
        .records()
        .iter()
        .map(|v| v["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        vec![
            "board_init",
            "selection_begin",
            "selection_extend",
            "selection_extend",
            "clear"
        ]
    );
}

#[test]
fn resize_keys_respect_board_limits() {
    let sink = Sink::default();
    let mut s = session(&sink);
    let grow = handle_key_event(KeyEvent::new(KeyCode::Char('+'), KeyModifiers::NONE)).unwrap();
    assert_eq!(grow, BoardCommand::GrowRows);

    for _ in 0..5 {
        s.command(grow).unwrap();
    }
    assert_eq!(s.engine().rows(), 8);
    assert_eq!(s.message(), None);

    s.command(grow).unwrap();
    assert_eq!(s.engine().rows(), 8);
    assert!(s.message().is_some());

    s.close();
    let records = sink.records();
    let last = records.last().unwrap();
    assert_eq!(last["type"], "resize_rejected");
    assert_eq!(last["rows"], 9);
    assert_eq!(last["cols"], 3);

    let commands: Vec<&serde_json::Value> =
        records.iter().filter(|r| r["type"] == "command").collect();
    assert_eq!(commands.len(), 6);
    assert!(commands.iter().all(|r| r["name"] == "growRows"));
}

#[test]
fn reset_keeps_size_and_clears_stats() {
    let sink = Sink::default();
    let mut s = session(&sink);
    s.pointer(tui_dots::types::PointerEvent::Down(0)).unwrap();
    s.command(BoardCommand::Reset).unwrap();
    assert!(!s.engine().selection().is_active());
    assert_eq!((s.engine().rows(), s.engine().cols()), (3, 3));
    assert_eq!(s.hud().last_clear, 0);
    assert!(!s.animator().is_animating());

    s.close();
    let records = sink.records();
    let tail: Vec<&str> = records[records.len() - 2..]
        .iter()
        .map(|r| r["type"].as_str().unwrap())
        .collect();
    assert_eq!(tail, vec!["command", "board_init"]);
    assert_eq!(records[records.len() - 2]["name"], "reset");
}
