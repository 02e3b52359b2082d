//! Line-delimited JSON event log.
//!
//! Records are handed to a writer thread over a channel so the frame loop never blocks on
//! disk. Without a path the log is disabled and every call is a no-op.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Result};
use serde::Serialize;

use crate::core::{BoardSnapshot, ClearResult};
use crate::types::{CellIndex, ColorId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    BoardInit {
        rows: u16,
        cols: u16,
        colors: u8,
        board_hash: u64,
    },
    SelectionBegin {
        cell: CellIndex,
        color: ColorId,
    },
    SelectionExtend {
        cell: CellIndex,
        accepted: bool,
        path_len: usize,
    },
    Clear {
        cleared: Vec<CellIndex>,
        looped: bool,
        board_hash: u64,
    },
    Command {
        name: String,
    },
    ResizeRejected {
        rows: u16,
        cols: u16,
        reason: String,
    },
}

impl EventRecord {
    pub fn board_init(snap: &BoardSnapshot) -> Self {
        Self::BoardInit {
            rows: snap.rows,
            cols: snap.cols,
            colors: snap.num_colors,
            board_hash: snap.board_hash,
        }
    }

    pub fn clear(result: &ClearResult) -> Self {
        Self::Clear {
            cleared: result.cleared.clone(),
            looped: result.looped,
            board_hash: result.snapshot.board_hash,
        }
    }
}

pub struct EventLog {
    tx: Option<mpsc::Sender<EventRecord>>,
    writer: Option<JoinHandle<()>>,
}

impl EventLog {
    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            tx: None,
            writer: None,
        }
    }

    /// Append to `path`, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("event log: open {} failed: {}", path, e))?;
        Ok(Self::spawn_writer(file))
    }

    /// Disabled when `path` is `None`.
    pub fn from_path(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::open(p),
            None => Ok(Self::disabled()),
        }
    }

    /// Stream records into any writer on a background thread.
    pub fn spawn_writer<W: Write + Send + 'static>(mut out: W) -> Self {
        let (tx, rx) = mpsc::channel::<EventRecord>();
        let writer = thread::spawn(move || {
            let mut buf: Vec<u8> = Vec::with_capacity(256);
            while let Ok(rec) = rx.recv() {
                buf.clear();
                if serde_json::to_writer(&mut buf, &rec).is_err() {
                    continue;
                }
                buf.push(b'\n');
                if out.write_all(&buf).is_err() {
                    break;
                }
            }
            let _ = out.flush();
        });
        Self {
            tx: Some(tx),
            writer: Some(writer),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tx.is_some()
    }

    pub fn record(&self, rec: EventRecord) {
        if let Some(tx) = self.tx.as_ref() {
            let _ = tx.send(rec);
        }
    }

    /// Stop accepting records and wait for the writer to finish.
    pub fn close(&mut self) {
        self.tx = None;
        if let Some(handle) = self.writer.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_are_tagged_snake_case() {
        let rec = EventRecord::SelectionExtend {
            cell: 4,
            accepted: true,
            path_len: 2,
        };
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(
            json,
            r#"{"type":"selection_extend","cell":4,"accepted":true,"path_len":2}"#
        );
    }

    #[test]
    fn writer_emits_one_line_per_record() {
        let sink = Shared::default();
        let mut log = EventLog::spawn_writer(sink.clone());
        assert!(log.is_enabled());
        log.record(EventRecord::SelectionBegin { cell: 0, color: 2 });
        log.record(EventRecord::ResizeRejected {
            rows: 9,
            cols: 6,
            reason: "board is limited to 8x8".to_string(),
        });
        log.close();

        let text = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(r#"{"type":"selection_begin""#));
        let v: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(v["type"], "resize_rejected");
        assert_eq!(v["rows"], 9);
    }

    #[test]
    fn disabled_log_accepts_records() {
        let mut log = EventLog::from_path(None).unwrap();
        assert!(!log.is_enabled());
        log.record(EventRecord::SelectionBegin { cell: 1, color: 0 });
        log.close();
    }
}
