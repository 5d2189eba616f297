//! JSON-lines log of game events.
//!
//! Each [`GameEvent`] drained from the simulation becomes one line such as
//! `{"frame":812,"event":"rows_cleared","rows":2,"points":100}`.
//! Logging never interrupts play: after the first write error the log
//! silently disables itself.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub frame: u64,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topped_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fall_interval: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl LogRecord {
    pub fn new(frame: u64, event: &GameEvent) -> Self {
        let mut rec = Self {
            frame,
            event: event.name(),
            kind: None,
            next: None,
            col: None,
            row: None,
            topped_out: None,
            rows: None,
            points: None,
            level: None,
            fall_interval: None,
            score: None,
        };
        match *event {
            GameEvent::Spawned { kind, next } => {
                rec.kind = Some(kind.as_str());
                rec.next = Some(next.as_str());
            }
            GameEvent::Locked {
                kind,
                anchor,
                topped_out,
            } => {
                rec.kind = Some(kind.as_str());
                rec.col = Some(anchor.col);
                rec.row = Some(anchor.row);
                rec.topped_out = Some(topped_out);
            }
            GameEvent::RowsCleared { rows, points } => {
                rec.rows = Some(rows);
                rec.points = Some(points);
            }
            GameEvent::LevelUp {
                level,
                fall_interval,
            } => {
                rec.level = Some(level);
                rec.fall_interval = Some(fall_interval);
            }
            GameEvent::GameOver { score } => rec.score = Some(score),
            GameEvent::Restarted => {}
        }
        rec
    }
}

pub struct EventLog {
    out: Option<BufWriter<File>>,
    buf: Vec<u8>,
}

impl EventLog {
    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
        }
    }

    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self {
            out: Some(BufWriter::new(file)),
            buf: Vec::with_capacity(256),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, frame: u64, event: &GameEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &LogRecord::new(frame, event)).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}
