//! yh-logging: append-only NDJSON game history + saved-game snapshots.
//!
//! History files are post-mortem material: one JSON object per line, append
//! only, tolerant of a torn trailing line after a crash. Snapshots are whole
//! JSON documents written atomically (tmp file + rename) so a reader never
//! observes a half-written save.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// History event schema version.
pub const HISTORY_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history io error: {0}")]
    Io(#[from] io::Error),
    #[error("history json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

/// A game was started.
#[derive(Debug, Clone, Serialize)]
pub struct GameStartedV1 {
    pub event: &'static str,
    pub schema: u32,
    pub ts_ms: u64,
    pub game_id: u64,
    /// "single" or "duel".
    pub mode: String,
    pub seed: u64,
}

impl GameStartedV1 {
    pub fn new(game_id: u64, mode: &str, seed: u64) -> Self {
        Self {
            event: "game_started",
            schema: HISTORY_SCHEMA_VERSION,
            ts_ms: now_ms(),
            game_id,
            mode: mode.to_string(),
            seed,
        }
    }
}

/// Dice were (re)rolled.
#[derive(Debug, Clone, Serialize)]
pub struct RollEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub game_id: u64,
    pub player: u8,
    pub turn_idx: u8,
    pub roll_idx: u8,
    pub dice: [u8; 5],
    pub held: [bool; 5],
}

/// A combination was scored.
#[derive(Debug, Clone, Serialize)]
pub struct MarkEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub game_id: u64,
    pub player: u8,
    /// Snake-case combination name.
    pub combo: String,
    pub points: u32,
    /// Player's running grand total after the mark.
    pub total: u32,
}

/// A game finished.
#[derive(Debug, Clone, Serialize)]
pub struct GameFinishedV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub game_id: u64,
    /// Grand totals per player (one entry for single-player games).
    pub totals: Vec<u32>,
    /// 0/1 winner, 2 draw; absent for single-player games.
    pub winner: Option<u8>,
}

impl GameFinishedV1 {
    pub fn new(game_id: u64, totals: Vec<u32>, winner: Option<u8>) -> Self {
        Self {
            event: "game_finished",
            ts_ms: now_ms(),
            game_id,
            totals,
            winner,
        }
    }
}

/// Append-only NDJSON history writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct HistoryWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl HistoryWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, HistoryError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn append<T: Serialize>(&mut self, event: &T) -> Result<(), HistoryError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), HistoryError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

/// Write a JSON document atomically: tmp file in the same directory, then
/// rename over the target.
pub fn write_json_atomic<T: Serialize>(
    path: impl AsRef<Path>,
    value: &T,
) -> Result<(), HistoryError> {
    let path = path.as_ref();
    let tmp = path.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(value)?;
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Read back a JSON document written by [`write_json_atomic`].
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, HistoryError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde::Deserialize;
    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        let mut out = Vec::new();
        for line in s.lines() {
            if line.trim().is_empty() {
                continue;
            }
            if let Ok(v) = serde_json::from_str::<Value>(line) {
                out.push(v);
            }
        }
        out
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.ndjson");
        let mut w = HistoryWriter::open_append(&path).unwrap();

        w.append(&GameStartedV1::new(1, "single", 99)).unwrap();
        w.append(&GameFinishedV1::new(1, vec![231], None)).unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["event"], "game_started");
        assert_eq!(vals[0]["seed"], 99);
        assert_eq!(vals[1]["event"], "game_finished");
        assert_eq!(vals[1]["totals"][0], 231);
    }

    #[test]
    fn append_reopens_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.ndjson");

        {
            let mut w = HistoryWriter::open_append(&path).unwrap();
            w.append(&GameStartedV1::new(1, "duel", 0)).unwrap();
            w.flush().unwrap();
        }
        {
            let mut w = HistoryWriter::open_append(&path).unwrap();
            w.append(&GameStartedV1::new(2, "duel", 0)).unwrap();
            w.flush().unwrap();
        }

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["game_id"], 1);
        assert_eq!(vals[1]["game_id"], 2);
    }

    #[test]
    fn lenient_reader_tolerates_trailing_partial_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.ndjson");

        {
            let mut w = HistoryWriter::open_append(&path).unwrap();
            w.append(&GameFinishedV1::new(7, vec![100, 90], Some(0)))
                .unwrap();
            w.flush().unwrap();
        }

        // Simulate crash: append a partial JSON line (no newline, invalid JSON).
        let mut f = OpenOptions::new().append(true).open(&path).unwrap();
        f.write_all(br#"{"event":"roll","game_id":"#).unwrap();
        f.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["winner"], 0);
    }

    #[test]
    fn snapshot_write_is_atomic_wrt_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("save.json");

        #[derive(Debug, PartialEq, Serialize, Deserialize)]
        struct Snapshot {
            game_id: u64,
            totals: Vec<u32>,
        }

        let mut snap = Snapshot {
            game_id: 3,
            totals: vec![120, 140],
        };
        write_json_atomic(&save, &snap).unwrap();

        // Simulate crash leaving a corrupt tmp file around; save.json must
        // remain readable.
        let tmp = save.with_extension("json.tmp");
        fs::write(&tmp, b"{not valid json").unwrap();

        let got: Snapshot = read_json(&save).unwrap();
        assert_eq!(got, snap);

        // Update and ensure it overwrites cleanly.
        snap.totals = vec![200, 140];
        write_json_atomic(&save, &snap).unwrap();
        let got2: Snapshot = read_json(&save).unwrap();
        assert_eq!(got2.totals, vec![200, 140]);
    }
}
