//! The shared append-only event log and its JSON file format.
//!
//! # Live log
//!
//! [`EventLog`] is a mutex-protected `Vec<Event>` appended to by every agent.
//! Appenders must still be holding the network lock when they append, so the
//! recorded order equals the order the mutations actually happened in — the
//! property the replay verifier depends on.
//!
//! # File format
//!
//! The log serializes as an ordered JSON array of `(kind, operand names)`
//! records:
//!
//! ```json
//! [
//!   { "kind": "board",   "args": ["Anna", "red", "Park Street"] },
//!   { "kind": "move",    "args": ["red", "Park Street", "Downtown Crossing"] },
//!   { "kind": "deboard", "args": ["Anna", "red", "Downtown Crossing"] }
//! ]
//! ```
//!
//! Reading resolves names against the registry of a freshly loaded network,
//! so a log can be verified by a separate process from the one that wrote it.

use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use transit_core::{Registry, TransitError};

use crate::Event;

// ── Live log ──────────────────────────────────────────────────────────────────

/// Append-only, time-ordered event sequence shared by all agents.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<Event>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event.  Safe under concurrent writers; call while holding
    /// the network lock so log order matches mutation order.
    pub fn append(&self, event: Event) {
        self.lock().push(event);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Copy of the events recorded so far, in append order.
    pub fn snapshot(&self) -> Vec<Event> {
        self.lock().clone()
    }

    /// Consume the log after the simulation has quiesced.
    pub fn into_events(self) -> Vec<Event> {
        self.events.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        // A panicking appender cannot leave a Vec push half-done in safe
        // code; recover the guard and let verification judge the contents.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ── File format ───────────────────────────────────────────────────────────────

/// One serialized event: its kind plus operand names in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub kind: String,
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum LogFileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed log: {0}")]
    Json(#[from] serde_json::Error),

    #[error("log references an entity the topology does not define: {0}")]
    UnknownEntity(#[from] TransitError),

    #[error("unknown event kind {0:?}")]
    UnknownKind(String),

    #[error("event kind {kind:?} expects 3 operands, got {got}")]
    BadArity { kind: String, got: usize },
}

impl Event {
    /// Serialize operands to their registered names.
    pub fn to_record(&self, reg: &Registry) -> EventRecord {
        match *self {
            Event::Board { passenger, train, station } => EventRecord {
                kind: "board".to_owned(),
                args: vec![
                    reg.passenger_name(passenger),
                    reg.train_name(train),
                    reg.station_name(station),
                ],
            },
            Event::Deboard { passenger, train, station } => EventRecord {
                kind: "deboard".to_owned(),
                args: vec![
                    reg.passenger_name(passenger),
                    reg.train_name(train),
                    reg.station_name(station),
                ],
            },
            Event::Move { train, from, to } => EventRecord {
                kind: "move".to_owned(),
                args: vec![
                    reg.train_name(train),
                    reg.station_name(from),
                    reg.station_name(to),
                ],
            },
        }
    }

    /// Resolve a record's names against `reg`.  Names the topology never
    /// registered are a hard error: such a log cannot belong to this network.
    pub fn from_record(record: &EventRecord, reg: &Registry) -> Result<Event, LogFileError> {
        let [a, b, c] = record.args.as_slice() else {
            return Err(LogFileError::BadArity {
                kind: record.kind.clone(),
                got:  record.args.len(),
            });
        };
        match record.kind.as_str() {
            "board" => Ok(Event::Board {
                passenger: reg.passenger(a)?,
                train:     reg.train(b)?,
                station:   reg.station(c)?,
            }),
            "deboard" => Ok(Event::Deboard {
                passenger: reg.passenger(a)?,
                train:     reg.train(b)?,
                station:   reg.station(c)?,
            }),
            "move" => Ok(Event::Move {
                train: reg.train(a)?,
                from:  reg.station(b)?,
                to:    reg.station(c)?,
            }),
            other => Err(LogFileError::UnknownKind(other.to_owned())),
        }
    }
}

/// Serialize `events` as pretty-printed JSON records.
pub fn write_log<W: Write>(
    writer: W,
    events: &[Event],
    reg: &Registry,
) -> Result<(), LogFileError> {
    let records: Vec<EventRecord> = events.iter().map(|e| e.to_record(reg)).collect();
    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Parse JSON records and resolve them against `reg`, preserving order.
pub fn read_log<R: Read>(reader: R, reg: &Registry) -> Result<Vec<Event>, LogFileError> {
    let records: Vec<EventRecord> = serde_json::from_reader(reader)?;
    records.iter().map(|r| Event::from_record(r, reg)).collect()
}

/// [`write_log`] to a file path.
pub fn write_log_file(
    path: &Path,
    events: &[Event],
    reg: &Registry,
) -> Result<(), LogFileError> {
    let file = std::fs::File::create(path)?;
    write_log(std::io::BufWriter::new(file), events, reg)
}

/// [`read_log`] from a file path.
pub fn read_log_file(path: &Path, reg: &Registry) -> Result<Vec<Event>, LogFileError> {
    let file = std::fs::File::open(path)?;
    read_log(std::io::BufReader::new(file), reg)
}
