//! `transit-event` — the event model and the shared event log.
//!
//! # What lives here
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`event`] | `Event` (Board \| Deboard \| Move), `validate_and_apply`      |
//! | [`log`]   | `EventLog` (append-only, thread-safe), JSON record codec      |
//! | [`error`] | `ReplayError`                                                 |
//!
//! An [`Event`] is an immutable record of one state transition, created at
//! the moment an agent performs it.  Each variant knows its own replay
//! preconditions, so the verifier is a plain ordered fold of
//! `validate_and_apply` over the log — exhaustive over event kinds at
//! compile time.

pub mod error;
pub mod event;
pub mod log;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::ReplayError;
pub use event::Event;
pub use log::{
    read_log, read_log_file, write_log, write_log_file, EventLog, EventRecord, LogFileError,
};
