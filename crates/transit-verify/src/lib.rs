//! `transit-verify` — deterministic, single-threaded replay audit.
//!
//! The verifier takes a freshly loaded [`Network`][transit_net::Network]
//! (same topology source that seeded the live run, nothing moved yet) and
//! the recorded event log, and re-derives every state transition in order.
//! Any violated precondition is a detected inconsistency between what the
//! concurrent run did and the invariants it was supposed to preserve; it is
//! surfaced with the offending event's index and transcript, never swallowed.

pub mod verify;


pub use verify::{verify, VerifyError};
