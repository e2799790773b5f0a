//! `transit-net` — topology, live network state, and station gates.
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`topology`] | `Line`, `Journey`, `Direction`                            |
//! | [`state`]    | `Network` — the single source of truth agents read/write  |
//! | [`gate`]     | `StationGate`, `GateSet` — per-station mutual exclusion   |
//! | [`error`]    | `NetError`, `NetResult`                                   |
//!
//! # Sharing discipline
//!
//! [`Network`] itself is a plain data structure with no interior locking.
//! Concurrent runners wrap it in a `Mutex` held only for short
//! read-validate-mutate sections, while all *blocking* — trains contending
//! for a station, passengers waiting for an arrival — happens on the
//! per-station [`StationGate`]s so that no thread ever sleeps while holding
//! the network.

pub mod error;
pub mod gate;
pub mod state;
pub mod topology;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{NetError, NetResult};
pub use gate::{Cancelled, GateSet, StationGate};
pub use state::Network;
pub use topology::{Direction, Journey, Line};
