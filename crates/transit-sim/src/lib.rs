//! `transit-sim` — concurrent agents racing over shared network state.
//!
//! # Scheduling model
//!
//! One OS thread per train and one per passenger; no global coordinator.
//! Agents communicate only through the shared [`Network`][transit_net::Network]
//! and the per-station [`StationGate`][transit_net::StationGate]s:
//!
//! ```text
//! TrainAgent      : signal arrival → dwell hint → claim next gate (blocks)
//!                   → move + log Move → release previous gate → repeat
//! PassengerAgent  : decide phase under the network lock →
//!                   AtStation: await arrival, board right train + log Board
//!                   OnTrain:   await arrival at next stop, deboard + log Deboard
//!                   → Finished once the journey is exhausted
//! ```
//!
//! # Locking discipline
//!
//! The network mutex is held only for short read-validate-mutate-append
//! sections and never across a gate wait or the dwell sleep.  Every blocking
//! wait lives in a gate, is re-checked after each wake, and observes the
//! shared cancellation flag, so shutdown (or a liveness deadline) unwinds
//! every thread.
//!
//! # What lives here
//!
//! | Module     | Contents                                           |
//! |------------|----------------------------------------------------|
//! | [`agents`] | `TrainAgent`, `PassengerAgent` state machines      |
//! | [`shared`] | `Shared` — network + gates + log + cancel flag     |
//! | [`sim`]    | `Sim` runner, `SimOutcome`                         |
//! | [`loader`] | JSON topology loader                               |
//! | [`error`]  | `SimError`, `SimResult`                            |

pub mod agents;
pub mod error;
pub mod loader;
pub mod shared;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SimError, SimResult};
pub use loader::{load_network, load_network_reader};
pub use sim::{Sim, SimOutcome};
