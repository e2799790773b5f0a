//! `transit-core` — foundational types for the transit simulator.
//!
//! This crate is a dependency of every other `transit-*` crate.  It
//! intentionally has no `transit-*` dependencies and only one external one
//! (`thiserror`).
//!
//! # What lives here
//!
//! | Module       | Contents                                      |
//! |--------------|-----------------------------------------------|
//! | [`ids`]      | `TrainId`, `StationId`, `PassengerId`         |
//! | [`registry`] | `Registry` — per-run entity name interner     |
//! | [`error`]    | `TransitError`, `TransitResult`               |
//!
//! # Identity model
//!
//! Entities are identified by `(kind, name)`.  The [`Registry`] interns each
//! name once per kind and hands out a dense, `Copy` integer ID; two lookups
//! of the same name therefore compare equal by construction.  The registry
//! is owned by the simulation instance, so its lifetime — and the validity
//! of every ID it issued — matches one run exactly.

pub mod error;
pub mod ids;
pub mod registry;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TransitError, TransitResult};
pub use ids::{PassengerId, StationId, TrainId};
pub use registry::Registry;
