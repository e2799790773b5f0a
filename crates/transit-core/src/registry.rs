//! Per-run entity name interner.
//!
//! One [`Registry`] is owned by each simulation instance.  Interning the same
//! name twice for the same kind returns the same ID, giving the
//! name-equality-is-identity property without any process-wide mutable cache:
//! dropping the registry (with its owning network) forgets every entity, so
//! there is nothing to clear between runs.

use std::collections::HashMap;

use crate::{PassengerId, StationId, TrainId, TransitError, TransitResult};

// ── Interner ──────────────────────────────────────────────────────────────────

/// Dense string interner for one entity kind.
///
/// IDs are assigned in first-registration order, so `u32` IDs double as
/// positions into any per-entity `Vec` built alongside this table.
#[derive(Debug, Default, Clone)]
struct Interner {
    names:   Vec<String>,
    by_name: HashMap<String, u32>,
}

impl Interner {
    fn intern(&mut self, name: &str) -> u32 {
        match self.by_name.get(name) {
            Some(&id) => id,
            None => {
                let id = self.names.len() as u32;
                self.names.push(name.to_owned());
                self.by_name.insert(name.to_owned(), id);
                id
            }
        }
    }

    fn get(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    fn name(&self, id: u32) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

/// Interning tables for all three entity kinds.
///
/// Equality of the typed IDs this registry issues is exactly equality of
/// `(kind, name)`: within one kind each name maps to one dense ID for the
/// registry's whole lifetime, and the ID types are not interconvertible.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    trains:     Interner,
    stations:   Interner,
    passengers: Interner,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Interning (first reference creates the entity) ────────────────────

    pub fn intern_train(&mut self, name: &str) -> TrainId {
        TrainId(self.trains.intern(name))
    }

    pub fn intern_station(&mut self, name: &str) -> StationId {
        StationId(self.stations.intern(name))
    }

    pub fn intern_passenger(&mut self, name: &str) -> PassengerId {
        PassengerId(self.passengers.intern(name))
    }

    // ── Name → ID lookup (does not create) ────────────────────────────────

    pub fn train(&self, name: &str) -> TransitResult<TrainId> {
        self.trains.get(name).map(TrainId).ok_or_else(|| TransitError::UnknownName {
            kind: "train",
            name: name.to_owned(),
        })
    }

    pub fn station(&self, name: &str) -> TransitResult<StationId> {
        self.stations.get(name).map(StationId).ok_or_else(|| TransitError::UnknownName {
            kind: "station",
            name: name.to_owned(),
        })
    }

    pub fn passenger(&self, name: &str) -> TransitResult<PassengerId> {
        self.passengers.get(name).map(PassengerId).ok_or_else(|| TransitError::UnknownName {
            kind: "passenger",
            name: name.to_owned(),
        })
    }

    // ── ID → name lookup ──────────────────────────────────────────────────
    //
    // Infallible variants return the display form of the raw ID for IDs this
    // registry never issued; error paths use them to stay panic-free.

    pub fn train_name(&self, id: TrainId) -> String {
        self.trains.name(id.0).map(str::to_owned).unwrap_or_else(|| id.to_string())
    }

    pub fn station_name(&self, id: StationId) -> String {
        self.stations.name(id.0).map(str::to_owned).unwrap_or_else(|| id.to_string())
    }

    pub fn passenger_name(&self, id: PassengerId) -> String {
        self.passengers.name(id.0).map(str::to_owned).unwrap_or_else(|| id.to_string())
    }

    // ── Counts ────────────────────────────────────────────────────────────

    pub fn train_count(&self) -> usize {
        self.trains.len()
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// IDs of all registered trains, in registration order.
    pub fn train_ids(&self) -> impl Iterator<Item = TrainId> + '_ {
        (0..self.trains.len() as u32).map(TrainId)
    }

    /// IDs of all registered passengers, in registration order.
    pub fn passenger_ids(&self) -> impl Iterator<Item = PassengerId> + '_ {
        (0..self.passengers.len() as u32).map(PassengerId)
    }

    /// IDs of all registered stations, in registration order.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> + '_ {
        (0..self.stations.len() as u32).map(StationId)
    }
}
