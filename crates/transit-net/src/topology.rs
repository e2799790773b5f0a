//! Fixed topology: lines, journeys, and travel direction.

use transit_core::{PassengerId, StationId, TrainId};

/// Which way a train is currently walking its line's station sequence.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Direction {
    /// Ascending station index.
    #[default]
    Forward,
    /// Descending station index.
    Reverse,
}

/// The fixed ordered route one train cycles over, bouncing at both ends.
///
/// Invariant (enforced at registration): `stations.len() >= 2`, so the next
/// station after a bounce is always defined.
#[derive(Debug, Clone)]
pub struct Line {
    pub train:    TrainId,
    pub stations: Vec<StationId>,
}

impl Line {
    /// First station — where the train starts and where `check_start`
    /// expects it.
    pub fn first(&self) -> StationId {
        self.stations[0]
    }

    /// Index of the last station.
    pub fn last_index(&self) -> usize {
        self.stations.len() - 1
    }

    pub fn serves(&self, station: StationId) -> bool {
        self.stations.contains(&station)
    }
}

/// The fixed ordered sequence of stations one passenger must visit.
///
/// Invariant: `stations.len() >= 1`.  A journey of length 1 has no next
/// station; its passenger starts already arrived.
#[derive(Debug, Clone)]
pub struct Journey {
    pub passenger: PassengerId,
    pub stations:  Vec<StationId>,
}

impl Journey {
    pub fn first(&self) -> StationId {
        self.stations[0]
    }

    pub fn last(&self) -> StationId {
        self.stations[self.stations.len() - 1]
    }

    pub fn last_index(&self) -> usize {
        self.stations.len() - 1
    }
}
