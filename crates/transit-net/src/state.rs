//! The shared network state: topology plus every live mutable position.
//!
//! # Data layout
//!
//! All live state is kept in dense `Vec`s indexed by the registry's typed
//! IDs, one slot per entity:
//!
//! ```text
//! TrainId     → line, current station, line index, direction, rider roster
//! PassengerId → journey, current station, journey index
//! StationId   → waiting-passenger roster
//! ```
//!
//! Mutating operations ([`move_train`][Network::move_train],
//! [`board_passenger`][Network::board_passenger],
//! [`deboard_passenger`][Network::deboard_passenger]) perform no
//! precondition checking of their own: the live runner establishes
//! preconditions under the station-gate protocol, and the replay verifier
//! re-establishes them event by event.  Both paths funnel through the same
//! mutations, which is what makes replay an audit of the concurrent run.

use transit_core::{PassengerId, Registry, StationId, TrainId, TransitError};

use crate::topology::{Direction, Journey, Line};
use crate::{NetError, NetResult};

/// Line topology, passenger journeys, and all live positions/indices.
#[derive(Debug, Default, Clone)]
pub struct Network {
    registry: Registry,

    // ── Per-train state (indexed by TrainId) ──────────────────────────────
    lines:            Vec<Line>,
    train_station:    Vec<StationId>,
    train_index:      Vec<usize>,
    train_direction:  Vec<Direction>,
    train_passengers: Vec<Vec<PassengerId>>,

    // ── Per-passenger state (indexed by PassengerId) ──────────────────────
    journeys:          Vec<Journey>,
    passenger_station: Vec<StationId>,
    journey_index:     Vec<usize>,

    // ── Per-station state (indexed by StationId) ──────────────────────────
    station_passengers: Vec<Vec<PassengerId>>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Topology registration ─────────────────────────────────────────────

    /// Add a transit line: one train named `name` cycling over `stations`.
    ///
    /// The train starts at the first station, index 0, facing
    /// [`Direction::Forward`].  Lines of fewer than 2 stations are rejected:
    /// the bounce rule cannot produce a next station for them.
    pub fn add_line<S: AsRef<str>>(&mut self, name: &str, stations: &[S]) -> NetResult<TrainId> {
        if stations.len() < 2 {
            return Err(NetError::LineTooShort { name: name.to_owned(), got: stations.len() });
        }
        if self.registry.train(name).is_ok() {
            return Err(NetError::DuplicateLine(name.to_owned()));
        }

        let train = self.registry.intern_train(name);
        let station_ids: Vec<StationId> = stations
            .iter()
            .map(|s| {
                let id = self.registry.intern_station(s.as_ref());
                self.ensure_station_slot(id);
                id
            })
            .collect();
        let start = station_ids[0];

        debug_assert_eq!(train.index(), self.lines.len());
        self.lines.push(Line { train, stations: station_ids });
        self.train_station.push(start);
        self.train_index.push(0);
        self.train_direction.push(Direction::Forward);
        self.train_passengers.push(Vec::new());
        Ok(train)
    }

    /// Add a planned journey: one passenger named `name` visiting `stations`
    /// in order, starting (already waiting) at the first one.
    ///
    /// Rejected at registration, as configuration errors:
    /// - a station served by no line (the passenger could never get there);
    /// - a consecutive pair served by no single line (no train could ever
    ///   satisfy the boarding condition — the passenger would block forever).
    pub fn add_journey<S: AsRef<str>>(
        &mut self,
        name: &str,
        stations: &[S],
    ) -> NetResult<PassengerId> {
        if stations.is_empty() {
            return Err(NetError::EmptyJourney { name: name.to_owned() });
        }
        if self.registry.passenger(name).is_ok() {
            return Err(NetError::DuplicateJourney(name.to_owned()));
        }

        // Journey stations must already exist on some line; lookup (not
        // interning) makes an off-network station a loud setup failure.
        let mut station_ids = Vec::with_capacity(stations.len());
        for s in stations {
            match self.registry.station(s.as_ref()) {
                Ok(id) => station_ids.push(id),
                Err(_) => {
                    return Err(NetError::UnservedStation {
                        passenger: name.to_owned(),
                        station:   s.as_ref().to_owned(),
                    });
                }
            }
        }
        for pair in station_ids.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if !self.lines.iter().any(|l| l.serves(from) && l.serves(to)) {
                return Err(NetError::UnservedLeg {
                    passenger: name.to_owned(),
                    from:      self.registry.station_name(from),
                    to:        self.registry.station_name(to),
                });
            }
        }

        let passenger = self.registry.intern_passenger(name);
        let start = station_ids[0];

        debug_assert_eq!(passenger.index(), self.journeys.len());
        self.journeys.push(Journey { passenger, stations: station_ids });
        self.passenger_station.push(start);
        self.journey_index.push(0);
        self.station_passengers[start.index()].push(passenger);
        Ok(passenger)
    }

    fn ensure_station_slot(&mut self, id: StationId) {
        if id.index() >= self.station_passengers.len() {
            self.station_passengers.resize_with(id.index() + 1, Vec::new);
        }
    }

    // ── Read-only accessors ───────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn line(&self, t: TrainId) -> NetResult<&Line> {
        self.lines.get(t.index()).ok_or(NetError::Entity(TransitError::TrainNotFound(t)))
    }

    pub fn journey(&self, p: PassengerId) -> NetResult<&Journey> {
        self.journeys.get(p.index()).ok_or(NetError::Entity(TransitError::PassengerNotFound(p)))
    }

    /// Station the train is currently at.
    pub fn train_station(&self, t: TrainId) -> NetResult<StationId> {
        self.train_station
            .get(t.index())
            .copied()
            .ok_or(NetError::Entity(TransitError::TrainNotFound(t)))
    }

    /// Station the passenger is currently at (unchanged while riding).
    pub fn passenger_station(&self, p: PassengerId) -> NetResult<StationId> {
        self.passenger_station
            .get(p.index())
            .copied()
            .ok_or(NetError::Entity(TransitError::PassengerNotFound(p)))
    }

    /// Current position in the train's line sequence.
    pub fn train_index(&self, t: TrainId) -> NetResult<usize> {
        self.train_index
            .get(t.index())
            .copied()
            .ok_or(NetError::Entity(TransitError::TrainNotFound(t)))
    }

    /// Current position in the passenger's journey sequence.
    ///
    /// Monotonically non-decreasing; incremented exactly once per deboard.
    pub fn journey_index(&self, p: PassengerId) -> NetResult<usize> {
        self.journey_index
            .get(p.index())
            .copied()
            .ok_or(NetError::Entity(TransitError::PassengerNotFound(p)))
    }

    pub fn passengers_on(&self, t: TrainId) -> NetResult<&[PassengerId]> {
        self.train_passengers
            .get(t.index())
            .map(Vec::as_slice)
            .ok_or(NetError::Entity(TransitError::TrainNotFound(t)))
    }

    pub fn passengers_at(&self, s: StationId) -> &[PassengerId] {
        self.station_passengers.get(s.index()).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The train currently occupying `s`, if any.
    pub fn train_at(&self, s: StationId) -> Option<TrainId> {
        self.train_station
            .iter()
            .position(|&curr| curr == s)
            .map(|i| self.lines[i].train)
    }

    /// True iff no train currently occupies `s`.
    pub fn station_is_free(&self, s: StationId) -> bool {
        self.train_at(s).is_none()
    }

    /// The train the passenger is currently riding, if any.
    pub fn train_of(&self, p: PassengerId) -> Option<TrainId> {
        self.train_passengers
            .iter()
            .position(|riders| riders.contains(&p))
            .map(|i| self.lines[i].train)
    }

    // ── Scheduling queries ────────────────────────────────────────────────

    /// The station the train should move to next, applying the bounce rule:
    /// at index 0 the next index is 1, at the last index it is `len - 2`,
    /// otherwise `index ± 1` according to the current direction.
    pub fn next_station_for_train(&self, t: TrainId) -> NetResult<StationId> {
        let line = self.line(t)?;
        let idx = self.train_index[t.index()];
        let next = if idx == 0 {
            idx + 1
        } else if idx == line.last_index() {
            idx - 1
        } else {
            match self.train_direction[t.index()] {
                Direction::Forward => idx + 1,
                Direction::Reverse => idx - 1,
            }
        };
        Ok(line.stations[next])
    }

    /// The passenger's next planned stop, or `None` once the journey's last
    /// station has been reached.
    pub fn next_station_for_passenger(&self, p: PassengerId) -> NetResult<Option<StationId>> {
        let journey = self.journey(p)?;
        let idx = self.journey_index[p.index()];
        Ok(journey.stations.get(idx + 1).copied())
    }

    /// The train the passenger should board at `at`: the first-registered
    /// line serving both `at` and the passenger's next planned stop.
    ///
    /// Returns `Ok(None)` if the journey is finished or no line serves the
    /// pair.  When several lines qualify, registration order is the
    /// deliberate tie-break — deterministic rather than silently arbitrary.
    pub fn train_to_board(&self, p: PassengerId, at: StationId) -> NetResult<Option<TrainId>> {
        let Some(next) = self.next_station_for_passenger(p)? else {
            return Ok(None);
        };
        Ok(self
            .lines
            .iter()
            .find(|l| l.serves(at) && l.serves(next))
            .map(|l| l.train))
    }

    // ── Mutations ─────────────────────────────────────────────────────────

    /// Move the train from `from` to `to`: update its station, advance its
    /// line index, and flip direction at either endpoint.
    ///
    /// Callers must have established exclusivity over `to` (gate protocol or
    /// verified event preconditions) before calling.
    pub fn move_train(&mut self, t: TrainId, from: StationId, to: StationId) -> NetResult<()> {
        let line = self.line(t)?;
        let last = line.last_index();
        debug_assert_eq!(self.train_station[t.index()], from);

        let i = t.index();
        self.train_station[i] = to;
        match self.train_direction[i] {
            Direction::Forward => {
                if self.train_index[i] == last {
                    self.train_index[i] -= 1;
                    self.train_direction[i] = Direction::Reverse;
                } else {
                    self.train_index[i] += 1;
                }
            }
            Direction::Reverse => {
                if self.train_index[i] == 0 {
                    self.train_index[i] += 1;
                    self.train_direction[i] = Direction::Forward;
                } else {
                    self.train_index[i] -= 1;
                }
            }
        }
        Ok(())
    }

    /// Move the passenger from the station roster onto the train roster.
    ///
    /// The passenger's current station is unchanged (it already equals `s`);
    /// it next changes on deboard.
    pub fn board_passenger(
        &mut self,
        t: TrainId,
        p: PassengerId,
        s: StationId,
    ) -> NetResult<()> {
        self.line(t)?;
        self.journey(p)?;
        self.station_passengers[s.index()].retain(|&q| q != p);
        self.train_passengers[t.index()].push(p);
        Ok(())
    }

    /// Move the passenger from the train roster back to the station roster,
    /// set its current station to `s`, and advance its journey index.
    pub fn deboard_passenger(
        &mut self,
        t: TrainId,
        p: PassengerId,
        s: StationId,
    ) -> NetResult<()> {
        self.line(t)?;
        self.journey(p)?;
        self.train_passengers[t.index()].retain(|&q| q != p);
        self.station_passengers[s.index()].push(p);
        self.passenger_station[p.index()] = s;
        self.journey_index[p.index()] += 1;
        Ok(())
    }

    // ── Boundary condition checks ─────────────────────────────────────────

    /// Validate initial conditions: every train at its line's first station
    /// (no two sharing one), every passenger waiting at its journey's first
    /// station.  Reports the first violating entity.
    pub fn check_start(&self) -> NetResult<()> {
        for line in &self.lines {
            if self.train_station[line.train.index()] != line.first() {
                return Err(NetError::NotAtStart {
                    train: self.registry.train_name(line.train),
                });
            }
        }
        // Global exclusivity must already hold at t=0.
        for (i, a) in self.lines.iter().enumerate() {
            for b in &self.lines[i + 1..] {
                let (sa, sb) =
                    (self.train_station[a.train.index()], self.train_station[b.train.index()]);
                if sa == sb {
                    return Err(NetError::SharedStation {
                        station: self.registry.station_name(sa),
                        first:   self.registry.train_name(a.train),
                        second:  self.registry.train_name(b.train),
                    });
                }
            }
        }
        for journey in &self.journeys {
            if !self.passengers_at(journey.first()).contains(&journey.passenger) {
                return Err(NetError::NotAtJourneyStart {
                    passenger: self.registry.passenger_name(journey.passenger),
                });
            }
        }
        Ok(())
    }

    /// Validate final conditions: every passenger has exhausted its journey
    /// and stands in its final station's roster.  Reports the first
    /// violating entity.
    pub fn check_end(&self) -> NetResult<()> {
        for journey in &self.journeys {
            let p = journey.passenger;
            if self.journey_index[p.index()] != journey.last_index()
                || !self.passengers_at(journey.last()).contains(&p)
            {
                return Err(NetError::NotAtDestination {
                    passenger: self.registry.passenger_name(p),
                });
            }
        }
        Ok(())
    }
}
