//! The train and passenger agent state machines.
//!
//! Both agents follow the same shape: decide what to do next under the
//! network lock, then block (if they must) on a station gate — never the
//! other way around.  Every decision taken from a snapshot read is
//! re-validated under the network lock before it is acted on, because the
//! state may have changed while the agent was waking up.

use std::thread;
use std::time::Duration;

use transit_core::{PassengerId, StationId, TrainId};
use transit_event::Event;
use transit_net::{Cancelled, Network};

use crate::shared::Shared;
use crate::{SimError, SimResult};

/// How long a train lingers after signalling its arrival, giving passenger
/// threads a chance to act on the signal before the train contends for its
/// next station.  A scheduling hint only: passenger correctness rests
/// entirely on the arrival-notification protocol, and the simulation stays
/// correct (if less punctual) at zero.
const DWELL: Duration = Duration::from_millis(2);

// ── Train agent ───────────────────────────────────────────────────────────────

/// One per line.  Runs until cancelled; on cancellation it exits at a
/// suspension point with its current gate released and nothing half-moved.
pub(crate) struct TrainAgent {
    train: TrainId,
    curr:  StationId,
}

impl TrainAgent {
    /// `curr`'s gate must already be claimed for `train` (the runner seeds
    /// all starting gates before spawning).
    pub fn new(train: TrainId, curr: StationId) -> Self {
        Self { train, curr }
    }

    pub fn run(mut self, shared: &Shared) -> SimResult<()> {
        loop {
            if shared.cancelled() {
                shared.gates.gate(self.curr).release();
                return Ok(());
            }

            let next = shared.net().next_station_for_train(self.train)?;

            // Wake every passenger deciding at this station, then linger so
            // they can act before we contend for the next gate.
            shared.gates.gate(self.curr).signal_arrival();
            thread::yield_now();
            thread::sleep(DWELL);

            // Blocks until `next` is free.  We hold no mutex here and the
            // occupancy of `curr` stays ours, so a waiting passenger can
            // still board while we queue.
            match shared.gates.gate(next).claim_or_wait(self.train, shared.cancel_flag()) {
                Ok(()) => {}
                Err(Cancelled) => {
                    shared.gates.gate(self.curr).release();
                    return Ok(());
                }
            }

            // Entry to `next` is ours: move and log in one network section
            // so the recorded order matches the mutation order.
            {
                let mut net = shared.net();
                net.move_train(self.train, self.curr, next)?;
                shared.log.append(Event::Move { train: self.train, from: self.curr, to: next });
            }

            // Only now is `curr` truly vacated; wake the trains queued on it.
            shared.gates.gate(self.curr).release();
            self.curr = next;
        }
    }
}

// ── Passenger agent ───────────────────────────────────────────────────────────

/// What the passenger is waiting for, decided under the network lock.
enum Phase {
    /// Journey exhausted; the agent reports completion and exits.
    Finished,
    /// Waiting at `at` for `want` to show up.
    AtStation { at: StationId, want: TrainId },
    /// Riding `train`, waiting for it to reach `stop`.
    OnTrain { train: TrainId, stop: StationId },
}

/// One per journey.  Alternates between waiting to board and waiting to
/// deboard until the journey is exhausted.
pub(crate) struct PassengerAgent {
    passenger: PassengerId,
}

impl PassengerAgent {
    pub fn new(passenger: PassengerId) -> Self {
        Self { passenger }
    }

    pub fn run(self, shared: &Shared) -> SimResult<()> {
        loop {
            let phase = self.phase(&shared.net())?;
            let progressed = match phase {
                Phase::Finished => {
                    shared.note_passenger_finished();
                    return Ok(());
                }
                Phase::AtStation { at, want } => self.wait_to_board(shared, at, want)?,
                Phase::OnTrain { train, stop } => self.wait_to_deboard(shared, train, stop)?,
            };
            if !progressed {
                // Cancelled mid-journey (aborted run).  Exit without
                // reporting completion; check_end will name us.
                return Ok(());
            }
        }
    }

    fn phase(&self, net: &Network) -> SimResult<Phase> {
        if let Some(train) = net.train_of(self.passenger) {
            let stop = net
                .next_station_for_passenger(self.passenger)?
                .ok_or_else(|| {
                    SimError::Adrift(net.registry().passenger_name(self.passenger))
                })?;
            return Ok(Phase::OnTrain { train, stop });
        }
        if net.next_station_for_passenger(self.passenger)?.is_none() {
            return Ok(Phase::Finished);
        }
        let at = net.passenger_station(self.passenger)?;
        match net.train_to_board(self.passenger, at)? {
            Some(want) => Ok(Phase::AtStation { at, want }),
            // Unreachable for topologies that passed journey validation,
            // but a loud error beats an invisible permanent block.
            None => Err(SimError::Config(format!(
                "no line can carry passenger {} onward from {}",
                net.registry().passenger_name(self.passenger),
                net.registry().station_name(at),
            ))),
        }
    }

    /// Guarded boarding loop: check under the network lock, wait on the
    /// station's arrival channel, re-check.  Returns `false` on cancellation.
    fn wait_to_board(&self, shared: &Shared, at: StationId, want: TrainId) -> SimResult<bool> {
        let gate = shared.gates.gate(at);
        let mut seen = gate.arrival_epoch();
        loop {
            {
                let mut net = shared.net();
                if net.train_at(at) == Some(want) {
                    net.board_passenger(want, self.passenger, at)?;
                    shared.log.append(Event::Board {
                        passenger: self.passenger,
                        train:     want,
                        station:   at,
                    });
                    return Ok(true);
                }
            }
            match gate.await_arrival(seen, shared.cancel_flag()) {
                Ok(epoch) => seen = epoch,
                Err(Cancelled) => return Ok(false),
            }
        }
    }

    /// Guarded deboarding loop on the *next* stop's arrival channel.
    /// Returns `false` on cancellation.
    fn wait_to_deboard(
        &self,
        shared: &Shared,
        train: TrainId,
        stop: StationId,
    ) -> SimResult<bool> {
        let gate = shared.gates.gate(stop);
        let mut seen = gate.arrival_epoch();
        loop {
            {
                let mut net = shared.net();
                if net.train_station(train)? == stop {
                    net.deboard_passenger(train, self.passenger, stop)?;
                    shared.log.append(Event::Deboard {
                        passenger: self.passenger,
                        train,
                        station: stop,
                    });
                    return Ok(true);
                }
            }
            match gate.await_arrival(seen, shared.cancel_flag()) {
                Ok(epoch) => seen = epoch,
                Err(Cancelled) => return Ok(false),
            }
        }
    }
}
