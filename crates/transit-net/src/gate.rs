//! Per-station synchronization: exclusive occupancy plus arrival signaling.
//!
//! Each station carries two independent notification channels:
//!
//! - **occupancy** — trains contending for entry.  `Free ⇄ Occupied(train)`,
//!   guarded by a mutex and an availability condvar.
//! - **arrival** — passengers watching for "a train is now here".  A
//!   generation counter plus condvar, deliberately decoupled from the
//!   occupancy mutex so a slow passenger scan never sits inside a train's
//!   critical section.
//!
//! Every wait is a `wait_timeout` loop that re-checks its condition after
//! each wake (spurious wakeups, multiple competing waiters) and polls a
//! shared cancellation flag, so a shutting-down simulation unwinds every
//! waiter within one poll interval.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Duration;

use transit_core::{StationId, TrainId};

/// A blocking wait was interrupted by cooperative cancellation.
///
/// Not a failure: agents observing this release whatever they hold and exit
/// their loop.
#[derive(Debug, PartialEq, Eq)]
pub struct Cancelled;

/// How long a waiter sleeps between cancellation-flag polls.
const POLL: Duration = Duration::from_millis(5);

/// Recover the guard from a poisoned mutex.
///
/// A poisoning panic in another agent does not corrupt gate state (both
/// channels hold plain scalars); the replay verifier is the integrity
/// authority, so waiters keep going rather than cascading the panic.
fn relock<'a, T>(
    r: Result<MutexGuard<'a, T>, std::sync::PoisonError<MutexGuard<'a, T>>>,
) -> MutexGuard<'a, T> {
    r.unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ── StationGate ───────────────────────────────────────────────────────────────

/// The per-station mutual-exclusion and notification object.
#[derive(Debug, Default)]
pub struct StationGate {
    // Occupancy channel.
    occupant:  Mutex<Option<TrainId>>,
    available: Condvar,

    // Arrival channel: bumped on every train arrival, never reset.
    arrivals: Mutex<u64>,
    arrived:  Condvar,
}

impl StationGate {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Occupancy channel ─────────────────────────────────────────────────

    /// Non-blocking `Free → Occupied(train)`, used when seeding trains onto
    /// their starting stations.  Returns the holder on contention.
    pub fn claim_initial(&self, train: TrainId) -> Result<(), TrainId> {
        let mut slot = relock(self.occupant.lock());
        match *slot {
            Some(holder) => Err(holder),
            None => {
                *slot = Some(train);
                Ok(())
            }
        }
    }

    /// Blocking `Free → Occupied(train)`.
    ///
    /// Suspends on the availability condvar while the station is held and
    /// re-checks after every wake.  Observes `cancel` at the suspension
    /// point; on cancellation nothing is claimed and no waiter registration
    /// lingers.
    pub fn claim_or_wait(&self, train: TrainId, cancel: &AtomicBool) -> Result<(), Cancelled> {
        let mut slot = relock(self.occupant.lock());
        while slot.is_some() {
            if cancel.load(Ordering::Acquire) {
                return Err(Cancelled);
            }
            let (guard, _timeout) = relock2(self.available.wait_timeout(slot, POLL));
            slot = guard;
        }
        *slot = Some(train);
        Ok(())
    }

    /// `Occupied → Free`; wakes all trains waiting on availability.
    pub fn release(&self) {
        let mut slot = relock(self.occupant.lock());
        *slot = None;
        drop(slot);
        self.available.notify_all();
    }

    /// Current holder, if any.  Snapshot read — may change immediately after
    /// returning; decisions based on it must be re-validated under the
    /// network lock.
    pub fn occupant(&self) -> Option<TrainId> {
        *relock(self.occupant.lock())
    }

    // ── Arrival channel ───────────────────────────────────────────────────

    /// Current arrival generation.  Sample *before* checking the boarding
    /// condition, then pass to [`await_arrival`][Self::await_arrival]: any
    /// arrival between the sample and the wait bumps the counter, so the
    /// wakeup cannot be lost.
    pub fn arrival_epoch(&self) -> u64 {
        *relock(self.arrivals.lock())
    }

    /// Announce "a train is now at this station" to all waiting passengers.
    pub fn signal_arrival(&self) {
        let mut epoch = relock(self.arrivals.lock());
        *epoch += 1;
        drop(epoch);
        self.arrived.notify_all();
    }

    /// Block until an arrival newer than `seen` is signalled (or
    /// cancellation).  Returns the new generation to pass to the next call.
    ///
    /// A wake implies only "something arrived since", never "the right train
    /// is here" — callers re-check their own condition and loop.
    pub fn await_arrival(&self, seen: u64, cancel: &AtomicBool) -> Result<u64, Cancelled> {
        let mut epoch = relock(self.arrivals.lock());
        while *epoch == seen {
            if cancel.load(Ordering::Acquire) {
                return Err(Cancelled);
            }
            let (guard, _timeout) = relock2(self.arrived.wait_timeout(epoch, POLL));
            epoch = guard;
        }
        Ok(*epoch)
    }
}

/// `relock` for the `(guard, WaitTimeoutResult)` pair `wait_timeout` returns.
fn relock2<'a, T>(
    r: Result<
        (MutexGuard<'a, T>, std::sync::WaitTimeoutResult),
        std::sync::PoisonError<(MutexGuard<'a, T>, std::sync::WaitTimeoutResult)>,
    >,
) -> (MutexGuard<'a, T>, std::sync::WaitTimeoutResult) {
    r.unwrap_or_else(std::sync::PoisonError::into_inner)
}

// ── GateSet ───────────────────────────────────────────────────────────────────

/// One [`StationGate`] per registered station, indexed by `StationId`.
///
/// Built once per run, after topology loading; lifecycle matches the network
/// it was sized from.
#[derive(Debug, Default)]
pub struct GateSet {
    gates: Vec<StationGate>,
}

impl GateSet {
    /// Build a gate per station for a registry of `station_count` stations.
    pub fn with_stations(station_count: usize) -> Self {
        let mut gates = Vec::with_capacity(station_count);
        gates.resize_with(station_count, StationGate::new);
        Self { gates }
    }

    pub fn gate(&self, s: StationId) -> &StationGate {
        &self.gates[s.index()]
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}
