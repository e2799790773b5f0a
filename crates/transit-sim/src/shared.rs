//! State shared by every agent thread in one run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use transit_event::EventLog;
use transit_net::{GateSet, Network};

/// Poll interval for the passenger-completion latch.
const POLL: Duration = Duration::from_millis(5);

/// Everything the agents race over: the network behind its mutex, the
/// per-station gates, the event log, the cancellation flag, and the
/// finished-passenger latch the runner blocks on.
pub(crate) struct Shared {
    net:      Mutex<Network>,
    pub gates: GateSet,
    pub log:  EventLog,
    cancel:   AtomicBool,
    finished: Mutex<usize>,
    latch:    Condvar,
}

impl Shared {
    pub fn new(net: Network) -> Self {
        let gates = GateSet::with_stations(net.registry().station_count());
        Self {
            net: Mutex::new(net),
            gates,
            log: EventLog::new(),
            cancel: AtomicBool::new(false),
            finished: Mutex::new(0),
            latch: Condvar::new(),
        }
    }

    /// Lock the network for one short read-validate-mutate-append section.
    ///
    /// Never hold the returned guard across a gate wait or a sleep.  A
    /// poisoned lock is recovered rather than propagated: the replay
    /// verifier, not the mutex, is the integrity authority.
    pub fn net(&self) -> MutexGuard<'_, Network> {
        self.net.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    pub fn cancel_flag(&self) -> &AtomicBool {
        &self.cancel
    }

    pub fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    // ── Passenger-completion latch ────────────────────────────────────────

    pub fn note_passenger_finished(&self) {
        let mut n = self.finished.lock().unwrap_or_else(PoisonError::into_inner);
        *n += 1;
        drop(n);
        self.latch.notify_all();
    }

    /// Block until `count` passengers have finished, or until `deadline`
    /// elapses.  Returns how many finished.
    pub fn wait_for_passengers(&self, count: usize, deadline: Option<Duration>) -> usize {
        let start = Instant::now();
        let mut n = self.finished.lock().unwrap_or_else(PoisonError::into_inner);
        while *n < count {
            if deadline.is_some_and(|d| start.elapsed() >= d) {
                return *n;
            }
            let (guard, _timeout) = self
                .latch
                .wait_timeout(n, POLL)
                .unwrap_or_else(PoisonError::into_inner);
            n = guard;
        }
        *n
    }

    /// Tear down after all threads have joined, yielding the final network
    /// and the recorded events.
    pub fn into_parts(self) -> (Network, Vec<transit_event::Event>) {
        let net = self.net.into_inner().unwrap_or_else(PoisonError::into_inner);
        (net, self.log.into_events())
    }
}
