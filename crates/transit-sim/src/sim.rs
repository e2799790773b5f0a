//! The `Sim` runner: spawn agents, wait for quiescence, tear down.

use std::thread;
use std::time::Duration;

use transit_core::{PassengerId, StationId, TrainId};
use transit_event::Event;
use transit_net::Network;

use crate::agents::{PassengerAgent, TrainAgent};
use crate::shared::Shared;
use crate::{SimError, SimResult};

/// Everything a completed run leaves behind.
#[derive(Debug)]
pub struct SimOutcome {
    /// The network in its final state (all journeys exhausted).
    pub network: Network,
    /// The recorded event log, in append order.
    pub events: Vec<Event>,
}

/// One simulation run over a loaded [`Network`].
///
/// # Example
///
/// ```rust,ignore
/// let mut net = Network::new();
/// net.add_line("T", &["X", "Y"])?;
/// net.add_journey("p", &["X", "Y"])?;
/// let outcome = Sim::new(net)?.deadline(Duration::from_secs(5)).run()?;
/// ```
pub struct Sim {
    shared:    Shared,
    trains:    Vec<(TrainId, StationId)>,
    deadline:  Option<Duration>,
}

impl Sim {
    /// Validate initial conditions and seed every train's starting gate.
    ///
    /// Fails on anything `check_start` rejects — a moved train, a misplaced
    /// passenger, or two lines sharing a starting station.
    pub fn new(net: Network) -> SimResult<Self> {
        net.check_start()?;

        let trains: Vec<(TrainId, StationId)> = net
            .registry()
            .train_ids()
            .map(|t| Ok((t, net.train_station(t)?)))
            .collect::<SimResult<_>>()?;

        let shared = Shared::new(net);
        for &(train, start) in &trains {
            if let Err(holder) = shared.gates.gate(start).claim_initial(train) {
                // check_start already rejects shared starts; this guards the
                // gate/network state ever disagreeing.
                let net = shared.net();
                return Err(SimError::Config(format!(
                    "starting station {} already claimed by {}",
                    net.registry().station_name(start),
                    net.registry().train_name(holder),
                )));
            }
        }

        Ok(Self { shared, trains, deadline: None })
    }

    /// Bound the run: if any passenger is still unfinished after `d`, the
    /// run is cancelled and fails with [`SimError::Stalled`].  This is the
    /// liveness backstop for topologies whose journeys can never progress
    /// (or for genuine synchronization bugs).
    pub fn deadline(mut self, d: Duration) -> Self {
        self.deadline = Some(d);
        self
    }

    /// Run to quiescence: spawn one thread per train and per passenger,
    /// wait for every passenger to finish, cancel and join the trains, and
    /// validate the final state.
    pub fn run(self) -> SimResult<SimOutcome> {
        let shared = &self.shared;
        let passengers: Vec<PassengerId> =
            shared.net().registry().passenger_ids().collect();
        let total = passengers.len();

        let finished = thread::scope(|scope| -> SimResult<usize> {
            let mut handles = Vec::with_capacity(self.trains.len() + total);

            for &(train, start) in &self.trains {
                let name = format!("train-{}", shared.net().registry().train_name(train));
                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || TrainAgent::new(train, start).run(shared));
                match spawned {
                    Ok(handle) => handles.push((name, handle)),
                    Err(e) => {
                        // Unwind already-spawned agents before the scope
                        // tries to join them.
                        shared.cancel();
                        return Err(SimError::Io(e));
                    }
                }
            }
            for &p in &passengers {
                let name =
                    format!("passenger-{}", shared.net().registry().passenger_name(p));
                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || PassengerAgent::new(p).run(shared));
                match spawned {
                    Ok(handle) => handles.push((name, handle)),
                    Err(e) => {
                        shared.cancel();
                        return Err(SimError::Io(e));
                    }
                }
            }

            let finished = shared.wait_for_passengers(total, self.deadline);

            // All journeys done (or the deadline hit): tell every agent to
            // wind down at its next suspension point, then collect them.
            shared.cancel();
            let mut first_err = None;
            for (name, handle) in handles {
                match handle.join() {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        first_err.get_or_insert(e);
                    }
                    Err(_) => {
                        first_err.get_or_insert(SimError::AgentPanicked { thread: name });
                    }
                }
            }
            match first_err {
                Some(e) => Err(e),
                None => Ok(finished),
            }
        })?;

        if finished < total {
            return Err(SimError::Stalled { waiting: total - finished, total });
        }

        let (network, events) = self.shared.into_parts();
        network.check_end()?;
        Ok(SimOutcome { network, events })
    }
}
