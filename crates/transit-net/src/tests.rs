//! Unit tests for topology registration, network state, and station gates.

#[cfg(test)]
mod topology {
    use crate::{NetError, Network};

    #[test]
    fn add_line_places_train_at_first_station() {
        let mut net = Network::new();
        let red = net.add_line("red", &["Davis", "Porter", "Harvard", "Central"]).unwrap();
        let davis = net.registry().station("Davis").unwrap();
        assert_eq!(net.train_station(red).unwrap(), davis);
        assert_eq!(net.train_index(red).unwrap(), 0);
    }

    #[test]
    fn add_journey_places_passenger_at_first_station() {
        let mut net = Network::new();
        net.add_line("red", &["Davis", "Porter", "Harvard", "Central"]).unwrap();
        let anna = net.add_journey("Anna", &["Porter", "Harvard"]).unwrap();
        let porter = net.registry().station("Porter").unwrap();
        assert!(net.passengers_at(porter).contains(&anna));
        assert_eq!(net.passenger_station(anna).unwrap(), porter);
        assert_eq!(net.journey_index(anna).unwrap(), 0);
    }

    #[test]
    fn short_line_is_a_config_error() {
        let mut net = Network::new();
        match net.add_line("stub", &["Lonely"]) {
            Err(NetError::LineTooShort { name, got }) => {
                assert_eq!(name, "stub");
                assert_eq!(got, 1);
            }
            other => panic!("expected LineTooShort, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_line_rejected() {
        let mut net = Network::new();
        net.add_line("red", &["A", "B"]).unwrap();
        assert!(matches!(net.add_line("red", &["C", "D"]), Err(NetError::DuplicateLine(_))));
    }

    #[test]
    fn journey_to_unserved_station_rejected() {
        let mut net = Network::new();
        net.add_line("red", &["A", "B"]).unwrap();
        match net.add_journey("Anna", &["A", "Nowhere"]) {
            Err(NetError::UnservedStation { passenger, station }) => {
                assert_eq!(passenger, "Anna");
                assert_eq!(station, "Nowhere");
            }
            other => panic!("expected UnservedStation, got {other:?}"),
        }
    }

    #[test]
    fn journey_leg_with_no_shared_line_rejected() {
        let mut net = Network::new();
        net.add_line("red", &["A", "B"]).unwrap();
        net.add_line("blue", &["C", "D"]).unwrap();
        // A and C both exist, but no single line serves the A→C leg.
        match net.add_journey("Anna", &["A", "C"]) {
            Err(NetError::UnservedLeg { from, to, .. }) => {
                assert_eq!(from, "A");
                assert_eq!(to, "C");
            }
            other => panic!("expected UnservedLeg, got {other:?}"),
        }
    }

    #[test]
    fn transfer_journey_is_accepted_when_each_leg_is_served() {
        let mut net = Network::new();
        net.add_line("red", &["Harvard", "Central", "MIT"]).unwrap();
        net.add_line("pink", &["Porter", "Harvard", "Davis"]).unwrap();
        // Porter→Harvard on pink, Harvard→Central on red.
        assert!(net.add_journey("Abby", &["Porter", "Harvard", "Central"]).is_ok());
    }
}

#[cfg(test)]
mod movement {
    use crate::Network;

    /// Bounce rule on a 3-station line: A→B→C→B→A→B, reversing exactly at
    /// the endpoints.
    #[test]
    fn bounce_sequence() {
        let mut net = Network::new();
        let t = net.add_line("line", &["A", "B", "C"]).unwrap();
        let id = |n: &str| net.registry().station(n).unwrap();
        let (a, b, c) = (id("A"), id("B"), id("C"));

        let mut visited = vec![net.train_station(t).unwrap()];
        for _ in 0..5 {
            let from = net.train_station(t).unwrap();
            let to = net.next_station_for_train(t).unwrap();
            net.move_train(t, from, to).unwrap();
            visited.push(to);
        }
        assert_eq!(visited, vec![a, b, c, b, a, b]);
    }

    #[test]
    fn next_station_applies_direction_mid_line() {
        let mut net = Network::new();
        let t = net.add_line("line", &["A", "B", "C", "D"]).unwrap();
        let reg = net.registry();
        let (b, c, d) = (
            reg.station("B").unwrap(),
            reg.station("C").unwrap(),
            reg.station("D").unwrap(),
        );

        // Walk to the end: A→B→C→D, then bounce back.
        for _ in 0..3 {
            let from = net.train_station(t).unwrap();
            let to = net.next_station_for_train(t).unwrap();
            net.move_train(t, from, to).unwrap();
        }
        assert_eq!(net.train_station(t).unwrap(), d);
        // Reversed: from D the next is C, and from C (mid-line, reverse) B.
        assert_eq!(net.next_station_for_train(t).unwrap(), c);
        net.move_train(t, d, c).unwrap();
        assert_eq!(net.next_station_for_train(t).unwrap(), b);
    }

    #[test]
    fn occupancy_is_global_across_lines() {
        let mut net = Network::new();
        let red = net.add_line("red", &["A", "B"]).unwrap();
        net.add_line("blue", &["B", "C"]).unwrap();
        let b = net.registry().station("B").unwrap();

        // blue starts at B, so B is not free even for red.
        assert!(!net.station_is_free(b));
        assert_ne!(net.train_at(b), Some(red));
    }
}

#[cfg(test)]
mod passengers {
    use crate::Network;

    #[test]
    fn next_station_sentinel_at_journey_end() {
        let mut net = Network::new();
        net.add_line("red", &["A", "B"]).unwrap();
        let p = net.add_journey("Anna", &["A", "B"]).unwrap();
        assert!(net.next_station_for_passenger(p).unwrap().is_some());

        let t = net.registry().train("red").unwrap();
        let (a, b) =
            (net.registry().station("A").unwrap(), net.registry().station("B").unwrap());
        net.board_passenger(t, p, a).unwrap();
        net.deboard_passenger(t, p, b).unwrap();
        assert_eq!(net.next_station_for_passenger(p).unwrap(), None);
    }

    #[test]
    fn single_station_journey_starts_arrived() {
        let mut net = Network::new();
        net.add_line("red", &["A", "B"]).unwrap();
        let p = net.add_journey("Solo", &["A"]).unwrap();
        assert_eq!(net.next_station_for_passenger(p).unwrap(), None);
        assert!(net.train_to_board(p, net.registry().station("A").unwrap()).unwrap().is_none());
        assert!(net.check_end().is_ok());
    }

    #[test]
    fn train_to_board_picks_first_registered_line() {
        let mut net = Network::new();
        let red = net.add_line("red", &["A", "B"]).unwrap();
        net.add_line("blue", &["A", "B", "C"]).unwrap();
        let p = net.add_journey("Anna", &["A", "B"]).unwrap();
        let a = net.registry().station("A").unwrap();
        // Both lines serve (A, B); registration order breaks the tie.
        assert_eq!(net.train_to_board(p, a).unwrap(), Some(red));
    }

    #[test]
    fn board_and_deboard_move_rosters_and_index() {
        let mut net = Network::new();
        let t = net.add_line("red", &["A", "B", "C"]).unwrap();
        let p = net.add_journey("Anna", &["A", "C"]).unwrap();
        let id = |n: &str| net.registry().station(n).unwrap();
        let (a, c) = (id("A"), id("C"));

        net.board_passenger(t, p, a).unwrap();
        assert!(net.passengers_on(t).unwrap().contains(&p));
        assert!(!net.passengers_at(a).contains(&p));
        assert_eq!(net.train_of(p), Some(t));
        // Riding does not change the recorded station.
        assert_eq!(net.passenger_station(p).unwrap(), a);
        assert_eq!(net.journey_index(p).unwrap(), 0);

        net.deboard_passenger(t, p, c).unwrap();
        assert!(!net.passengers_on(t).unwrap().contains(&p));
        assert!(net.passengers_at(c).contains(&p));
        assert_eq!(net.train_of(p), None);
        assert_eq!(net.passenger_station(p).unwrap(), c);
        assert_eq!(net.journey_index(p).unwrap(), 1);
    }
}

#[cfg(test)]
mod boundary_checks {
    use crate::{NetError, Network};

    #[test]
    fn check_start_accepts_fresh_network() {
        let mut net = Network::new();
        net.add_line("red", &["MGH", "Park Street", "Downtown Crossing"]).unwrap();
        net.add_line("green", &["Copley", "Boylston", "Park Street"]).unwrap();
        net.add_journey("Anna", &["Park Street", "Downtown Crossing"]).unwrap();
        net.check_start().unwrap();
    }

    #[test]
    fn check_start_rejects_moved_train() {
        let mut net = Network::new();
        let t = net.add_line("red", &["A", "B"]).unwrap();
        let id = |n: &str| net.registry().station(n).unwrap();
        net.move_train(t, id("A"), id("B")).unwrap();
        assert!(matches!(net.check_start(), Err(NetError::NotAtStart { .. })));
    }

    #[test]
    fn check_start_rejects_shared_starting_station() {
        let mut net = Network::new();
        net.add_line("red", &["X", "A"]).unwrap();
        net.add_line("blue", &["X", "B"]).unwrap();
        match net.check_start() {
            Err(NetError::SharedStation { station, .. }) => assert_eq!(station, "X"),
            other => panic!("expected SharedStation, got {other:?}"),
        }
    }

    #[test]
    fn check_end_requires_finished_journeys() {
        let mut net = Network::new();
        let t = net.add_line("red", &["A", "B"]).unwrap();
        let p = net.add_journey("Anna", &["A", "B"]).unwrap();
        assert!(matches!(net.check_end(), Err(NetError::NotAtDestination { .. })));

        let reg = net.registry();
        let (a, b) = (reg.station("A").unwrap(), reg.station("B").unwrap());
        net.board_passenger(t, p, a).unwrap();
        net.deboard_passenger(t, p, b).unwrap();
        net.check_end().unwrap();
    }
}

#[cfg(test)]
mod gates {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    use transit_core::TrainId;

    use crate::{Cancelled, GateSet, StationGate};

    fn no_cancel() -> AtomicBool {
        AtomicBool::new(false)
    }

    #[test]
    fn claim_release_cycle() {
        let gate = StationGate::new();
        assert_eq!(gate.occupant(), None);
        gate.claim_initial(TrainId(0)).unwrap();
        assert_eq!(gate.occupant(), Some(TrainId(0)));
        assert_eq!(gate.claim_initial(TrainId(1)), Err(TrainId(0)));
        gate.release();
        assert_eq!(gate.occupant(), None);
    }

    #[test]
    fn claim_or_wait_blocks_until_release() {
        let gate = Arc::new(StationGate::new());
        gate.claim_initial(TrainId(0)).unwrap();

        let contender = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                let cancel = no_cancel();
                gate.claim_or_wait(TrainId(1), &cancel).unwrap();
                gate.occupant()
            })
        };

        // Give the contender time to park on the availability condvar.
        thread::sleep(Duration::from_millis(30));
        assert_eq!(gate.occupant(), Some(TrainId(0)));

        gate.release();
        assert_eq!(contender.join().unwrap(), Some(TrainId(1)));
    }

    #[test]
    fn claim_or_wait_observes_cancellation() {
        let gate = Arc::new(StationGate::new());
        gate.claim_initial(TrainId(0)).unwrap();
        let cancel = Arc::new(AtomicBool::new(false));

        let waiter = {
            let (gate, cancel) = (Arc::clone(&gate), Arc::clone(&cancel));
            thread::spawn(move || gate.claim_or_wait(TrainId(1), &cancel))
        };

        thread::sleep(Duration::from_millis(20));
        cancel.store(true, Ordering::Release);
        assert_eq!(waiter.join().unwrap(), Err(Cancelled));
        // Nothing was claimed on the cancelled path.
        assert_eq!(gate.occupant(), Some(TrainId(0)));
    }

    #[test]
    fn arrival_epoch_is_not_lost_between_check_and_wait() {
        let gate = StationGate::new();
        let seen = gate.arrival_epoch();
        // Arrival lands before the waiter parks: await must return at once.
        gate.signal_arrival();
        let cancel = no_cancel();
        let newer = gate.await_arrival(seen, &cancel).unwrap();
        assert!(newer > seen);
    }

    #[test]
    fn await_arrival_wakes_all_waiters() {
        let gate = Arc::new(StationGate::new());
        let seen = gate.arrival_epoch();

        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let gate = Arc::clone(&gate);
                thread::spawn(move || {
                    let cancel = AtomicBool::new(false);
                    gate.await_arrival(seen, &cancel).unwrap()
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        gate.signal_arrival();
        for w in waiters {
            assert_eq!(w.join().unwrap(), seen + 1);
        }
    }

    #[test]
    fn gate_set_has_one_gate_per_station() {
        let gates = GateSet::with_stations(4);
        assert_eq!(gates.len(), 4);
        assert!(!gates.is_empty());
    }
}
