//! The closed event union and its per-variant replay logic.

use transit_core::{PassengerId, Registry, StationId, TrainId};
use transit_net::Network;

use crate::ReplayError;

/// An immutable, equality-comparable record of one state transition.
///
/// | Variant   | Preconditions                                               | Mutation            |
/// |-----------|-------------------------------------------------------------|---------------------|
/// | `Move`    | train at `from`; next station is `to`; `to` free            | `move_train`        |
/// | `Board`   | train at `station`; passenger at `station`; right train     | `board_passenger`   |
/// | `Deboard` | passenger on train; train at `station`; it's the next stop  | `deboard_passenger` |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Event {
    Board {
        passenger: PassengerId,
        train:     TrainId,
        station:   StationId,
    },
    Deboard {
        passenger: PassengerId,
        train:     TrainId,
        station:   StationId,
    },
    Move {
        train: TrainId,
        from:  StationId,
        to:    StationId,
    },
}

impl Event {
    /// Check this event's preconditions against `net` and, if they hold,
    /// apply its mutation.  A violated precondition yields a descriptive
    /// [`ReplayError`] and leaves `net` untouched.
    pub fn validate_and_apply(&self, net: &mut Network) -> Result<(), ReplayError> {
        let reg = net.registry();
        match *self {
            Event::Move { train, from, to } => {
                if net.train_station(train)? != from {
                    return Err(ReplayError::TrainElsewhere {
                        train:   reg.train_name(train),
                        station: reg.station_name(from),
                    });
                }
                if net.next_station_for_train(train)? != to {
                    return Err(ReplayError::WrongHeading {
                        train:   reg.train_name(train),
                        station: reg.station_name(to),
                    });
                }
                if !net.station_is_free(to) {
                    return Err(ReplayError::StationOccupied {
                        station: reg.station_name(to),
                    });
                }
                net.move_train(train, from, to)?;
                Ok(())
            }

            Event::Board { passenger, train, station } => {
                if net.train_station(train)? != station {
                    return Err(ReplayError::TrainElsewhere {
                        train:   reg.train_name(train),
                        station: reg.station_name(station),
                    });
                }
                if net.passenger_station(passenger)? != station
                    || !net.passengers_at(station).contains(&passenger)
                {
                    return Err(ReplayError::PassengerElsewhere {
                        passenger: reg.passenger_name(passenger),
                        station:   reg.station_name(station),
                    });
                }
                if net.train_to_board(passenger, station)? != Some(train) {
                    return Err(ReplayError::WrongTrain {
                        passenger: reg.passenger_name(passenger),
                        train:     reg.train_name(train),
                    });
                }
                net.board_passenger(train, passenger, station)?;
                Ok(())
            }

            Event::Deboard { passenger, train, station } => {
                if !net.passengers_on(train)?.contains(&passenger) {
                    return Err(ReplayError::NotOnTrain {
                        passenger: reg.passenger_name(passenger),
                        train:     reg.train_name(train),
                    });
                }
                if net.train_station(train)? != station {
                    return Err(ReplayError::TrainElsewhere {
                        train:   reg.train_name(train),
                        station: reg.station_name(station),
                    });
                }
                if net.next_station_for_passenger(passenger)? != Some(station) {
                    return Err(ReplayError::NotTheStop {
                        passenger: reg.passenger_name(passenger),
                        station:   reg.station_name(station),
                    });
                }
                net.deboard_passenger(train, passenger, station)?;
                Ok(())
            }
        }
    }

    /// Human-readable transcript line, e.g. `Train red moves from A to B`.
    pub fn describe(&self, reg: &Registry) -> String {
        match *self {
            Event::Board { passenger, train, station } => format!(
                "Passenger {} boards {} at {}",
                reg.passenger_name(passenger),
                reg.train_name(train),
                reg.station_name(station),
            ),
            Event::Deboard { passenger, train, station } => format!(
                "Passenger {} deboards {} at {}",
                reg.passenger_name(passenger),
                reg.train_name(train),
                reg.station_name(station),
            ),
            Event::Move { train, from, to } => format!(
                "Train {} moves from {} to {}",
                reg.train_name(train),
                reg.station_name(from),
                reg.station_name(to),
            ),
        }
    }
}
