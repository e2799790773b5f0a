//! Replay precondition failures.
//!
//! Every variant names the entities and the violated condition, because a
//! replay failure is the report a human reads to find the synchronization
//! bug (or the log tampering) behind it.

use thiserror::Error;

use transit_net::NetError;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("train {train} must currently be at {station}")]
    TrainElsewhere { train: String, station: String },

    #[error("train {train} must proceed to {station}")]
    WrongHeading { train: String, station: String },

    #[error("only one train can be at {station}")]
    StationOccupied { station: String },

    #[error("passenger {passenger} must currently be at {station}")]
    PassengerElsewhere { passenger: String, station: String },

    #[error("train {train} is not the train passenger {passenger} should board")]
    WrongTrain { passenger: String, train: String },

    #[error("passenger {passenger} is not on train {train}")]
    NotOnTrain { passenger: String, train: String },

    #[error("passenger {passenger} should not deboard at {station}")]
    NotTheStop { passenger: String, station: String },

    #[error(transparent)]
    Net(#[from] NetError),
}
