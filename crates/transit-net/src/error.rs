use thiserror::Error;

use transit_core::TransitError;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("line {name:?} must have at least 2 stations (got {got})")]
    LineTooShort { name: String, got: usize },

    #[error("line {0:?} is already defined")]
    DuplicateLine(String),

    #[error("journey for {name:?} must have at least 1 station")]
    EmptyJourney { name: String },

    #[error("passenger {0:?} already has a journey")]
    DuplicateJourney(String),

    #[error("journey for {passenger:?} visits {station:?}, which is on no line")]
    UnservedStation { passenger: String, station: String },

    #[error(
        "journey for {passenger:?} needs a train from {from:?} to {to:?}, \
         but no single line serves both"
    )]
    UnservedLeg {
        passenger: String,
        from:      String,
        to:        String,
    },

    #[error("line {train} is not at its starting station")]
    NotAtStart { train: String },

    #[error("stations must hold at most one train, but {station} holds {first} and {second}")]
    SharedStation {
        station: String,
        first:   String,
        second:  String,
    },

    #[error("passenger {passenger} is not at their starting station")]
    NotAtJourneyStart { passenger: String },

    #[error("passenger {passenger} is not at their final destination")]
    NotAtDestination { passenger: String },

    #[error(transparent)]
    Entity(#[from] TransitError),
}

pub type NetResult<T> = Result<T, NetError>;
