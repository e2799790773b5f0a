//! Base error type.
//!
//! Sub-crates define their own error enums and either convert `TransitError`
//! in via `From`, or wrap it as one variant.  Both patterns are acceptable;
//! prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{PassengerId, StationId, TrainId};

/// The base error type for `transit-core` lookups.
#[derive(Debug, Error)]
pub enum TransitError {
    #[error("train {0} not found")]
    TrainNotFound(TrainId),

    #[error("station {0} not found")]
    StationNotFound(StationId),

    #[error("passenger {0} not found")]
    PassengerNotFound(PassengerId),

    #[error("unknown {kind} name {name:?}")]
    UnknownName { kind: &'static str, name: String },
}

/// Shorthand result type for all `transit-*` crates.
pub type TransitResult<T> = Result<T, TransitError>;
