//! Ordered replay of an event log against a fresh network.

use thiserror::Error;

use transit_event::{Event, ReplayError};
use transit_net::{NetError, Network};

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("initial conditions violated: {0}")]
    Start(NetError),

    #[error("event {index} ({event}): {source}")]
    Event {
        index:  usize,
        event:  String,
        source: ReplayError,
    },

    #[error("final conditions violated: {0}")]
    End(NetError),
}

/// Replay `events` in recorded order against `net`.
///
/// `net` must be freshly initialized from the same topology source that
/// seeded the live run.  Checks the start conditions, applies every event
/// via [`Event::validate_and_apply`], then checks the end conditions.  The
/// first violation wins; on failure `net` is left at the state just before
/// the offending event, which is often useful when debugging a bad log.
pub fn verify(net: &mut Network, events: &[Event]) -> Result<(), VerifyError> {
    net.check_start().map_err(VerifyError::Start)?;

    for (index, event) in events.iter().enumerate() {
        if let Err(source) = event.validate_and_apply(net) {
            return Err(VerifyError::Event {
                index,
                event: event.describe(net.registry()),
                source,
            });
        }
    }

    net.check_end().map_err(VerifyError::End)
}
