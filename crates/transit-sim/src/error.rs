use thiserror::Error;

use transit_net::NetError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Net(#[from] NetError),

    #[error("simulation stalled: {waiting} of {total} passengers never finished")]
    Stalled { waiting: usize, total: usize },

    #[error("agent thread {thread:?} panicked")]
    AgentPanicked { thread: String },

    #[error("passenger {0} is riding a train with no remaining stops")]
    Adrift(String),
}

pub type SimResult<T> = Result<T, SimError>;
