//! Error types for a distributed pi run

use std::num::ParseIntError;
use thiserror::Error;

/// Setup problems detected before any collective is issued
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a run needs at least one participant")]
    NoParticipants,

    #[error("{actual} participant(s) cannot run with a non-sampling coordinator, need at least {required}")]
    TooFewParticipants { required: usize, actual: usize },
}

/// Problems with the user-supplied sample count
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no sample count was entered")]
    Missing,

    #[error("invalid sample count {input:?}: {source}")]
    Invalid {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("failed to read sample count: {0}")]
    Io(#[from] std::io::Error),
}

/// Which collective was in flight when a peer vanished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collective {
    Broadcast,
    Reduce,
}

impl std::fmt::Display for Collective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collective::Broadcast => write!(f, "broadcast"),
            Collective::Reduce => write!(f, "sum-reduction"),
        }
    }
}

/// The single failure mode of the scatter/gather round trip
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{collective} did not complete: participant {rank} is gone")]
pub struct CollectiveError {
    pub collective: Collective,
    pub rank: usize,
}

/// Top level error for a run
#[derive(Debug, Error)]
pub enum PiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Collective(#[from] CollectiveError),

    #[error("runtime failure: {0}")]
    Runtime(String),
}
