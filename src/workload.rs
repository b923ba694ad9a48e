//! Workload distribution: how many tosses each participant receives

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Rank of the participant that reads input, distributes and aggregates
pub const COORDINATOR: usize = 0;

/// Whether the coordinator also throws darts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Only ranks 1.. sample; the coordinator contributes zero hits
    #[default]
    ExcludeCoordinator,
    /// Every rank samples, the coordinator included
    IncludeCoordinator,
}

impl Placement {
    /// Smallest participant count this placement can run with
    pub fn min_participants(self) -> usize {
        match self {
            Placement::ExcludeCoordinator => 2,
            Placement::IncludeCoordinator => 1,
        }
    }

    /// Whether a given rank runs the sampler
    pub fn samples(self, rank: usize) -> bool {
        rank != COORDINATOR || self == Placement::IncludeCoordinator
    }
}

/// Number of tosses handed to one participant.
///
/// Only [`Workload::share`] and a completed broadcast receive produce a `Share`,
/// so no participant can read a share before one was delivered to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share(u64);

impl Share {
    pub(crate) fn new(tosses: u64) -> Self {
        Self(tosses)
    }

    pub fn tosses(self) -> u64 {
        self.0
    }
}

/// Validated split of the requested total over the participants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    total_samples: u64,
    participants: usize,
    placement: Placement,
}

impl Workload {
    /// Validate the topology before any collective is issued
    pub fn new(total_samples: u64, participants: usize, placement: Placement) -> Result<Self, ConfigError> {
        if participants == 0 {
            return Err(ConfigError::NoParticipants);
        }
        let required = placement.min_participants();
        if participants < required {
            return Err(ConfigError::TooFewParticipants {
                required,
                actual: participants,
            });
        }
        Ok(Self {
            total_samples,
            participants,
            placement,
        })
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Participants that run the sampler
    pub fn sampling_participants(&self) -> usize {
        match self.placement {
            Placement::ExcludeCoordinator => self.participants - 1,
            Placement::IncludeCoordinator => self.participants,
        }
    }

    /// Floor division; the remainder is dropped
    pub fn share(&self) -> Share {
        Share::new(self.total_samples / self.sampling_participants() as u64)
    }

    /// Tosses actually thrown across the run, never more than requested
    pub fn samples_taken(&self) -> u64 {
        self.share().tosses() * self.sampling_participants() as u64
    }
}
