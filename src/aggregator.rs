//! Turning the reduced hit count into an estimate and a run report

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::workload::Workload;

/// What the global hit count is divided by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Denominator {
    /// The total the user asked for, even when floor division threw fewer darts
    #[default]
    Requested,
    /// The darts actually thrown: share * sampling participants
    Sampled,
}

impl Denominator {
    pub fn samples(self, workload: &Workload) -> u64 {
        match self {
            Denominator::Requested => workload.total_samples(),
            Denominator::Sampled => workload.samples_taken(),
        }
    }
}

/// Point estimate of pi; undefined when no darts count towards the denominator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PiEstimate {
    Value(f64),
    Undefined,
}

impl PiEstimate {
    pub fn value(self) -> Option<f64> {
        match self {
            PiEstimate::Value(v) => Some(v),
            PiEstimate::Undefined => None,
        }
    }
}

impl fmt::Display for PiEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiEstimate::Value(v) => write!(f, "{v:.6}"),
            PiEstimate::Undefined => write!(f, "undefined"),
        }
    }
}

pub fn estimate_pi(global_hits: u64, samples: u64) -> PiEstimate {
    if samples == 0 {
        return PiEstimate::Undefined;
    }
    PiEstimate::Value(4.0 * global_hits as f64 / samples as f64)
}

/// Everything the coordinator reports once the reduction has completed
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub participants: usize,
    pub sampling_participants: usize,
    pub total_samples: u64,
    pub samples_taken: u64,
    pub global_hits: u64,
    pub estimate: PiEstimate,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new(workload: &Workload, denominator: Denominator, global_hits: u64, elapsed: Duration) -> Self {
        Self {
            participants: workload.participants(),
            sampling_participants: workload.sampling_participants(),
            total_samples: workload.total_samples(),
            samples_taken: workload.samples_taken(),
            global_hits,
            estimate: estimate_pi(global_hits, denominator.samples(workload)),
            elapsed,
        }
    }

    /// `participants, total, seconds, estimate`, counting sampling participants only
    pub fn log_line(&self) -> String {
        format!(
            "{}, {}, {:.6}, {}",
            self.sampling_participants,
            self.total_samples,
            self.elapsed.as_secs_f64(),
            self.estimate
        )
    }

    /// Absolute error against the true value, when the estimate is defined
    pub fn error(&self) -> Option<f64> {
        self.estimate.value().map(|v| (std::f64::consts::PI - v).abs())
    }
}
