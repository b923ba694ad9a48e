//! Configuration for monte_pi

use eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::aggregator::Denominator;
use crate::error::PiError;
use crate::monte_carlo::{RunPlan, Runtime};
use crate::sampler::SeedStrategy;
use crate::workload::{Placement, Workload};

/// Default name of the append-only run log
pub const DEFAULT_LOG_FILE: &str = "monte_pi_runs.log";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of participants, coordinator included
    #[serde(default = "default_participants")]
    pub participants: usize,

    /// Whether the coordinator also samples
    #[serde(default)]
    pub placement: Placement,

    /// Source of the run-level seed
    #[serde(default)]
    pub seed: SeedStrategy,

    /// What the reduced hit count is divided by
    #[serde(default)]
    pub denominator: Denominator,

    #[serde(default)]
    pub runtime: Runtime,

    /// File each run appends its summary line to
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_participants() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            participants: default_participants(),
            placement: Placement::default(),
            seed: SeedStrategy::default(),
            denominator: Denominator::default(),
            runtime: Runtime::default(),
            log_path: default_log_path(),
        }
    }
}

impl Config {
    /// Load config from file, or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::from_file(config_path);
        }

        let default_paths = [
            dirs::config_dir().map(|p| p.join("monte_pi").join("config.yml")),
            Some(PathBuf::from("monte_pi.yml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the topology for `total_samples` and fix the run seed
    pub fn plan(&self, total_samples: u64) -> Result<RunPlan, PiError> {
        let workload = Workload::new(total_samples, self.participants, self.placement)?;
        Ok(RunPlan {
            workload,
            denominator: self.denominator,
            run_seed: self.seed.run_seed(),
        })
    }
}
