//! monte_pi - distributed Monte Carlo estimate of pi
//!
//! A coordinator splits the requested tosses evenly over the participants,
//! broadcasts the share, every sampling participant throws its darts with its
//! own seeded RNG, and a sum-reduction brings the hit counts back to the
//! coordinator, which turns them into `4 * hits / tosses`.
//!
//! # Example
//!
//! ```no_run
//! use monte_pi::{run, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config { participants: 4, ..Default::default() };
//! let plan = config.plan(3_000_000)?;
//! let report = run(plan, config.runtime)?;
//! println!("pi: {}", report.estimate);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod cli;
pub mod collective;
pub mod config;
pub mod error;
pub mod monte_carlo;
pub mod runlog;
pub mod sampler;
pub mod workload;

pub use aggregator::{estimate_pi, Denominator, PiEstimate, RunReport};
pub use config::Config;
pub use error::{CollectiveError, ConfigError, InputError, PiError};
pub use monte_carlo::{run, run_tasks, run_threads, RunPlan, Runtime};
pub use sampler::{play_darts, SeedStrategy};
pub use workload::{Placement, Share, Workload};
