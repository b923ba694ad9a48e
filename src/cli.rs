//! Command line and interactive input for monte_pi

use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::aggregator::Denominator;
use crate::config::Config;
use crate::error::{InputError, PiError};
use crate::monte_carlo::Runtime;
use crate::sampler::SeedStrategy;
use crate::workload::Placement;

pub const PROMPT: &str = "Please enter the number of tosses:";

#[derive(Parser, Debug)]
#[command(name = "monte_pi")]
#[command(author, version, about = "Distributed Monte Carlo estimate of pi", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Participants in the run, coordinator included
    #[arg(short = 'n', long)]
    pub participants: Option<usize>,

    /// Whether the coordinator throws darts too
    #[arg(long, value_enum)]
    pub placement: Option<Placement>,

    /// Fixed run seed (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Divide by the requested total or by the darts actually thrown
    #[arg(long, value_enum)]
    pub denominator: Option<Denominator>,

    #[arg(long, value_enum)]
    pub runtime: Option<Runtime>,

    /// File the run summary is appended to
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Total tosses; prompts on stdin when omitted
    #[arg(short, long)]
    pub samples: Option<u64>,
}

impl Cli {
    /// Flags win over the config file
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(participants) = self.participants {
            config.participants = participants;
        }
        if let Some(placement) = self.placement {
            config.placement = placement;
        }
        if let Some(seed) = self.seed {
            config.seed = SeedStrategy::Fixed(seed);
        }
        if let Some(denominator) = self.denominator {
            config.denominator = denominator;
        }
        if let Some(runtime) = self.runtime {
            config.runtime = runtime;
        }
        if let Some(log_file) = &self.log_file {
            config.log_path = log_file.clone();
        }
        config
    }

    /// `--samples` when given, otherwise ask on `input`
    pub fn total_samples<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<u64, PiError> {
        match self.samples {
            Some(n) => Ok(n),
            None => Ok(prompt_sample_count(input, output)?),
        }
    }
}

/// Parse the first non-empty line of `input` as the total toss count
pub fn read_sample_count<R: BufRead>(input: R) -> Result<u64, InputError> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        return trimmed.parse::<u64>().map_err(|source| InputError::Invalid {
            input: trimmed.to_string(),
            source,
        });
    }
    Err(InputError::Missing)
}

/// Print the prompt and read the answer
pub fn prompt_sample_count<R: BufRead, W: Write>(input: R, mut output: W) -> Result<u64, InputError> {
    writeln!(output, "{PROMPT}")?;
    output.flush()?;
    read_sample_count(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_sample_count() {
        assert_eq!(read_sample_count(Cursor::new("3000000\n")).unwrap(), 3_000_000);
        assert_eq!(read_sample_count(Cursor::new("\n  42  \n")).unwrap(), 42);
        assert_eq!(read_sample_count(Cursor::new("0")).unwrap(), 0);
    }

    #[test]
    fn test_read_sample_count_rejects_garbage() {
        let err = read_sample_count(Cursor::new("lots\n")).unwrap_err();
        assert!(matches!(err, InputError::Invalid { ref input, .. } if input == "lots"));

        let err = read_sample_count(Cursor::new("-5\n")).unwrap_err();
        assert!(matches!(err, InputError::Invalid { .. }));
    }

    #[test]
    fn test_read_sample_count_empty_input() {
        assert!(matches!(read_sample_count(Cursor::new("")), Err(InputError::Missing)));
    }

    #[test]
    fn test_prompt_is_written() {
        let mut out = Vec::new();
        let n = prompt_sample_count(Cursor::new("10\n"), &mut out).unwrap();
        assert_eq!(n, 10);
        assert_eq!(String::from_utf8(out).unwrap().trim(), PROMPT);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "monte_pi",
            "-n",
            "6",
            "--placement",
            "include-coordinator",
            "--seed",
            "3",
            "--denominator",
            "sampled",
            "--runtime",
            "tasks",
            "--log-file",
            "runs.log",
        ]);
        let config = cli.apply(Config::default());
        assert_eq!(config.participants, 6);
        assert_eq!(config.placement, Placement::IncludeCoordinator);
        assert_eq!(config.seed, SeedStrategy::Fixed(3));
        assert_eq!(config.denominator, Denominator::Sampled);
        assert_eq!(config.runtime, Runtime::Tasks);
        assert_eq!(config.log_path, PathBuf::from("runs.log"));
    }

    #[test]
    fn test_placement_flag_overrides_file_back() {
        let cli = Cli::parse_from(["monte_pi", "--placement", "exclude-coordinator"]);
        let from_file = Config {
            placement: Placement::IncludeCoordinator,
            ..Default::default()
        };
        assert_eq!(cli.apply(from_file).placement, Placement::ExcludeCoordinator);
    }

    #[test]
    fn test_samples_flag_skips_prompt() {
        let cli = Cli::parse_from(["monte_pi", "--samples", "500"]);
        let mut out = Vec::new();
        assert_eq!(cli.total_samples(Cursor::new("garbage\n"), &mut out).unwrap(), 500);
        assert!(out.is_empty());
    }

    #[test]
    fn test_prompted_garbage_is_input_error() {
        let cli = Cli::parse_from(["monte_pi"]);
        let err = cli.total_samples(Cursor::new("many\n"), Vec::new()).unwrap_err();
        assert!(matches!(err, PiError::Input(InputError::Invalid { .. })));
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["monte_pi"]);
        let base = Config {
            participants: 9,
            ..Default::default()
        };
        assert_eq!(cli.apply(base.clone()), base);
    }
}
