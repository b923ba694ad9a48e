use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::io;

use monte_pi::cli::Cli;
use monte_pi::{run, runlog, Config};

fn setup_logging() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = cli.apply(config);

    let total_samples = cli
        .total_samples(io::stdin().lock(), io::stdout())
        .context("Failed to read number of tosses")?;

    let plan = config.plan(total_samples).context("Invalid run configuration")?;
    info!("run seed {}", plan.run_seed);

    let report = run(plan, config.runtime).context("Distributed run failed")?;

    println!("pi: {}", report.estimate);
    println!(
        "participants: {} ({} sampling), tosses: {} requested, {} thrown",
        report.participants, report.sampling_participants, report.total_samples, report.samples_taken
    );
    println!("Total time taken: {:.6}", report.elapsed.as_secs_f64());
    if let Some(error) = report.error() {
        info!("off by {:.6} from pi", error);
    }

    runlog::record(&config.log_path, &report);
    Ok(())
}
