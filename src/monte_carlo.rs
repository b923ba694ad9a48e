use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Instant;
use tokio::task;

use crate::aggregator::{Denominator, RunReport};
use crate::collective::{world, CoordinatorLink, WorkerLink};
use crate::error::{CollectiveError, PiError};
use crate::sampler::{participant_rng, play_darts};
use crate::workload::{Workload, COORDINATOR};

/// How participants are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Runtime {
    /// One OS thread per worker, coordinator on the calling thread
    #[default]
    Threads,
    /// Every participant on tokio's blocking pool
    Tasks,
}

/// Validated inputs of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunPlan {
    pub workload: Workload,
    pub denominator: Denominator,
    pub run_seed: u64,
}

fn coordinator(link: CoordinatorLink, plan: RunPlan) -> Result<RunReport, CollectiveError> {
    let start = Instant::now();
    let workload = plan.workload;

    let share = link.broadcast(workload.share())?;
    let local = if workload.placement().samples(COORDINATOR) {
        let mut rng = participant_rng(plan.run_seed, COORDINATOR);
        play_darts(share.tosses(), &mut rng)
    } else {
        0
    };
    debug!("participant {} threw {} darts, {} inside", COORDINATOR, share.tosses(), local);

    let global_hits = link.reduce_sum(local)?;
    Ok(RunReport::new(&workload, plan.denominator, global_hits, start.elapsed()))
}

fn worker(link: WorkerLink, run_seed: u64) -> Result<u64, CollectiveError> {
    let share = link.receive_share()?;
    let rank = link.rank();

    let mut rng = participant_rng(run_seed, rank);
    let inside = play_darts(share.tosses(), &mut rng);
    debug!("participant {} threw {} darts, {} inside", rank, share.tosses(), inside);

    link.contribute(inside)?;
    Ok(inside)
}

fn announce(plan: &RunPlan) {
    let workload = &plan.workload;
    info!(
        "estimating pi: {} tosses over {} participants ({} sampling), {} each",
        workload.total_samples(),
        workload.participants(),
        workload.sampling_participants(),
        workload.share().tosses()
    );
}

fn settle(rank: usize, outcome: Result<u64, CollectiveError>) {
    if let Err(e) = outcome {
        debug!("participant {} stopped early: {}", rank, e);
    }
}

/// Run every participant as a thread and return the coordinator's report
pub fn run_threads(plan: RunPlan) -> Result<RunReport, PiError> {
    announce(&plan);
    let (coordinator_link, workers) = world(plan.workload.participants());

    let mut handles = vec![];
    for link in workers {
        let rank = link.rank();
        let handle = thread::Builder::new()
            .name(format!("participant-{rank}"))
            .spawn(move || worker(link, plan.run_seed))
            .map_err(|e| PiError::Runtime(format!("failed to spawn participant {rank}: {e}")))?;
        handles.push((rank, handle));
    }

    let report = coordinator(coordinator_link, plan);

    for (rank, handle) in handles {
        match handle.join() {
            Ok(outcome) => settle(rank, outcome),
            Err(_) => warn!("participant {} panicked", rank),
        }
    }

    let report = report?;
    info!("reduced {} hits from {} darts", report.global_hits, report.samples_taken);
    Ok(report)
}

/// Same round trip with every participant on tokio's blocking pool
pub async fn run_tasks(plan: RunPlan) -> Result<RunReport, PiError> {
    announce(&plan);
    let (coordinator_link, workers) = world(plan.workload.participants());

    // The coordinator goes first so a bounded blocking pool can never fill up
    // with workers waiting on a broadcast that has not been sent.
    let coordinator_task = task::spawn_blocking(move || coordinator(coordinator_link, plan));

    let mut handles = vec![];
    for link in workers {
        let rank = link.rank();
        handles.push((rank, task::spawn_blocking(move || worker(link, plan.run_seed))));
    }

    let report = coordinator_task
        .await
        .map_err(|e| PiError::Runtime(format!("coordinator task failed: {e}")))?;

    for (rank, handle) in handles {
        match handle.await {
            Ok(outcome) => settle(rank, outcome),
            Err(e) => warn!("participant {} task failed: {}", rank, e),
        }
    }

    let report = report?;
    info!("reduced {} hits from {} darts", report.global_hits, report.samples_taken);
    Ok(report)
}

/// Dispatch a plan onto the chosen runtime
pub fn run(plan: RunPlan, runtime: Runtime) -> Result<RunReport, PiError> {
    match runtime {
        Runtime::Threads => run_threads(plan),
        Runtime::Tasks => {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|e| PiError::Runtime(format!("failed to start tokio runtime: {e}")))?;
            rt.block_on(run_tasks(plan))
        }
    }
}
