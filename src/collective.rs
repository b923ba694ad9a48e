//! In-process collectives: a one-to-all broadcast of the share and an
//! all-to-one sum-reduction of the hit counts.
//!
//! Each rank owns exactly one endpoint. The coordinator holds the sending side
//! of every worker's share channel and the only receiver of the reduction.
//! A rank that dies drops its endpoint, which turns a pending collective on
//! its peers into a [`CollectiveError`] instead of a hang.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::{Collective, CollectiveError};
use crate::workload::{Share, COORDINATOR};

/// Build the endpoints for a run of `size` participants
pub fn world(size: usize) -> (CoordinatorLink, Vec<WorkerLink>) {
    let (hits_tx, hits_rx) = mpsc::channel();
    let mut share_txs = Vec::with_capacity(size.saturating_sub(1));
    let mut workers = Vec::with_capacity(size.saturating_sub(1));

    for rank in 1..size {
        let (share_tx, share_rx) = mpsc::channel();
        share_txs.push(share_tx);
        workers.push(WorkerLink {
            rank,
            share_rx,
            hits_tx: hits_tx.clone(),
        });
    }
    // Only the workers keep a reduction sender; once they are all gone the
    // coordinator's receive fails rather than waiting forever.
    drop(hits_tx);

    let coordinator = CoordinatorLink {
        size,
        share_txs,
        hits_rx,
    };
    (coordinator, workers)
}

/// Rank 0's endpoint
#[derive(Debug)]
pub struct CoordinatorLink {
    size: usize,
    share_txs: Vec<Sender<Share>>,
    hits_rx: Receiver<(usize, u64)>,
}

impl CoordinatorLink {
    /// Deliver the share to every worker; returns the coordinator's own copy
    pub fn broadcast(&self, share: Share) -> Result<Share, CollectiveError> {
        for (idx, tx) in self.share_txs.iter().enumerate() {
            tx.send(share).map_err(|_| CollectiveError {
                collective: Collective::Broadcast,
                rank: idx + 1,
            })?;
        }
        Ok(share)
    }

    /// Sum the coordinator's count with one count from every worker
    pub fn reduce_sum(self, local: u64) -> Result<u64, CollectiveError> {
        let mut reported = vec![false; self.size];
        reported[COORDINATOR] = true;
        let mut total = local;

        for _ in 1..self.size {
            match self.hits_rx.recv() {
                Ok((rank, hits)) => {
                    reported[rank] = true;
                    total += hits;
                }
                Err(_) => {
                    let rank = reported.iter().position(|done| !done).unwrap_or(COORDINATOR);
                    return Err(CollectiveError {
                        collective: Collective::Reduce,
                        rank,
                    });
                }
            }
        }

        Ok(total)
    }
}

/// Endpoint of ranks 1..size
#[derive(Debug)]
pub struct WorkerLink {
    rank: usize,
    share_rx: Receiver<Share>,
    hits_tx: Sender<(usize, u64)>,
}

impl WorkerLink {
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Block until the coordinator's broadcast arrives
    pub fn receive_share(&self) -> Result<Share, CollectiveError> {
        self.share_rx.recv().map_err(|_| CollectiveError {
            collective: Collective::Broadcast,
            rank: COORDINATOR,
        })
    }

    /// Send this rank's count into the reduction; the endpoint is spent afterwards
    pub fn contribute(self, hits: u64) -> Result<(), CollectiveError> {
        self.hits_tx.send((self.rank, hits)).map_err(|_| CollectiveError {
            collective: Collective::Reduce,
            rank: COORDINATOR,
        })
    }
}
