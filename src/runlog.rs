//! Append-only log of finished runs

use log::{info, warn};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use crate::aggregator::RunReport;

/// Append one summary line; the file is closed again before returning
pub fn append(path: &Path, report: &RunReport) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", report.log_line())?;
    Ok(())
}

/// Append, downgrading a failure to a warning so the estimate is still reported
pub fn record(path: &Path, report: &RunReport) -> bool {
    match append(path, report) {
        Ok(()) => {
            info!("appended run to {}", path.display());
            true
        }
        Err(e) => {
            warn!("could not write run log {}: {}", path.display(), e);
            false
        }
    }
}
