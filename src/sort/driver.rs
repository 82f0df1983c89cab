//! Spawns the worker tasks and aggregates their buckets.

use tracing::info;

use crate::config::RunConfig;
use crate::error::{Result, SortError};
use crate::network::collective::COORDINATOR;
use crate::network::fabric::Fabric;
use crate::sort::worker::{SortInput, run_worker};

/// Runs a full sort: spawns `p` workers over a fresh fabric, feeds the
/// input to rank 0, and returns the final partitions indexed by rank.
///
/// Concatenating the returned partitions in order yields the globally
/// sorted sequence. Validation happens before any worker is spawned, so a
/// bad configuration never sends a single frame.
pub async fn run_cluster(config: RunConfig, mut keys: Vec<i64>) -> Result<Vec<Vec<i64>>> {
    if keys.len() != config.list_size {
        return Err(SortError::Configuration(format!(
            "expected {} keys, got {}",
            config.list_size,
            keys.len()
        )));
    }

    info!(
        workers = config.workers,
        list_size = config.list_size,
        sample_size = config.sample_size,
        rounds = config.rounds(),
        "starting sort"
    );

    let mut handles = Vec::with_capacity(config.workers);
    for mailbox in Fabric::connect(config.workers) {
        let input = (mailbox.rank() == COORDINATOR).then(|| SortInput {
            sample_size: config.sample_size,
            keys: std::mem::take(&mut keys),
        });
        handles.push(tokio::spawn(run_worker(mailbox, input)));
    }

    let mut partitions = Vec::with_capacity(config.workers);
    for (rank, handle) in handles.into_iter().enumerate() {
        let bucket = handle.await.map_err(|e| {
            SortError::Communication(format!("worker {} task aborted: {}", rank, e))
        })??;
        partitions.push(bucket);
    }

    info!("sort complete");
    Ok(partitions)
}
