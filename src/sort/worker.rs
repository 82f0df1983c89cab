//! Per-worker orchestration of one sorting run.
//!
//! Every worker executes the same sequence: obtain its partition, sort it
//! locally, draw a sample, resolve the shared splitters, run the butterfly
//! exchange, and hand the final bucket upstream. Rank 0 additionally reads
//! the run parameters and performs the initial broadcast and scatter
//! before joining the common path.

use tracing::{debug, info};

use crate::error::Result;
use crate::network::collective::{
    broadcast_params, recv_chunk, recv_params, scatter_chunks,
};
use crate::network::fabric::Mailbox;
use crate::sort::butterfly::redistribute;
use crate::sort::sample::draw_sample;
use crate::sort::splitter::resolve_splitters;

/// The coordinator's share of the work: the full input list and the
/// global sample size to announce.
pub struct SortInput {
    pub sample_size: usize,
    pub keys: Vec<i64>,
}

/// Runs one worker to completion and returns its final sorted bucket.
///
/// `input` is `Some` only on rank 0. Any communication failure is fatal;
/// the caller aborts the whole run, since a partial redistribution has no
/// meaningful order.
pub async fn run_worker(mut mailbox: Mailbox, input: Option<SortInput>) -> Result<Vec<i64>> {
    let rank = mailbox.rank();
    let workers = mailbox.workers();

    let (sample_size, mut local) = match input {
        Some(input) => {
            let list_size = input.keys.len();
            broadcast_params(&mailbox, input.sample_size, list_size)?;
            let local = scatter_chunks(&mailbox, &input.keys, list_size / workers)?;
            info!(workers, list_size, "scattered input across workers");
            (input.sample_size, local)
        }
        None => {
            let (sample_size, _list_size) = recv_params(&mut mailbox).await?;
            let local = recv_chunk(&mut mailbox).await?;
            (sample_size, local)
        }
    };

    local.sort_unstable();

    let sample = draw_sample(&local, sample_size / workers, rank);
    debug!(rank, sample_len = sample.len(), "drew local sample");

    let splitters = resolve_splitters(&mut mailbox, sample).await?;
    debug!(rank, ?splitters, "splitter vector assembled");

    let bucket = redistribute(&mut mailbox, &splitters, local).await?;
    info!(rank, bucket_len = bucket.len(), "worker finished");
    Ok(bucket)
}
