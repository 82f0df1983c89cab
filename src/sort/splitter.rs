//! Splitter resolution: from per-worker samples to the shared boundary
//! vector.
//!
//! Protocol: one all-gather makes every worker's sample visible to all;
//! each worker sorts the merged set and takes the contiguous group of
//! `s/p` values at its own rank. A ring hand-off then produces one
//! boundary per worker: worker `k` sends its group's last value right, and
//! worker `k+1` averages it with its own group's first value. Rank 0 has
//! no left neighbor and uses its first value directly. A final all-gather
//! assembles the `p` boundaries, in rank order, into the splitter vector
//! every worker holds before the butterfly starts.
//!
//! Boundary `k` separates bucket `k` from bucket `k+1`.

use tracing::debug;

use crate::error::Result;
use crate::network::collective::{
    all_gather_boundary, all_gather_sample, hand_off_right, recv_hand_off,
};
use crate::network::fabric::Mailbox;

/// Runs the splitter protocol and returns the rank-ordered, nondecreasing
/// splitter vector of length `p`.
pub async fn resolve_splitters(mailbox: &mut Mailbox, sample: Vec<i64>) -> Result<Vec<f64>> {
    let rank = mailbox.rank();
    let workers = mailbox.workers();
    let group_len = sample.len();

    let gathered = all_gather_sample(mailbox, sample).await?;
    let mut merged: Vec<i64> = gathered.into_iter().flatten().collect();
    merged.sort_unstable();

    // This worker's contiguous group of the merged sample set.
    let group = &merged[rank * group_len..(rank + 1) * group_len];

    if rank != workers - 1 {
        hand_off_right(mailbox, group[group_len - 1])?;
    }

    let boundary = if rank == 0 {
        group[0] as f64
    } else {
        let from_left = recv_hand_off(mailbox).await?;
        (from_left as f64 + group[0] as f64) / 2.0
    };

    debug!(rank, boundary, "computed local boundary");

    let splitters = all_gather_boundary(mailbox, boundary).await?;
    debug_assert!(splitters.windows(2).all(|w| w[0] <= w[1]));
    Ok(splitters)
}
