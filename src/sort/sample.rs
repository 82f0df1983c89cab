//! Sample extraction from a worker's local partition.
//!
//! The draw is by *position*, without replacement: `amount` distinct
//! indices into the partition, values returned in ascending order. Drawing
//! by position is what guarantees termination; a draw that rejects
//! duplicates by value can spin forever on a partition full of equal keys
//! while never finding `amount` distinct ones.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::index;

use crate::network::types::Rank;

/// Draws a sorted sample of `amount` keys from a sorted local partition.
///
/// Each rank seeds its own RNG so a run is reproducible and no two
/// workers draw identical index sequences by accident.
/// Requires `amount <= local.len()`, which the run configuration
/// guarantees (`s < n` with both divisible by `p`).
pub fn draw_sample(local: &[i64], amount: usize, rank: Rank) -> Vec<i64> {
    debug_assert!(amount <= local.len());

    let mut rng = StdRng::seed_from_u64(rank as u64 + 1);
    let mut sample: Vec<i64> = index::sample(&mut rng, local.len(), amount)
        .into_iter()
        .map(|i| local[i])
        .collect();
    sample.sort_unstable();
    sample
}
