//! Run configuration and precondition checks.
//!
//! All divisibility and topology preconditions are enforced here, before a
//! single worker task exists. The butterfly recurrence is only correct for
//! power-of-two worker counts, so anything else is rejected outright
//! rather than run through a pairing scheme that silently misroutes keys.

use crate::error::{Result, SortError};

/// Parameters of one sorting run, fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of cooperating workers (`p`). Must be a power of two.
    pub workers: usize,
    /// Total number of keys (`n`). Must be divisible by `workers`.
    pub list_size: usize,
    /// Global sample size (`s`). Must be divisible by `workers` and < `n`.
    pub sample_size: usize,
}

impl RunConfig {
    /// Validates and builds a run configuration.
    pub fn new(workers: usize, list_size: usize, sample_size: usize) -> Result<Self> {
        if workers == 0 {
            return Err(SortError::Configuration(
                "worker count must be at least 1".to_string(),
            ));
        }
        if !workers.is_power_of_two() {
            return Err(SortError::Configuration(format!(
                "worker count {} is not a power of two; the butterfly pairing requires one",
                workers
            )));
        }
        if list_size == 0 || list_size % workers != 0 {
            return Err(SortError::Configuration(format!(
                "list size {} is not a positive multiple of worker count {}",
                list_size, workers
            )));
        }
        if sample_size == 0 || sample_size % workers != 0 {
            return Err(SortError::Configuration(format!(
                "sample size {} is not a positive multiple of worker count {}",
                sample_size, workers
            )));
        }
        if sample_size >= list_size {
            return Err(SortError::Configuration(format!(
                "sample size {} must be smaller than list size {}",
                sample_size, list_size
            )));
        }

        Ok(Self {
            workers,
            list_size,
            sample_size,
        })
    }

    /// Keys held by each worker after the initial scatter (`n / p`).
    pub fn local_list_size(&self) -> usize {
        self.list_size / self.workers
    }

    /// Sample keys drawn by each worker (`s / p`).
    pub fn local_sample_size(&self) -> usize {
        self.sample_size / self.workers
    }

    /// Number of butterfly rounds (`log2 p`). Zero for a single worker.
    pub fn rounds(&self) -> u32 {
        self.workers.trailing_zeros()
    }
}
