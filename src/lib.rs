//! Distributed Butterfly Sample Sort Library
//!
//! This library crate defines the core modules of the sorting cluster.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of three loosely coupled subsystems:
//!
//! - **`config`**: Run parameters and precondition checks. Worker count,
//!   list size, and sample size are validated here before any worker task
//!   exists; the butterfly topology only pairs correctly for power-of-two
//!   worker counts, so anything else is rejected up front.
//! - **`network`**: The message fabric. Workers own their partitions
//!   exclusively and interact only through bincode-encoded frames; the
//!   fabric provides matched point-to-point receive and the collective
//!   operations (broadcast, scatter, all-gather, ring hand-off).
//! - **`sort`**: The algorithm itself. Sample extraction, splitter
//!   resolution, the `log2(p)`-round butterfly redistribution, per-worker
//!   orchestration, and the driver that spawns workers and aggregates
//!   their sorted buckets.

pub mod config;
pub mod error;
pub mod network;
pub mod sort;

pub use config::RunConfig;
pub use error::{Result, SortError};
pub use sort::run_cluster;
