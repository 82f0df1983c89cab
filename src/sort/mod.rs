//! The distributed sample sort.
//!
//! Phases, in order: scatter, local sort, sample extraction, splitter
//! resolution, butterfly redistribution, final local sort, aggregation.
//! The modules here map one-to-one onto those phases; `driver` spawns the
//! worker tasks and collects their partitions.

pub mod butterfly;
pub mod driver;
pub mod sample;
pub mod splitter;
pub mod worker;

#[cfg(test)]
mod tests;

pub use driver::run_cluster;
