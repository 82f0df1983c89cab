//! The message fabric connecting the workers.
//!
//! Workers never share key storage; every key that moves between two
//! workers crosses the fabric as a bincode-encoded [`Frame`]. The fabric
//! provides matched point-to-point receive plus the collective operations
//! (broadcast, scatter, all-gather, ring hand-off) the sort phases need.

pub mod collective;
pub mod fabric;
pub mod types;


pub use fabric::{Fabric, Mailbox};
pub use types::Frame;
