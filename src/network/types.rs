//! Wire protocol for worker-to-worker communication.
//!
//! Every message exchanged during a run is one of these frames, serialized
//! with bincode before it leaves the sending worker. Frames that carry a
//! variable number of keys are announced by a `MigrantCount` frame first,
//! so the receiver knows the payload length before it arrives.

use serde::{Deserialize, Serialize};

/// Zero-based identifier of a worker among the `p` cooperating workers.
pub type Rank = usize;

/// The wire protocol for inter-worker communication.
///
/// - `Config`: run parameters, broadcast by rank 0 before the scatter.
/// - `Chunk`: one worker's initial partition, sent by rank 0.
/// - `Sample`: a worker's sorted sample, all-gathered by everyone.
/// - `HandOff`: the ring hand-off of a sample group's last value.
/// - `Boundary`: one worker's computed splitter, all-gathered by everyone.
/// - `MigrantCount` / `Migrants`: the per-round length handshake and
///   payload of the butterfly exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Frame {
    Config {
        sample_size: usize,
        list_size: usize,
    },

    Chunk {
        keys: Vec<i64>,
    },

    Sample {
        keys: Vec<i64>,
    },

    HandOff {
        key: i64,
    },

    Boundary {
        value: f64,
    },

    MigrantCount {
        round: u32,
        count: usize,
    },

    Migrants {
        round: u32,
        keys: Vec<i64>,
    },
}

/// A frame in transit: the sender's rank plus the encoded frame bytes.
///
/// The payload stays opaque until the receiving worker decodes it, so no
/// key storage is ever shared between two workers.
#[derive(Debug)]
pub struct Envelope {
    pub from: Rank,
    pub bytes: Vec<u8>,
}
