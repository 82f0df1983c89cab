//! Butterfly redistribution: the exchange phase of the sort.
//!
//! Runs `log2(p)` rounds. In each round a worker pairs with the rank that
//! differs in one bit, splits its partition against the splitter at the
//! current `mid`, ships the half that belongs on the partner's side, and
//! keeps the rest plus whatever the partner shipped back. After the last
//! round every key sits on its globally correct worker; one final local
//! sort restores order inside the bucket.
//!
//! The exchange inside a round is a count handshake followed by the
//! payload. Sends never block, so both partners can post before either
//! receives; receives are matched on `(partner, round)`, so a partner that
//! races ahead cannot confuse the current round.

use tracing::debug;

use crate::error::{Result, SortError};
use crate::network::fabric::Mailbox;
use crate::network::types::Frame;

/// Per-round exchange state, advanced once per round.
///
/// `mid` is the rank separating the active group's lower and upper half;
/// `bitmask` selects the partner bit. Both start at `p/2`; the exchange is
/// over when the bitmask reaches zero. Only meaningful for power-of-two
/// worker counts, which the run configuration guarantees.
#[derive(Debug, Clone, Copy)]
pub struct ExchangeState {
    round: u32,
    mid: usize,
    bitmask: usize,
}

impl ExchangeState {
    pub fn new(workers: usize) -> Self {
        debug_assert!(workers.is_power_of_two());
        Self {
            round: 0,
            mid: workers / 2,
            bitmask: workers / 2,
        }
    }

    /// True while rounds remain. A single worker starts inactive.
    pub fn active(&self) -> bool {
        self.bitmask > 0
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn mid(&self) -> usize {
        self.mid
    }

    pub fn bitmask(&self) -> usize {
        self.bitmask
    }

    /// Steps `mid` toward the half containing this worker and halves the
    /// bitmask, so the next round tests a finer splitter.
    ///
    /// The step is half the current bitmask: that keeps `mid` on the
    /// boundary that bisects this worker's active group, so both members
    /// of the next round's pair test the same splitter. A fixed step of 1
    /// drifts off that boundary once `p > 4`.
    pub fn advance(&mut self, in_lower_half: bool) {
        let step = self.bitmask >> 1;
        if in_lower_half {
            self.mid -= step;
        } else {
            self.mid += step;
        }
        self.bitmask >>= 1;
        self.round += 1;
    }
}

/// Runs the butterfly rounds and returns this worker's final sorted
/// bucket.
pub async fn redistribute(
    mailbox: &mut Mailbox,
    splitters: &[f64],
    mut local: Vec<i64>,
) -> Result<Vec<i64>> {
    let rank = mailbox.rank();
    let mut state = ExchangeState::new(mailbox.workers());

    while state.active() {
        let partner = rank ^ state.bitmask();
        let split = splitters[state.mid()];
        let in_lower_half = rank < state.mid();
        let round = state.round();

        // Keys equal to the splitter stay put on both sides; only keys
        // strictly on the partner's side of the boundary migrate.
        let (keep, outbound): (Vec<i64>, Vec<i64>) = local.into_iter().partition(|&key| {
            if in_lower_half {
                (key as f64) <= split
            } else {
                (key as f64) >= split
            }
        });

        debug!(
            rank,
            round,
            partner,
            sending = outbound.len(),
            keeping = keep.len(),
            "butterfly exchange"
        );

        // Count handshake first, then the payload. The partner sizes its
        // buffer from the count and cross-checks the payload against it.
        mailbox.send(partner, &Frame::MigrantCount {
            round,
            count: outbound.len(),
        })?;
        mailbox.send(partner, &Frame::Migrants {
            round,
            keys: outbound,
        })?;

        let announced = match mailbox
            .recv(partner, |f| matches!(f, Frame::MigrantCount { round: r, .. } if *r == round))
            .await?
        {
            Frame::MigrantCount { count, .. } => count,
            other => {
                return Err(SortError::Communication(format!(
                    "expected MigrantCount frame, got {:?}",
                    other
                )));
            }
        };

        let inbound = match mailbox
            .recv(partner, |f| matches!(f, Frame::Migrants { round: r, .. } if *r == round))
            .await?
        {
            Frame::Migrants { keys, .. } => keys,
            other => {
                return Err(SortError::Communication(format!(
                    "expected Migrants frame, got {:?}",
                    other
                )));
            }
        };

        if inbound.len() != announced {
            return Err(SortError::Communication(format!(
                "worker {} announced {} migrants for round {} but sent {}",
                partner,
                announced,
                round,
                inbound.len()
            )));
        }

        // The new partition is a fresh buffer: keep ∪ received.
        let mut next = keep;
        next.extend(inbound);
        local = next;

        state.advance(in_lower_half);
    }

    // The rounds establish bucket placement, not intra-bucket order.
    local.sort_unstable();
    Ok(local)
}
