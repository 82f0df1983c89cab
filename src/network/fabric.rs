//! Full-mesh channel fabric and per-worker mailboxes.
//!
//! [`Fabric::connect`] wires `p` mailboxes together so that any worker can
//! send a frame to any other. Sends are non-blocking, which is what makes
//! the pairwise butterfly exchange deadlock-free: both partners can post
//! their outgoing frames before either starts receiving.
//!
//! Receives are *matched*: the caller names the sender and a predicate on
//! the frame. Frames that arrive early (a partner racing ahead into the
//! next phase, or a different peer's collective contribution) are stashed
//! and delivered when a later receive asks for them. Without this, a fast
//! partner's next-round traffic would be mistaken for the current round's.

use std::collections::VecDeque;

use tokio::sync::mpsc;

use super::types::{Envelope, Frame, Rank};
use crate::error::{Result, SortError};

/// One worker's endpoint on the fabric.
///
/// Owns the single inbox for this rank and a sender handle to every peer.
/// Dropping a mailbox closes the rank's inbox; peers observe that as a
/// communication error, which aborts the run.
pub struct Mailbox {
    rank: Rank,
    senders: Vec<mpsc::UnboundedSender<Envelope>>,
    inbox: mpsc::UnboundedReceiver<Envelope>,
    stash: VecDeque<(Rank, Frame)>,
}

impl Mailbox {
    /// This worker's rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Total number of workers on the fabric.
    pub fn workers(&self) -> usize {
        self.senders.len()
    }

    /// Encodes a frame and posts it to `to`'s inbox. Never blocks.
    pub fn send(&self, to: Rank, frame: &Frame) -> Result<()> {
        let bytes = bincode::serialize(frame).map_err(|e| {
            SortError::Communication(format!("failed to encode frame for worker {}: {}", to, e))
        })?;

        self.senders[to]
            .send(Envelope {
                from: self.rank,
                bytes,
            })
            .map_err(|_| {
                SortError::Communication(format!(
                    "worker {} is gone; cannot deliver frame from worker {}",
                    to, self.rank
                ))
            })
    }

    /// Receives the next frame from `from` matching `want`.
    ///
    /// Non-matching frames are stashed in arrival order and offered to
    /// later receives first. Blocks until a match arrives; a closed inbox
    /// means some worker failed, which is fatal for the run.
    pub async fn recv<F>(&mut self, from: Rank, want: F) -> Result<Frame>
    where
        F: Fn(&Frame) -> bool,
    {
        let stashed = self
            .stash
            .iter()
            .position(|(sender, frame)| *sender == from && want(frame));
        if let Some(pos) = stashed {
            if let Some((_, frame)) = self.stash.remove(pos) {
                return Ok(frame);
            }
        }

        loop {
            let envelope = self.inbox.recv().await.ok_or_else(|| {
                SortError::Communication(format!(
                    "worker {} inbox closed while waiting for a frame from worker {}",
                    self.rank, from
                ))
            })?;

            let frame: Frame = bincode::deserialize(&envelope.bytes).map_err(|e| {
                SortError::Communication(format!(
                    "worker {} received an undecodable frame from worker {}: {}",
                    self.rank, envelope.from, e
                ))
            })?;

            if envelope.from == from && want(&frame) {
                return Ok(frame);
            }

            self.stash.push_back((envelope.from, frame));
        }
    }
}

/// Builder for the worker mesh.
pub struct Fabric;

impl Fabric {
    /// Creates `workers` interconnected mailboxes, indexed by rank.
    pub fn connect(workers: usize) -> Vec<Mailbox> {
        let mut senders = Vec::with_capacity(workers);
        let mut inboxes = Vec::with_capacity(workers);

        for _ in 0..workers {
            let (tx, rx) = mpsc::unbounded_channel();
            senders.push(tx);
            inboxes.push(rx);
        }

        inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| Mailbox {
                rank,
                senders: senders.clone(),
                inbox,
                stash: VecDeque::new(),
            })
            .collect()
    }
}
