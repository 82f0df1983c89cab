//! Collective operations over the fabric.
//!
//! These are the synchronous phases of the sort: broadcast of the run
//! parameters, the initial scatter, the two all-gathers (samples and
//! boundaries), and the splitter ring hand-off. Each is expressed as plain
//! point-to-point frames; the barrier effect comes from every worker
//! blocking in its matched receives until all contributions arrive.

use super::fabric::Mailbox;
use super::types::{Frame, Rank};
use crate::error::{Result, SortError};

/// The rank that reads the input and coordinates the scatter.
pub const COORDINATOR: Rank = 0;

fn protocol_violation(expected: &str, got: &Frame) -> SortError {
    SortError::Communication(format!("expected {} frame, got {:?}", expected, got))
}

/// Rank 0: announce `(s, n)` to every other worker.
pub fn broadcast_params(mailbox: &Mailbox, sample_size: usize, list_size: usize) -> Result<()> {
    for rank in 0..mailbox.workers() {
        if rank == mailbox.rank() {
            continue;
        }
        mailbox.send(
            rank,
            &Frame::Config {
                sample_size,
                list_size,
            },
        )?;
    }
    Ok(())
}

/// Non-coordinators: wait for the run parameters from rank 0.
pub async fn recv_params(mailbox: &mut Mailbox) -> Result<(usize, usize)> {
    let frame = mailbox
        .recv(COORDINATOR, |f| matches!(f, Frame::Config { .. }))
        .await?;
    match frame {
        Frame::Config {
            sample_size,
            list_size,
        } => Ok((sample_size, list_size)),
        other => Err(protocol_violation("Config", &other)),
    }
}

/// Rank 0: split the input into equal chunks, send one to every other
/// worker, and keep its own.
pub fn scatter_chunks(mailbox: &Mailbox, keys: &[i64], chunk_len: usize) -> Result<Vec<i64>> {
    for rank in 1..mailbox.workers() {
        let chunk = keys[rank * chunk_len..(rank + 1) * chunk_len].to_vec();
        mailbox.send(rank, &Frame::Chunk { keys: chunk })?;
    }
    Ok(keys[..chunk_len].to_vec())
}

/// Non-coordinators: wait for this worker's partition from rank 0.
pub async fn recv_chunk(mailbox: &mut Mailbox) -> Result<Vec<i64>> {
    let frame = mailbox
        .recv(COORDINATOR, |f| matches!(f, Frame::Chunk { .. }))
        .await?;
    match frame {
        Frame::Chunk { keys } => Ok(keys),
        other => Err(protocol_violation("Chunk", &other)),
    }
}

/// Every worker: contribute its sample and collect everyone else's.
/// The result is indexed by rank.
pub async fn all_gather_sample(mailbox: &mut Mailbox, mine: Vec<i64>) -> Result<Vec<Vec<i64>>> {
    for rank in 0..mailbox.workers() {
        if rank == mailbox.rank() {
            continue;
        }
        mailbox.send(rank, &Frame::Sample { keys: mine.clone() })?;
    }

    let mut gathered: Vec<Vec<i64>> = Vec::with_capacity(mailbox.workers());
    for rank in 0..mailbox.workers() {
        if rank == mailbox.rank() {
            gathered.push(mine.clone());
            continue;
        }
        let frame = mailbox
            .recv(rank, |f| matches!(f, Frame::Sample { .. }))
            .await?;
        match frame {
            Frame::Sample { keys } => gathered.push(keys),
            other => return Err(protocol_violation("Sample", &other)),
        }
    }
    Ok(gathered)
}

/// Every worker: contribute its boundary and collect everyone else's.
/// The result is indexed by rank, which makes it the splitter vector.
pub async fn all_gather_boundary(mailbox: &mut Mailbox, mine: f64) -> Result<Vec<f64>> {
    for rank in 0..mailbox.workers() {
        if rank == mailbox.rank() {
            continue;
        }
        mailbox.send(rank, &Frame::Boundary { value: mine })?;
    }

    let mut gathered = Vec::with_capacity(mailbox.workers());
    for rank in 0..mailbox.workers() {
        if rank == mailbox.rank() {
            gathered.push(mine);
            continue;
        }
        let frame = mailbox
            .recv(rank, |f| matches!(f, Frame::Boundary { .. }))
            .await?;
        match frame {
            Frame::Boundary { value } => gathered.push(value),
            other => return Err(protocol_violation("Boundary", &other)),
        }
    }
    Ok(gathered)
}

/// Ranks `0..p-1`: pass the last value of this worker's sample group to
/// the right neighbor.
pub fn hand_off_right(mailbox: &Mailbox, key: i64) -> Result<()> {
    mailbox.send(mailbox.rank() + 1, &Frame::HandOff { key })
}

/// Ranks `1..p`: wait for the left neighbor's hand-off.
pub async fn recv_hand_off(mailbox: &mut Mailbox) -> Result<i64> {
    let left = mailbox.rank() - 1;
    let frame = mailbox
        .recv(left, |f| matches!(f, Frame::HandOff { .. }))
        .await?;
    match frame {
        Frame::HandOff { key } => Ok(key),
        other => Err(protocol_violation("HandOff", &other)),
    }
}
