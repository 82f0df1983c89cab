//! Error types for the sorting cluster.
//!
//! Every error here is fatal for the whole run: a half-finished exchange
//! round leaves the global order undefined, so there are no partial-result
//! semantics to recover into.

use thiserror::Error;

/// Errors that can occur while setting up or running a sort.
#[derive(Error, Debug)]
pub enum SortError {
    /// Run parameters violate a precondition. Raised before any worker
    /// is spawned and before any message is sent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A send or receive failed, or a peer violated the wire protocol
    /// (codec failure, migrant count mismatch, closed mailbox).
    #[error("communication error: {0}")]
    Communication(String),

    /// The textual input stream could not be parsed.
    #[error("input error: {0}")]
    Input(String),
}

/// Result type for cluster operations.
pub type Result<T> = std::result::Result<T, SortError>;
