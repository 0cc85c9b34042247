use thiserror::Error;

use crate::types::EntryType;

/// Internal failures of the agent.
///
/// None of these reach the page: handlers log them and drop the batch they
/// were working on.
#[derive(Debug, Error)]
pub enum Error {
    /// The host cannot observe this entry type.
    #[error("performance entry type `{0}` is not supported by this host")]
    Unsupported(EntryType),
    /// A record carried a value no reducer can accept.
    #[error("malformed {entry_type} record: {reason}")]
    MalformedRecord {
        /// The stream the record came from.
        entry_type: EntryType,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A record showed up on the wrong stream.
    #[error("expected a {expected} record, got {found}")]
    UnexpectedEntry {
        /// The stream the channel subscribed to.
        expected: EntryType,
        /// The type of the record that was delivered.
        found: EntryType,
    },
    /// A host could not turn a native record into a timeline record.
    #[error("failed to decode timeline record: {0}")]
    Decode(String),
    /// The snapshot was borrowed by another handler.
    #[error("the metric snapshot is in use")]
    SnapshotBusy,
    /// The snapshot could not be encoded.
    #[error("failed to serialize the metric snapshot")]
    Serialize(#[from] serde_json::Error),
    /// The delivery primitive rejected a beacon.
    #[error("beacon delivery failed: {0}")]
    Transport(String),
}
