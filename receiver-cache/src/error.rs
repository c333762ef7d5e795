use thiserror::Error;

use crate::client::ClientError;

/// Errors surfaced by [`ReceiverCache::fetch`](crate::cache::ReceiverCache::fetch).
#[derive(Error, Debug)]
pub enum FetchError {
    /// The service disconnected the receiver while pulling. The usual cause
    /// is a second consumer reading the same consumer group and partition;
    /// retrying cannot fix a persistent misconfiguration, so this is
    /// surfaced instead of looped on.
    #[error(
        "receiver for partition {partition_id} on consumer group {consumer_group} was disconnected ({detail}); \
         another consumer is likely reading the same group and partition concurrently, \
         which is a configuration error and will not be retried"
    )]
    ConsumerConflict {
        consumer_group: String,
        partition_id: String,
        detail: String,
    },

    /// After closing and recreating the receiver at the requested position,
    /// the service still delivered a different sequence number.
    #[error("requested resume at sequence number {requested} but received {received} after recreating the receiver")]
    PositionNotHonored { requested: i64, received: i64 },

    /// The receiver was used before any successful creation. Unreachable
    /// through `fetch`, which always creates before receiving.
    #[error("receiver for partition {0} has no live handle")]
    Uninitialized(String),

    /// Creation or pull failure from the protocol client, propagated
    /// unchanged; whether to retry is the caller's decision.
    #[error("protocol client failure: {0}")]
    Client(#[from] ClientError),
}
