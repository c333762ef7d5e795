//! Seams for the external collaborators: the protocol client that owns the
//! wire protocol and the pool that lends connection handles. The cache only
//! consumes these as opaque primitives.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::event::Event;

/// Errors surfaced by the protocol client primitives.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The service dropped the receiver link. With epoch receivers this
    /// happens when another receiver claims the same consumer group and
    /// partition with an equal or higher epoch.
    #[error("receiver disconnected: {0}")]
    Disconnected(String),
    /// Any other transport-level failure; handed to callers unchanged.
    #[error("transport failure: {0}")]
    Transport(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Options applied when opening a partition receiver.
#[derive(Debug, Clone)]
pub struct ReceiverOptions {
    /// Diagnostic tag attached to the receiver, visible in service-side
    /// logs. Never used for correctness.
    pub identifier: String,
    /// Whether the client collects its own runtime metrics for this
    /// receiver. The cache always opens receivers with this off.
    pub runtime_metrics: bool,
    /// Read-ahead count the receiver starts with.
    pub prefetch: u32,
}

/// Lends shared connection handles keyed by connection string.
///
/// Implementations retain ownership and lifecycle authority over the
/// handles; the cache borrows on every receiver creation and never returns
/// them.
#[async_trait]
pub trait ConnectionPool: Send + Sync {
    async fn borrow(&self, connection_string: &str) -> Result<Arc<dyn Connection>, ClientError>;
}

/// A shared protocol-level connection capable of opening partition
/// receivers. One connection may serve receivers on several partitions of
/// the same stream.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Open an exclusive receiver on `partition_id` under `consumer_group`.
    ///
    /// `from_sequence` is inclusive: the first event pulled from the
    /// returned receiver must carry exactly that sequence number. `epoch`
    /// claims exclusive ownership of the group/partition pair; the service
    /// disconnects any receiver holding a lower epoch.
    async fn create_receiver(
        &self,
        consumer_group: &str,
        partition_id: &str,
        from_sequence: i64,
        epoch: i64,
        options: ReceiverOptions,
    ) -> Result<Box<dyn PartitionReceiver>, ClientError>;
}

/// An open, exclusive receiver over one partition.
#[async_trait]
pub trait PartitionReceiver: Send + Sync {
    /// Pull up to `max_count` events. An empty result is not an error; it
    /// means nothing arrived before the client's own receive wait elapsed.
    async fn receive(&mut self, max_count: u32) -> Result<Vec<Event>, ClientError>;

    /// Update the read-ahead count on the live link.
    fn set_prefetch(&mut self, count: u32);

    /// Close the underlying link.
    async fn close(&mut self) -> Result<(), ClientError>;
}
