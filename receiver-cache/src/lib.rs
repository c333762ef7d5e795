//! Caching layer for long-lived pull receivers over a partitioned event
//! stream.
//!
//! Opening an exclusive partition receiver (one partition, one consumer
//! group, one epoch) is expensive, while the surrounding scheduling
//! framework asks for the next batch of events once per cycle.
//! [`ReceiverCache`] keeps one receiver alive per (connection, consumer
//! group, partition) key, verifies on every fetch that the receiver's cursor
//! matches the sequence number the caller expects, transparently closes and
//! recreates it when it does not, and sizes the client's read-ahead window
//! from the caller's batch size.
//!
//! The wire protocol, connection pooling and scheduling live behind the
//! traits in [`client`]; this crate only implements the caching and
//! reconciliation logic on top of them.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod event;
mod receiver;
pub mod target;

pub use cache::ReceiverCache;
pub use client::{ClientError, Connection, ConnectionPool, PartitionReceiver, ReceiverOptions};
pub use config::{CacheConfig, WorkerIdentity};
pub use error::FetchError;
pub use event::Event;
pub use target::{CacheKey, Target, DEFAULT_CONSUMER_GROUP};
