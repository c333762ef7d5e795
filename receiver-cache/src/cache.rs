use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::client::ConnectionPool;
use crate::config::{CacheConfig, WorkerIdentity};
use crate::error::FetchError;
use crate::event::Event;
use crate::receiver::CachedReceiver;
use crate::target::{CacheKey, Target};

/// Registry of cached partition receivers, keyed by (connection, consumer
/// group, partition).
///
/// Construct one per worker process and share it between call sites; it is
/// cheap to clone. Receivers are created lazily on first fetch and kept for
/// the life of the process. There is no eviction: the population is bounded
/// by the number of partitions assigned to this worker.
///
/// Callers must not issue concurrent [`fetch`](ReceiverCache::fetch) calls
/// for the same key; the surrounding scheduler is expected to route each
/// partition to one worker at a time. Racing callers are serialized
/// internally so the registry stays consistent and exactly one receiver
/// exists per key, but each racer reconciles the cursor to its own requested
/// sequence, churning close/recreate cycles.
#[derive(Clone)]
pub struct ReceiverCache {
    config: Arc<CacheConfig>,
    identity: WorkerIdentity,
    pool: Arc<dyn ConnectionPool>,
    receivers: Arc<Mutex<HashMap<CacheKey, Arc<Mutex<CachedReceiver>>>>>,
}

impl ReceiverCache {
    pub fn new(
        config: CacheConfig,
        identity: WorkerIdentity,
        pool: Arc<dyn ConnectionPool>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            identity,
            pool,
            receivers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the event carrying exactly `requested_sequence` from the
    /// partition `target` points at, creating or recreating the underlying
    /// receiver as needed, and retune its prefetch for `batch_size`.
    ///
    /// Failures from receiver creation or receipt propagate unchanged.
    pub async fn fetch(
        &self,
        target: &Target,
        requested_sequence: i64,
        batch_size: u32,
    ) -> Result<Event, FetchError> {
        let key = target.cache_key();

        // The map lock only covers lookup and insert. Inserting an
        // uninitialized receiver does no I/O, so a slow creation on one key
        // never blocks fetches on other keys.
        let receiver = {
            let mut receivers = self.receivers.lock().await;
            receivers
                .entry(key.clone())
                .or_insert_with(|| {
                    debug!(%key, "registering receiver");
                    Arc::new(Mutex::new(CachedReceiver::new(
                        target.clone(),
                        self.identity.receiver_identifier(target.partition_id()),
                        Arc::clone(&self.config),
                        Arc::clone(&self.pool),
                    )))
                })
                .clone()
        };

        let mut receiver = receiver.lock().await;
        if !receiver.is_active() {
            receiver.create(requested_sequence).await?;
        }
        receiver.receive(requested_sequence, batch_size).await
    }

    /// Number of receivers registered so far.
    pub async fn receiver_count(&self) -> usize {
        self.receivers.lock().await.len()
    }
}
