use std::mem;
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info, warn};

use crate::client::{ClientError, ConnectionPool, PartitionReceiver, ReceiverOptions};
use crate::config::CacheConfig;
use crate::error::FetchError;
use crate::event::Event;
use crate::target::Target;

/// Lifecycle state of the protocol-level handle. A cached receiver cycles
/// between these two states for the life of the process; it is never removed
/// from the registry.
enum ReceiverState {
    Uninitialized,
    Active(Box<dyn PartitionReceiver>),
}

/// One cached receiver per registry key. Owns the protocol-level handle and
/// is responsible for creation, cursor verification, recreation on mismatch,
/// prefetch tuning and best-effort close.
pub(crate) struct CachedReceiver {
    target: Target,
    identifier: String,
    config: Arc<CacheConfig>,
    pool: Arc<dyn ConnectionPool>,
    state: ReceiverState,
}

impl CachedReceiver {
    pub(crate) fn new(
        target: Target,
        identifier: String,
        config: Arc<CacheConfig>,
        pool: Arc<dyn ConnectionPool>,
    ) -> Self {
        Self {
            target,
            identifier,
            config,
            pool,
            state: ReceiverState::Uninitialized,
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        matches!(self.state, ReceiverState::Active(_))
    }

    /// Open a fresh exclusive receiver positioned so that the next pull
    /// yields exactly `at_sequence`. Creation failures are not retried here;
    /// they propagate to the caller.
    pub(crate) async fn create(&mut self, at_sequence: i64) -> Result<(), FetchError> {
        let connection = self.pool.borrow(self.target.connection_string()).await?;
        let handle = connection
            .create_receiver(
                self.target.consumer_group(),
                self.target.partition_id(),
                at_sequence,
                self.config.receiver_epoch,
                ReceiverOptions {
                    identifier: self.identifier.clone(),
                    runtime_metrics: false,
                    prefetch: self.config.default_prefetch,
                },
            )
            .await?;
        self.state = ReceiverState::Active(handle);
        info!(
            partition = self.target.partition_id(),
            sequence = at_sequence,
            identifier = %self.identifier,
            "created partition receiver"
        );
        counter!(
            "receiver_cache_created_total",
            "partition" => self.target.partition_id().to_owned()
        )
        .increment(1);
        Ok(())
    }

    /// Best-effort close. The handle is discarded regardless of the close
    /// outcome; a failed close still invalidates it.
    pub(crate) async fn close(&mut self) {
        if let ReceiverState::Active(mut handle) =
            mem::replace(&mut self.state, ReceiverState::Uninitialized)
        {
            if let Err(error) = handle.close().await {
                warn!(
                    partition = self.target.partition_id(),
                    %error,
                    "failed to close partition receiver, discarding the handle"
                );
                counter!(
                    "receiver_cache_close_errors_total",
                    "partition" => self.target.partition_id().to_owned()
                )
                .increment(1);
            }
        }
    }

    /// Pull exactly one event, retrying empty results until the client
    /// produces data or fails. There is no backoff; the client's own blocking
    /// receive wait is the pacing. A disconnect here means another consumer
    /// claimed the group/partition, so it is surfaced as a configuration
    /// error instead of retried.
    async fn receive_one(&mut self) -> Result<Event, FetchError> {
        let handle = match &mut self.state {
            ReceiverState::Active(handle) => handle,
            ReceiverState::Uninitialized => {
                return Err(FetchError::Uninitialized(
                    self.target.partition_id().to_owned(),
                ))
            }
        };
        loop {
            match handle.receive(1).await {
                Ok(events) => {
                    if let Some(event) = events.into_iter().next() {
                        return Ok(event);
                    }
                }
                Err(ClientError::Disconnected(detail)) => {
                    return Err(FetchError::ConsumerConflict {
                        consumer_group: self.target.consumer_group().to_owned(),
                        partition_id: self.target.partition_id().to_owned(),
                        detail,
                    })
                }
                Err(error) => return Err(error.into()),
            }
        }
    }

    /// Pull the event carrying `requested_sequence`, recreating the receiver
    /// if its cursor drifted, then retune prefetch for `batch_size`.
    pub(crate) async fn receive(
        &mut self,
        requested_sequence: i64,
        batch_size: u32,
    ) -> Result<Event, FetchError> {
        let mut event = self.receive_one().await?;
        if event.sequence_number != requested_sequence {
            // Cursor drift: a reconnect or epoch takeover resumed elsewhere.
            warn!(
                partition = self.target.partition_id(),
                requested = requested_sequence,
                received = event.sequence_number,
                "receiver cursor out of sync, recreating"
            );
            counter!(
                "receiver_cache_cursor_mismatch_total",
                "partition" => self.target.partition_id().to_owned()
            )
            .increment(1);
            self.close().await;
            self.create(requested_sequence).await?;
            event = self.receive_one().await?;
            if event.sequence_number != requested_sequence {
                return Err(FetchError::PositionNotHonored {
                    requested: requested_sequence,
                    received: event.sequence_number,
                });
            }
        }

        let prefetch = batch_size.max(self.config.prefetch_floor);
        match &mut self.state {
            ReceiverState::Active(handle) => handle.set_prefetch(prefetch),
            ReceiverState::Uninitialized => {
                return Err(FetchError::Uninitialized(
                    self.target.partition_id().to_owned(),
                ))
            }
        }
        debug!(
            partition = self.target.partition_id(),
            prefetch, "updated prefetch"
        );
        Ok(event)
    }
}
