use bytes::Bytes;
use time::OffsetDateTime;

/// A single event delivered from a partition.
///
/// `sequence_number` is the per-partition monotonic position the cache
/// reconciles against; the remaining metadata is carried through to callers
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Position assigned by the service; the resume cursor.
    pub sequence_number: i64,
    /// Opaque service-side cursor, useful in logs only.
    pub offset: String,
    /// When the service accepted the event into the partition.
    pub enqueued_at: OffsetDateTime,
    /// Application payload, opaque to this layer.
    pub payload: Bytes,
}
